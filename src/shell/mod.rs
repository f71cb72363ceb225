//! External command execution and host environment queries.

pub mod command;
pub mod mock;
pub mod path;
pub mod platform;

pub use command::{
    execute, CommandOptions, CommandResult, CommandRunner, CommandSpec, SystemRunner,
};
pub use mock::{MockResponse, MockRunner};
pub use path::{find_on_path, is_on_path, parse_system_path, resolve_tool_path};
pub use platform::{is_ci, Platform};
