//! Optional tool probes.

use crate::config::OptionalTool;
use crate::shell::{CommandRunner, Platform};
use crate::ui::UserInterface;

/// Whether an optional tool was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolReport {
    pub name: &'static str,
    pub available: bool,
}

/// Run the tool's version command silently.
pub fn probe_tool(runner: &dyn CommandRunner, tool: &OptionalTool) -> bool {
    let available = runner.check(&tool.version_command());
    tracing::debug!(tool = tool.program, available, "probed optional tool");
    available
}

/// Probe every tool and print install hints for the missing ones.
///
/// Each tool is reported independently; none of them affects the exit code.
pub fn check_optional_tools(
    runner: &dyn CommandRunner,
    ui: &mut dyn UserInterface,
    tools: &[OptionalTool],
    platform: Platform,
) -> Vec<ToolReport> {
    ui.newline();
    ui.message("Checking optional tools:");

    tools
        .iter()
        .map(|tool| {
            let available = probe_tool(runner, tool);
            if available {
                ui.success(&format!("{} is available", tool.name));
            } else {
                ui.warning(&format!(
                    "{} not found. Install it for {}:",
                    tool.name, tool.purpose
                ));
                for hint in tool.install_hints(platform) {
                    ui.show_hint(hint);
                }
            }
            ToolReport {
                name: tool.name,
                available,
            }
        })
        .collect()
}
