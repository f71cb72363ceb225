//! Image analysis setup entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use image_analysis_setup::cli::Cli;
use image_analysis_setup::setup::SetupRunner;
use image_analysis_setup::shell::SystemRunner;
use image_analysis_setup::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout carries the setup transcript.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("image_analysis_setup=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("image_analysis_setup=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("image-analysis-setup starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
        console::set_colors_enabled(false);
    }

    let interactive = std::io::stdin().is_terminal();
    let mut ui = create_ui(interactive, cli.output_mode());

    let config = cli.setup_config();
    let runner = SetupRunner::new(&config, &SystemRunner);

    match runner.run(ui.as_mut()) {
        Ok(report) => ExitCode::from(report.exit_code() as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
