//! Inspector CLI entry point.

use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use inspector::api::Context;
use inspector::cli::{Cli, CommandDispatcher};
use inspector::config::load_config;
use inspector::shell::is_ci;
use inspector::ui::{should_use_colors, ConsoleLogger, Logger};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Messages the console logger already printed are kept out of the console
/// layer; the file layer records them.
const CONSOLE_MIRROR_OFF: &str = "inspector::console=off";

/// Initialize the tracing subscriber.
///
/// Console level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// With `--log-file`, everything at DEBUG and above is also written there.
fn init_tracing(debug: bool, log_file: Option<&Path>) {
    let base = if debug {
        "inspector=debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "inspector=info".to_string())
    };
    let console_filter = EnvFilter::try_new(format!("{},{}", base, CONSOLE_MIRROR_OFF))
        .unwrap_or_else(|_| EnvFilter::new(format!("inspector=info,{}", CONSOLE_MIRROR_OFF)));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = log_file.and_then(|path| match File::create(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(EnvFilter::new("inspector=debug")),
        ),
        Err(e) => {
            eprintln!("Cannot open log file {}: {}", path.display(), e);
            None
        }
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.log_file.as_deref());

    tracing::debug!("inspector starting with args: {:?}", cli);

    let logger = ConsoleLogger::new(!cli.no_color && should_use_colors(), cli.debug);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logger.error(&e.to_string());
            logger.failure("Unexpected error - exiting");
            return ExitCode::from(1);
        }
    };

    let mut flags = cli.run_flags();
    if flags.interactive && is_ci() {
        logger.warn("CI environment detected, ignoring --interactive");
        flags.interactive = false;
    }

    let mut ctx = Context::new(cli.context_name(), Box::new(logger))
        .with_flags(flags)
        .with_config(config);

    match CommandDispatcher::new().dispatch(&cli, &mut ctx) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ctx.logger().error(&e.to_string());
            ctx.logger().failure("Unexpected error - exiting");
            ExitCode::from(1)
        }
    }
}
