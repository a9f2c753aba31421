//! GrowthCalc-rs: linear and exponential growth calculator.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use growthcalc_core::exit_codes;
use growthcalc_lib::{app, config, errors, version};

fn main() {
    let config = config::AppConfig::parse();

    // Logs go to stderr; the TUI owns the terminal, so it stays silent
    // unless RUST_LOG asks otherwise.
    let default_level = if config.tui {
        LevelFilter::OFF
    } else if config.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();
    tracing::debug!(version = %version::full_version(), "Starting");

    let code = match app::run(&config) {
        Ok(code) => code,
        Err(err) => {
            growthcalc_cli::ui::print_error(&format!("{err:#}"));
            errors::handle_error(&err)
        }
    };
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
}
