//! Application entry point and dispatch.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use growthcalc_cli::output::{format_duration, write_snapshot};
use growthcalc_cli::{CliProgressObserver, CliResultPresenter};
use growthcalc_core::observers::LoggingObserver;
use growthcalc_core::{exit_codes, GrowthEngine, GrowthError};
use growthcalc_tui::TuiApp;

use crate::config::AppConfig;
use crate::errors::exit_code_for;

/// Minimum interval between throttled engine log lines.
const LOG_THROTTLE_MS: u64 = 100;

/// Run the application and return the process exit code.
pub fn run(config: &AppConfig) -> Result<i32> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        growthcalc_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(exit_codes::SUCCESS);
    }

    let engine = GrowthEngine::with_config(config.engine_options(), config.calculation_config());
    engine.register(Arc::new(LoggingObserver::new(LOG_THROTTLE_MS)));

    if config.tui {
        return run_tui(engine);
    }
    run_cli(config, &engine)
}

fn run_cli(config: &AppConfig, engine: &GrowthEngine) -> Result<i32> {
    let presenter = CliResultPresenter::new(config.verbose, config.quiet, config.json);
    if !config.quiet && !config.json {
        engine.register(Arc::new(CliProgressObserver::new(config.exponent)));
    }
    ctrlc_handler(engine.clone());

    presenter.present_start(config.base, config.exponent);
    let started = Instant::now();
    engine.start();

    let timed_out = !engine.wait(config.timeout);
    if timed_out {
        warn!(timeout = ?config.timeout, "Run timed out, stopping");
        engine.stop();
        engine.wait(None);
    }

    let snapshot = engine.snapshot();
    presenter.present(&snapshot, started.elapsed());

    if let Some(path) = &config.output {
        write_snapshot(path, &snapshot)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if let (true, Some(limit)) = (timed_out, config.timeout) {
        return Err(GrowthError::Timeout(format_duration(limit)).into());
    }
    Ok(exit_code_for(snapshot.phase))
}

fn run_tui(engine: GrowthEngine) -> Result<i32> {
    let mut app = TuiApp::attach(engine);
    app.run().map_err(|e| anyhow::anyhow!("TUI error: {e}"))?;
    Ok(exit_codes::SUCCESS)
}

fn ctrlc_handler(engine: GrowthEngine) {
    let installed = ctrlc::set_handler(move || {
        debug!("Ctrl+C received, stopping run");
        engine.stop();
    });
    if let Err(err) = installed {
        warn!(%err, "Could not install Ctrl+C handler");
    }
}
