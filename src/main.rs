use clap::Parser;
use color_eyre::{eyre::Report, Result, Section};
use tracing::{debug, info};

use machine_sync::cli::Args;
use machine_sync::error::MachineSyncError;
use machine_sync::startup::{init_logging, run};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.debug)?;

    let result = match args.into_startup_config() {
        Ok(startup) => run(startup).await,
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(summary) => {
            info!(
                "stopped after {} events ({} remote jobs, {} failures)",
                summary.dispatched, summary.jobs, summary.failures
            );
            Ok(())
        }
        Err(err) => Err(fatal(err)),
    }
}

fn fatal(err: MachineSyncError) -> Report {
    debug!("fatal error code={} category={}", err.error_code(), err.category());
    let hint = err.category().recovery_hint();
    Report::new(err).suggestion(hint)
}
