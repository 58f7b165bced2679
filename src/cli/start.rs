use super::{commands, dispatch, telemetry};
use crate::config;
use anyhow::Result;
use tracing::debug;

/// Main orchestrator - Pure orchestration with no business logic
///
/// Six-step data flow:
/// 1. Environment: Load `.env` so clap's env fallbacks can see it
/// 2. Parse: Extract CLI arguments
/// 3. Extract Verbosity: Convert flag count to logging level
/// 4. Initialize Telemetry: Set up structured logging to stderr
/// 5. Dispatch: Convert `ArgMatches` into typed Action enum
/// 6. Execute: Run the action's business logic
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or the action fails.
/// A failed probe is not an error, it is reported on stdout.
pub async fn start() -> Result<()> {
    // 1. Environment: values already set in the process win over the file
    let env_file = config::load_env_file();

    // 2. Parse: Extract CLI arguments
    let matches = commands::new().get_matches();

    // 3. Extract Verbosity
    let verbosity = matches.get_count("verbose");

    // 4. Initialize Telemetry
    telemetry::init(verbosity)?;

    if let Some(path) = env_file {
        debug!(path = %path.display(), "loaded environment file");
    }

    // 5. Dispatch: Convert ArgMatches into typed Action enum
    let action = dispatch::dispatch(&matches)?;

    // 6. Execute: Run the action's business logic
    action.execute().await?;

    Ok(())
}
