use super::{commands, dispatch};
use crate::{Variant, telemetry};
use anyhow::Result;

/// Main orchestrator - Pure orchestration with no business logic
///
/// Five-step data flow:
/// 1. Parse: Extract CLI arguments
/// 2. Extract Tracing: Read the driver trace flag
/// 3. Initialize Telemetry: Set up structured logging/tracing
/// 4. Dispatch: Convert `ArgMatches` into typed Action enum
/// 5. Execute: Run the action's business logic
///
/// # Errors
///
/// Returns an error if any step in the flow fails
pub async fn start(variant: Variant) -> Result<()> {
    // 1. Parse: Extract CLI arguments
    let matches = commands::new(variant).get_matches();

    // 2. Extract Tracing
    let trace_events = dispatch::trace_events(&matches);

    // 3. Initialize Telemetry
    telemetry::init(trace_events)?;

    // 4. Dispatch: Convert ArgMatches into typed Action enum
    let action = dispatch::dispatch(variant, &matches)?;

    // 5. Execute: Run the action's business logic
    action.execute().await?;

    Ok(())
}
