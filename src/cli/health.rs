//! Health command implementation

use crate::cli::output::{format_health_json, format_health_table};
use crate::cli::HealthArgs;
use crate::dispatch::Dispatcher;

/// Handle `notedeck health`: probe every endpoint, then report the
/// endpoint the next request would use.
pub async fn handle_health(
    args: &HealthArgs,
    dispatcher: &Dispatcher,
) -> Result<String, Box<dyn std::error::Error>> {
    let snapshots = dispatcher.probe_all().await;
    let live = dispatcher.preview_endpoint();

    if args.json {
        Ok(format_health_json(&snapshots, live.as_ref())?)
    } else {
        Ok(format_health_table(&snapshots, live.as_ref()))
    }
}
