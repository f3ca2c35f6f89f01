//! Background maintenance sweeps. Currently just the symbicode
//! auto-activation pass (spec.md §4.7's "swept by a maintenance pass three
//! days after creation").

use std::sync::Arc;
use std::time::Duration;

use crate::db::Database;
use crate::symbicode::SymbicodeService;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);
const STALE_AFTER_DAYS: i64 = 3;

/// Spawns the hourly sweep. Returns immediately; the task runs until the
/// process exits.
pub fn spawn_symbicode_sweep(db: Arc<Database>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let executor = db.executor();
            let service = SymbicodeService::new(&executor);
            match service.sweep_stale(STALE_AFTER_DAYS).await {
                Ok(count) if count > 0 => {
                    tracing::info!(count, "swept stale unactivated symbicodes")
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "symbicode sweep failed"),
            }
        }
    });
}
