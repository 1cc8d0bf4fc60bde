//! Periodic purge of expired and revoked login sessions.

use std::time::Duration;

use chrono::Utc;
use studio_db::repositories::SessionRepo;
use studio_db::DbPool;
use tokio_util::sync::CancellationToken;

/// Run the session cleanup loop every `interval` until `cancel` is triggered.
pub async fn run(pool: DbPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Session cleanup job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session cleanup job stopping");
                break;
            }
            _ = ticker.tick() => {
                match SessionRepo::cleanup_expired(&pool, Utc::now()).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session cleanup: purged sessions");
                    }
                    Ok(_) => {
                        tracing::debug!("Session cleanup: nothing to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session cleanup failed");
                    }
                }
            }
        }
    }
}
