//! Periodic removal of expired sessions.

use crate::clients::SessionClient;
use chrono::Utc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Purges expired sessions every `interval` until `cancel` fires.
///
/// The sweeper holds a [`SessionClient`], so the session actor keeps running
/// until it has been cancelled.
pub async fn run_sweeper(sessions: SessionClient, interval: Duration, cancel: CancellationToken) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval_secs = interval.as_secs(), "Session sweeper started");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = sessions.purge_expired(Utc::now()).await {
                    warn!(error = %e, "Session sweep failed");
                }
            }
            () = cancel.cancelled() => break,
        }
    }
    info!("Session sweeper stopped");
}
