//! Background price refresh task.
//!
//! Regenerates the quote snapshot on a fixed interval and reprices
//! every portfolio against it, mirroring what a market feed would do.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, warn};

use crate::main_lib::{refresh_quotes, AppState};

pub fn spawn_refresh_task(state: Arc<AppState>, period: Duration) {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        // The state is built with a warm cache; skip the immediate tick.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match refresh_quotes(&state).await {
                Ok(()) => debug!("Quote refresh complete"),
                Err(e) => warn!("Quote refresh failed: {e}"),
            }
        }
    });
}
