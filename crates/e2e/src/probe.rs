//! Readiness probe for the application under test
//!
//! The application is an external collaborator reached by URL; the
//! harness never spawns it. Before the suite runs, poll the base URL
//! until it answers so the first scenario does not fail on a server that
//! is still warming up.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{HarnessError, HarnessResult};

/// Poll `base_url` until it responds with a success status, or fail after
/// the startup bound elapses.
pub async fn wait_for_app(base_url: &str, startup_timeout: Duration) -> HarnessResult<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;

    let start = std::time::Instant::now();
    let mut attempts = 0;

    while start.elapsed() < startup_timeout {
        attempts += 1;

        match client.get(base_url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Application is reachable at {}", base_url);
                return Ok(());
            }
            Ok(resp) => {
                warn!("Readiness probe returned {}", resp.status());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for application at {}...", base_url);
                }
                // Connection refused is expected while the app starts
                if !e.is_connect() {
                    warn!("Readiness probe error: {}", e);
                }
            }
        }

        sleep(Duration::from_millis(200)).await;
    }

    Err(HarnessError::AppUnreachable {
        url: base_url.to_string(),
        attempts,
    })
}
