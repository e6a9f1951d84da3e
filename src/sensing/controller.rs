use anyhow::{Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::loop_worker::{simulation_loop, SimulationContext};

/// Owns the single periodic simulator task.
///
/// The task runs between [`start`](Self::start) and [`stop`](Self::stop).
/// Dropping the controller cancels it as well, so a discarded owner never
/// leaves a ticker behind.
pub struct SimulationController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl SimulationController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Spawn the loop. Returns `false` without spawning if one is already running.
    pub fn start(&mut self, context: SimulationContext) -> bool {
        if self.is_running() {
            return false;
        }

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(simulation_loop(context, cancel_token.clone()));

        info!("simulation started");
        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        true
    }

    /// Cancel the loop and wait for it to exit. No-op when idle.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("simulation loop task failed to join")?;
            info!("simulation stopped");
        }
        Ok(())
    }
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}
