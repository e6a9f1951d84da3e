use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    alerts::ThresholdConfig,
    brooder::{
        events::BrooderEvent,
        ports::{Clock, EventSink},
        session::Session,
    },
};

use super::simulator::SensorSimulator;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

/// Everything the loop needs, moved into the spawned task.
pub struct SimulationContext {
    pub session: Arc<Mutex<Session>>,
    pub sink: Arc<dyn EventSink>,
    pub clock: Arc<dyn Clock>,
    pub simulator: SensorSimulator,
    pub thresholds: ThresholdConfig,
    pub tick_interval: Duration,
}

pub async fn simulation_loop(context: SimulationContext, cancel_token: CancellationToken) {
    let SimulationContext {
        session,
        sink,
        clock,
        mut simulator,
        thresholds,
        tick_interval,
    } = context;

    // First reading arrives one full interval after start.
    let mut ticker = tokio::time::interval_at(Instant::now() + tick_interval, tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log_info!("simulation loop shutting down after {} ticks", ticks);
                break;
            }
            _ = ticker.tick() => {
                let mut guard = session.lock().await;

                // Cancellation may have landed while waiting for the lock.
                if cancel_token.is_cancelled() {
                    break;
                }

                let reading = simulator.next_from(guard.reading);
                let now = clock.now_utc();
                let raised = guard.apply_reading(reading, &thresholds, now);
                ticks = ticks.wrapping_add(1);

                log_debug!(
                    "tick {}: {:.1}°C {}% (target {:.1}°C)",
                    ticks,
                    reading.temperature,
                    reading.humidity,
                    guard.target_temperature
                );

                if let Err(err) = sink.publish(&BrooderEvent::ReadingUpdated(guard.reading_update())) {
                    log_warn!("failed to publish reading update: {err:?}");
                }

                if !raised.is_empty() {
                    for notification in &raised {
                        log_info!("{}: {}", notification.title, notification.message);
                    }
                    let update = guard.notifications_update(now);
                    if let Err(err) = sink.publish(&BrooderEvent::NotificationsChanged(update)) {
                        log_warn!("failed to publish notifications: {err:?}");
                    }
                }
            }
        }
    }
}
