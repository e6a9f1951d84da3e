use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};
use tokio::sync::Mutex;

use crate::{
    history::{Sample, WeeklyAverage},
    sensing::{SensorSimulator, SimulationContext, SimulationController},
    settings::MonitorSettings,
};

use super::{
    events::BrooderEvent,
    ports::{Clock, EventSink, SystemClock},
    session::{Session, SessionSnapshot, RESET_PROMPT},
};

/// Owns the brooder session and serializes every change to it.
///
/// Each operation takes the session lock for its whole read-modify-publish
/// step, so simulator ticks and user actions never interleave.
#[derive(Clone)]
pub struct BrooderController {
    session: Arc<Mutex<Session>>,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    simulation: Arc<Mutex<SimulationController>>,
    settings: MonitorSettings,
}

impl BrooderController {
    pub fn new(settings: MonitorSettings, sink: Arc<dyn EventSink>) -> Self {
        Self::with_clock(settings, sink, Arc::new(SystemClock))
    }

    pub fn with_clock(
        settings: MonitorSettings,
        sink: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let session = Session::new(clock.now_local(), settings.history_capacity);
        Self {
            session: Arc::new(Mutex::new(session)),
            sink,
            clock,
            simulation: Arc::new(Mutex::new(SimulationController::new())),
            settings,
        }
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    pub async fn get_snapshot(&self) -> SessionSnapshot {
        let monitoring = self.is_monitoring().await;
        let guard = self.session.lock().await;
        guard.snapshot(self.clock.now_utc(), monitoring)
    }

    pub async fn get_weekly_trend(&self) -> Vec<WeeklyAverage> {
        self.session.lock().await.history.weekly_trend()
    }

    /// The last `count` simulated samples, oldest first.
    pub async fn get_recent_readings(&self, count: usize) -> Vec<Sample> {
        self.session.lock().await.history.latest(count)
    }

    pub async fn is_monitoring(&self) -> bool {
        self.simulation.lock().await.is_running()
    }

    /// Start the simulated sensor feed. Returns `false` if it was already running.
    pub async fn start_monitoring(&self) -> bool {
        let start_reading = self.session.lock().await.reading;
        let context = SimulationContext {
            session: self.session.clone(),
            sink: self.sink.clone(),
            clock: self.clock.clone(),
            simulator: SensorSimulator::with_optional_seed(self.settings.simulator_seed, start_reading),
            thresholds: self.settings.thresholds,
            tick_interval: self.settings.tick_interval(),
        };

        let started = self.simulation.lock().await.start(context);
        if started {
            info!(
                "monitoring started, tick every {}ms",
                self.settings.tick_interval().as_millis()
            );
        }
        started
    }

    pub async fn stop_monitoring(&self) -> Result<()> {
        self.simulation.lock().await.stop().await
    }

    pub async fn set_target_temperature(&self, value: f64) -> Result<()> {
        let mut guard = self.session.lock().await;
        let now = self.clock.now_utc();
        let raised = guard.set_target_temperature(value, &self.settings.thresholds, now)?;

        self.publish(&BrooderEvent::ReadingUpdated(guard.reading_update()));
        if !raised.is_empty() {
            self.publish(&BrooderEvent::NotificationsChanged(guard.notifications_update(now)));
        }
        Ok(())
    }

    pub async fn toggle_light(&self) {
        let mut guard = self.session.lock().await;
        if guard.toggle_light() {
            self.publish(&BrooderEvent::LightChanged(guard.light));
        }
    }

    pub async fn toggle_light_mode(&self) {
        let mut guard = self.session.lock().await;
        let now = self.clock.now_utc();
        let notification =
            guard.toggle_light_mode(self.clock.local_hour(), &self.settings.light_schedule, now);
        info!("{}", notification.message);

        self.publish(&BrooderEvent::LightChanged(guard.light));
        self.publish(&BrooderEvent::NotificationsChanged(guard.notifications_update(now)));
    }

    pub async fn dismiss_notification(&self, id: &str) {
        let mut guard = self.session.lock().await;
        if guard.dismiss_notification(id) {
            let update = guard.notifications_update(self.clock.now_utc());
            self.publish(&BrooderEvent::NotificationsChanged(update));
        }
    }

    pub async fn mark_notification_read(&self, id: &str) {
        let mut guard = self.session.lock().await;
        if guard.mark_notification_read(id) {
            let update = guard.notifications_update(self.clock.now_utc());
            self.publish(&BrooderEvent::NotificationsChanged(update));
        }
    }

    pub async fn mark_all_notifications_read(&self) {
        let mut guard = self.session.lock().await;
        if guard.mark_all_notifications_read() > 0 {
            let update = guard.notifications_update(self.clock.now_utc());
            self.publish(&BrooderEvent::NotificationsChanged(update));
        }
    }

    /// Start over with a new brooder once `confirm` agrees to [`RESET_PROMPT`].
    /// Declining changes nothing. Returns whether the reset happened.
    pub async fn reset_session(&self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(RESET_PROMPT) {
            info!("new brooder reset declined");
            return false;
        }

        let monitoring = self.is_monitoring().await;
        let mut guard = self.session.lock().await;
        guard.reset(self.clock.now_local());
        info!("new brooder session {} started {}", guard.id, guard.date_started);

        let snapshot = guard.snapshot(self.clock.now_utc(), monitoring);
        self.publish(&BrooderEvent::SessionReset(snapshot));
        true
    }

    fn publish(&self, event: &BrooderEvent) {
        if let Err(err) = self.sink.publish(event) {
            warn!("failed to publish {}: {err:?}", event.name());
        }
    }
}
