use anyhow::{bail, Result};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    alerts::{evaluate, NotificationStore, ThresholdConfig},
    history::{ReadingHistory, Sample},
    models::{
        light::mode_changed_alert,
        reading::{clamp_target_temperature, humidity_status, temperature_status},
        Alert, LightSchedule, LightState, Notification, NotificationKind, NotificationView,
        Reading, ReadingStatus,
    },
};

use super::events::{NotificationsUpdate, ReadingUpdate};

pub const DEFAULT_TARGET_TEMPERATURE: f64 = 30.0;
pub const NEW_BROODER_TITLE: &str = "New Brooder Started";
pub const NEW_BROODER_MESSAGE: &str = "Monitoring has been reset for a new brooder session";
pub const RESET_PROMPT: &str =
    "Are you sure you want to start monitoring a new brooder? This will reset all current data.";

/// Everything the dashboard shows for one brooder.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    /// Start date as shown to the user, e.g. "December 1, 2025".
    pub date_started: String,
    pub started_at: DateTime<Utc>,
    pub reading: Reading,
    pub target_temperature: f64,
    pub light: LightState,
    pub notifications: NotificationStore,
    pub history: ReadingHistory,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: String,
    pub date_started: String,
    pub started_at: DateTime<Utc>,
    pub reading: Reading,
    pub target_temperature: f64,
    pub light: LightState,
    pub notifications: Vec<NotificationView>,
    pub unread_count: usize,
    pub temperature_status: ReadingStatus,
    pub humidity_status: ReadingStatus,
    pub monitoring: bool,
}

impl Session {
    pub fn new(started: DateTime<Local>, history_capacity: usize) -> Self {
        let started_at = started.with_timezone(&Utc);
        Self {
            id: Uuid::new_v4().to_string(),
            date_started: format_start_date(&started),
            started_at,
            reading: Reading::default(),
            target_temperature: DEFAULT_TARGET_TEMPERATURE,
            light: LightState::default(),
            notifications: NotificationStore::new(),
            history: ReadingHistory::new(started_at, history_capacity),
        }
    }

    /// Replace the whole session with a new-brooder baseline. The only
    /// notification left is the one announcing the reset.
    pub fn reset(&mut self, started: DateTime<Local>) -> Notification {
        let mut fresh = Session::new(started, self.history.capacity());
        let announcement = Notification::from_alert(
            Alert::new(NotificationKind::Success, NEW_BROODER_TITLE, NEW_BROODER_MESSAGE),
            fresh.started_at,
        );
        fresh.notifications = NotificationStore::with_entry(announcement.clone());
        *self = fresh;
        announcement
    }

    /// Store a simulated reading, record it, and raise any threshold alerts.
    pub fn apply_reading(
        &mut self,
        reading: Reading,
        thresholds: &ThresholdConfig,
        now: DateTime<Utc>,
    ) -> Vec<Notification> {
        self.reading = reading;
        self.history
            .record(Sample::new(now, &self.reading, self.target_temperature));
        self.raise_threshold_alerts(thresholds, now)
    }

    /// Out-of-range targets are clamped; NaN and infinities are rejected.
    /// Re-evaluates thresholds only when the stored target actually changes.
    pub fn set_target_temperature(
        &mut self,
        value: f64,
        thresholds: &ThresholdConfig,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notification>> {
        let Some(target) = clamp_target_temperature(value) else {
            bail!("target temperature must be a finite number, got {value}");
        };

        if target == self.target_temperature {
            return Ok(Vec::new());
        }

        self.target_temperature = target;
        Ok(self.raise_threshold_alerts(thresholds, now))
    }

    fn raise_threshold_alerts(
        &mut self,
        thresholds: &ThresholdConfig,
        now: DateTime<Utc>,
    ) -> Vec<Notification> {
        evaluate(&self.reading, self.target_temperature, thresholds)
            .into_alerts()
            .filter_map(|alert| self.notifications.raise(alert, now))
            .collect()
    }

    /// Returns whether the lamp changed; automatic mode ignores the request.
    pub fn toggle_light(&mut self) -> bool {
        let previous = self.light;
        self.light = previous.toggled();
        self.light != previous
    }

    pub fn toggle_light_mode(
        &mut self,
        hour: u32,
        schedule: &LightSchedule,
        now: DateTime<Utc>,
    ) -> Notification {
        self.light = self.light.mode_toggled(hour, schedule);
        let notification = Notification::from_alert(mode_changed_alert(self.light.mode), now);
        self.notifications.append(notification.clone());
        notification
    }

    pub fn dismiss_notification(&mut self, id: &str) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        self.notifications.mark_read(id)
    }

    pub fn mark_all_notifications_read(&mut self) -> usize {
        self.notifications.mark_all_read()
    }

    pub fn temperature_status(&self) -> ReadingStatus {
        temperature_status(self.reading.temperature, self.target_temperature)
    }

    pub fn humidity_status(&self) -> ReadingStatus {
        humidity_status(self.reading.humidity)
    }

    pub fn reading_update(&self) -> ReadingUpdate {
        ReadingUpdate {
            reading: self.reading,
            target_temperature: self.target_temperature,
            temperature_status: self.temperature_status(),
            humidity_status: self.humidity_status(),
        }
    }

    pub fn notification_views(&self, now: DateTime<Utc>) -> Vec<NotificationView> {
        self.notifications
            .iter()
            .map(|n| NotificationView::new(n, now))
            .collect()
    }

    pub fn notifications_update(&self, now: DateTime<Utc>) -> NotificationsUpdate {
        NotificationsUpdate {
            notifications: self.notification_views(now),
            unread_count: self.notifications.unread_count(),
        }
    }

    pub fn snapshot(&self, now: DateTime<Utc>, monitoring: bool) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            date_started: self.date_started.clone(),
            started_at: self.started_at,
            reading: self.reading,
            target_temperature: self.target_temperature,
            light: self.light,
            notifications: self.notification_views(now),
            unread_count: self.notifications.unread_count(),
            temperature_status: self.temperature_status(),
            humidity_status: self.humidity_status(),
            monitoring,
        }
    }
}

pub fn format_start_date(date: &DateTime<Local>) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::thresholds::{HUMIDITY_ALERT_TITLE, TEMPERATURE_ALERT_TITLE};
    use crate::history::DEFAULT_RECENT_CAPACITY;
    use crate::models::{LightMode, LightStatus};
    use chrono::TimeZone;

    fn session() -> Session {
        Session::new(Local::now(), DEFAULT_RECENT_CAPACITY)
    }

    fn thresholds() -> ThresholdConfig {
        ThresholdConfig::default()
    }

    #[test]
    fn new_session_baseline() {
        let s = session();
        assert_eq!(s.reading, Reading::new(25.0, 60));
        assert_eq!(s.target_temperature, 30.0);
        assert_eq!(s.light, LightState::new(LightStatus::Off, LightMode::Manual));
        assert!(s.notifications.is_empty());
        assert!(s.history.is_empty());
    }

    #[test]
    fn start_date_is_human_readable() {
        let date = Local.with_ymd_and_hms(2025, 12, 1, 9, 30, 0).unwrap();
        assert_eq!(format_start_date(&date), "December 1, 2025");
    }

    #[test]
    fn reading_above_target_raises_once_while_unread() {
        let mut s = session();
        let now = Utc::now();

        let raised = s.apply_reading(Reading::new(33.5, 60), &thresholds(), now);
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].title, TEMPERATURE_ALERT_TITLE);
        assert_eq!(raised[0].message, "Temperature is above target by 3.5°C");

        let raised = s.apply_reading(Reading::new(34.0, 60), &thresholds(), now);
        assert!(raised.is_empty());
        assert_eq!(s.notifications.len(), 1);
        assert_eq!(s.history.len(), 2);
    }

    #[test]
    fn read_alert_no_longer_suppresses() {
        let mut s = session();
        let now = Utc::now();

        let first = s.apply_reading(Reading::new(33.5, 60), &thresholds(), now);
        assert!(s.mark_notification_read(&first[0].id));

        let again = s.apply_reading(Reading::new(34.0, 60), &thresholds(), now);
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].message, "Temperature is above target by 4.0°C");
        assert_eq!(s.notifications.len(), 2);
        assert_eq!(s.notifications.unread_count(), 1);
    }

    #[test]
    fn humidity_alert_message() {
        let mut s = session();
        let raised = s.apply_reading(Reading::new(30.0, 80), &thresholds(), Utc::now());
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].title, HUMIDITY_ALERT_TITLE);
        assert_eq!(raised[0].message, "Humidity is too high at 80%");
    }

    #[test]
    fn target_change_reevaluates_and_clamps() {
        let mut s = session();
        let now = Utc::now();
        s.apply_reading(Reading::new(30.0, 60), &thresholds(), now);

        let raised = s
            .set_target_temperature(50.0, &thresholds(), now)
            .expect("finite target");
        assert_eq!(s.target_temperature, 40.0);
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].message, "Temperature is below target by 10.0°C");

        let unchanged = s
            .set_target_temperature(40.0, &thresholds(), now)
            .expect("finite target");
        assert!(unchanged.is_empty());
    }

    #[test]
    fn non_finite_target_is_rejected_without_change() {
        let mut s = session();
        assert!(s
            .set_target_temperature(f64::NAN, &thresholds(), Utc::now())
            .is_err());
        assert_eq!(s.target_temperature, DEFAULT_TARGET_TEMPERATURE);
    }

    #[test]
    fn mode_toggle_always_appends_one_info_notification() {
        let mut s = session();
        let schedule = LightSchedule::default();
        let now = Utc::now();

        let n = s.toggle_light_mode(10, &schedule, now);
        assert_eq!(s.light, LightState::new(LightStatus::On, LightMode::Automatic));
        assert_eq!(n.kind, NotificationKind::Info);
        assert_eq!(n.message, "Light control switched to automatic mode");

        // Manual toggle is ignored in automatic mode.
        assert!(!s.toggle_light());
        assert_eq!(s.light.status, LightStatus::On);

        let n = s.toggle_light_mode(23, &schedule, now);
        assert_eq!(n.message, "Light control switched to manual mode");
        assert_eq!(s.light, LightState::new(LightStatus::On, LightMode::Manual));
        assert_eq!(s.notifications.len(), 2);
        assert!(s.toggle_light());
        assert_eq!(s.light.status, LightStatus::Off);
    }

    #[test]
    fn reset_replaces_everything() {
        let mut s = session();
        let now = Utc::now();
        let old_id = s.id.clone();
        s.apply_reading(Reading::new(38.0, 90), &thresholds(), now);
        s.set_target_temperature(35.0, &thresholds(), now).expect("target");
        s.toggle_light();
        s.toggle_light_mode(10, &LightSchedule::default(), now);

        let announcement = s.reset(Local::now());

        assert_ne!(s.id, old_id);
        assert_eq!(s.reading, Reading::new(25.0, 60));
        assert_eq!(s.target_temperature, 30.0);
        assert_eq!(s.light, LightState::new(LightStatus::Off, LightMode::Manual));
        assert!(s.history.is_empty());
        assert_eq!(s.notifications.len(), 1);
        let only = s.notifications.iter().next().expect("announcement");
        assert_eq!(only.id, announcement.id);
        assert_eq!(only.kind, NotificationKind::Success);
        assert_eq!(only.title, NEW_BROODER_TITLE);
        assert!(!only.read);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut s = session();
        let now = Utc::now();
        s.apply_reading(Reading::new(33.5, 40), &thresholds(), now);

        let snapshot = s.snapshot(now, true);
        assert_eq!(snapshot.unread_count, 2);
        assert_eq!(snapshot.temperature_status, ReadingStatus::High);
        assert_eq!(snapshot.humidity_status, ReadingStatus::Low);
        assert_eq!(snapshot.notifications[0].timestamp, "Just now");
        assert!(snapshot.monitoring);

        let json = serde_json::to_value(&snapshot).expect("serializes");
        assert_eq!(json["unreadCount"], 2);
        assert_eq!(json["light"]["mode"], "manual");
        assert_eq!(json["notifications"][0]["kind"], "warning");
    }
}
