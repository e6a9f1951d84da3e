use serde::Serialize;

use crate::models::{LightState, NotificationView, Reading, ReadingStatus};

use super::session::SessionSnapshot;

pub const READING_UPDATED_EVENT: &str = "brooder-reading-updated";
pub const NOTIFICATIONS_CHANGED_EVENT: &str = "brooder-notifications-changed";
pub const LIGHT_CHANGED_EVENT: &str = "brooder-light-changed";
pub const SESSION_RESET_EVENT: &str = "brooder-session-reset";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingUpdate {
    pub reading: Reading,
    pub target_temperature: f64,
    pub temperature_status: ReadingStatus,
    pub humidity_status: ReadingStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsUpdate {
    pub notifications: Vec<NotificationView>,
    pub unread_count: usize,
}

/// Serializes as its payload alone; the event name travels separately.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BrooderEvent {
    ReadingUpdated(ReadingUpdate),
    NotificationsChanged(NotificationsUpdate),
    LightChanged(LightState),
    SessionReset(SessionSnapshot),
}

impl BrooderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BrooderEvent::ReadingUpdated(_) => READING_UPDATED_EVENT,
            BrooderEvent::NotificationsChanged(_) => NOTIFICATIONS_CHANGED_EVENT,
            BrooderEvent::LightChanged(_) => LIGHT_CHANGED_EVENT,
            BrooderEvent::SessionReset(_) => SESSION_RESET_EVENT,
        }
    }
}
