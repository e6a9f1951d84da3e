//! Seams between the brooder engine and whatever hosts it.
//!
//! The Tauri shell implements [`EventSink`] on its `AppHandle`; the headless
//! runner logs events instead. Tests substitute both ports.

use chrono::{DateTime, Local, Timelike, Utc};

use super::events::BrooderEvent;

/// Receives every state change the engine publishes.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &BrooderEvent) -> anyhow::Result<()>;
}

/// Wall clock used for notification timestamps, the session start date and
/// the automatic light schedule.
pub trait Clock: Send + Sync {
    fn now_local(&self) -> DateTime<Local>;

    fn now_utc(&self) -> DateTime<Utc> {
        self.now_local().with_timezone(&Utc)
    }

    fn local_hour(&self) -> u32 {
        self.now_local().hour()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Sink that only writes events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&self, event: &BrooderEvent) -> anyhow::Result<()> {
        match event {
            BrooderEvent::ReadingUpdated(update) => log::debug!(
                "reading {:.1}°C {}% ({} / {})",
                update.reading.temperature,
                update.reading.humidity,
                update.temperature_status.as_str(),
                update.humidity_status.as_str()
            ),
            BrooderEvent::NotificationsChanged(update) => {
                if let Some(latest) = update.notifications.first() {
                    log::info!(
                        "notifications: {} unread, latest [{}] {}: {}",
                        update.unread_count,
                        latest.kind.as_str(),
                        latest.title,
                        latest.message
                    );
                } else {
                    log::info!("notifications cleared");
                }
            }
            BrooderEvent::LightChanged(light) => {
                log::info!("light {:?} ({})", light.status, light.mode.as_str())
            }
            BrooderEvent::SessionReset(snapshot) => {
                log::info!("new brooder session started {}", snapshot.date_started)
            }
        }
        Ok(())
    }
}
