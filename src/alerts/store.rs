use chrono::{DateTime, Utc};

use crate::models::{Alert, Notification};

/// In-memory notification list, newest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    entries: Vec<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(notification: Notification) -> Self {
        Self {
            entries: vec![notification],
        }
    }

    pub fn append(&mut self, notification: Notification) {
        self.entries.insert(0, notification);
    }

    /// Store `alert` unless an unread notification with the same title is
    /// still outstanding. Read ones never suppress.
    pub fn raise(&mut self, alert: Alert, now: DateTime<Utc>) -> Option<Notification> {
        if self.has_unread_titled(&alert.title) {
            return None;
        }
        let notification = Notification::from_alert(alert, now);
        self.append(notification.clone());
        Some(notification)
    }

    pub fn has_unread_titled(&self, title: &str) -> bool {
        self.entries.iter().any(|n| !n.read && n.title == title)
    }

    /// Returns whether an entry was removed.
    pub fn dismiss(&mut self, id: &str) -> bool {
        match self.entries.iter().position(|n| n.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns whether the read flag changed.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(entry) if !entry.read => {
                entry.read = true;
                true
            }
            _ => false,
        }
    }

    /// Returns how many entries changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for entry in self.entries.iter_mut().filter(|n| !n.read) {
            entry.read = true;
            changed += 1;
        }
        changed
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
