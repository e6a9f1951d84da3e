use serde::{Deserialize, Serialize};

use super::notification::{Alert, NotificationKind};

pub const LIGHT_MODE_CHANGED_TITLE: &str = "Light Mode Changed";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LightStatus {
    On,
    Off,
}

impl LightStatus {
    pub fn flipped(self) -> Self {
        match self {
            LightStatus::On => LightStatus::Off,
            LightStatus::Off => LightStatus::On,
        }
    }
}

impl Default for LightStatus {
    fn default() -> Self {
        LightStatus::Off
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LightMode {
    Manual,
    Automatic,
}

impl LightMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightMode::Manual => "manual",
            LightMode::Automatic => "automatic",
        }
    }
}

impl Default for LightMode {
    fn default() -> Self {
        LightMode::Manual
    }
}

/// Local hours during which automatic mode keeps the lamp on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LightSchedule {
    /// First hour (0-23) the lamp is on.
    pub on_hour: u32,
    /// First hour (0-23) the lamp is off again.
    pub off_hour: u32,
}

impl Default for LightSchedule {
    fn default() -> Self {
        Self {
            on_hour: 6,
            off_hour: 20,
        }
    }
}

impl LightSchedule {
    pub fn is_on_at(&self, hour: u32) -> bool {
        if self.on_hour <= self.off_hour {
            hour >= self.on_hour && hour < self.off_hour
        } else {
            // Window wraps past midnight.
            hour >= self.on_hour || hour < self.off_hour
        }
    }

    pub fn status_at(&self, hour: u32) -> LightStatus {
        if self.is_on_at(hour) {
            LightStatus::On
        } else {
            LightStatus::Off
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LightState {
    pub status: LightStatus,
    pub mode: LightMode,
}

impl LightState {
    pub fn new(status: LightStatus, mode: LightMode) -> Self {
        Self { status, mode }
    }

    /// Flip the lamp. Only manual mode lets the user do this.
    pub fn toggled(self) -> Self {
        match self.mode {
            LightMode::Manual => Self {
                status: self.status.flipped(),
                ..self
            },
            LightMode::Automatic => self,
        }
    }

    /// Switch between manual and automatic. Entering automatic recomputes the
    /// status for `hour`; entering manual keeps whatever automatic last chose.
    ///
    /// The status is not re-derived again until the next mode change, so a
    /// lamp left in automatic across 06:00 or 20:00 keeps its old status.
    pub fn mode_toggled(self, hour: u32, schedule: &LightSchedule) -> Self {
        match self.mode {
            LightMode::Manual => Self {
                status: schedule.status_at(hour),
                mode: LightMode::Automatic,
            },
            LightMode::Automatic => Self {
                mode: LightMode::Manual,
                ..self
            },
        }
    }
}

pub fn mode_changed_alert(mode: LightMode) -> Alert {
    Alert::new(
        NotificationKind::Info,
        LIGHT_MODE_CHANGED_TITLE,
        format!("Light control switched to {} mode", mode.as_str()),
    )
}
