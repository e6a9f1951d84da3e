use serde::{Deserialize, Serialize};

use crate::models::{Alert, NotificationKind, Reading};

pub const TEMPERATURE_ALERT_TITLE: &str = "Temperature Threshold Alert";
pub const HUMIDITY_ALERT_TITLE: &str = "Humidity Threshold Alert";

/// Slack on the tolerance comparison, far below the 0.1 °C reading resolution.
pub const DEVIATION_EPSILON: f64 = 1e-9;

/// Limits beyond which a reading raises a warning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Allowed distance from the target temperature, exclusive.
    pub temperature_tolerance: f64,
    /// Humidity below this raises a "too low" warning.
    pub humidity_low: u8,
    /// Humidity above this raises a "too high" warning.
    pub humidity_high: u8,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            temperature_tolerance: 3.0,
            humidity_low: 45,
            humidity_high: 75,
        }
    }
}

/// Both candidate alerts for one reading, before dedupe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub temperature: Option<Alert>,
    pub humidity: Option<Alert>,
}

impl Evaluation {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none()
    }

    pub fn into_alerts(self) -> impl Iterator<Item = Alert> {
        self.temperature.into_iter().chain(self.humidity)
    }
}

pub fn evaluate(reading: &Reading, target: f64, config: &ThresholdConfig) -> Evaluation {
    Evaluation {
        temperature: evaluate_temperature(reading.temperature, target, config),
        humidity: evaluate_humidity(reading.humidity, config),
    }
}

pub fn evaluate_temperature(temperature: f64, target: f64, config: &ThresholdConfig) -> Option<Alert> {
    let deviation = temperature - target;

    // Absorbs f64 noise such as 33.3 - 30.3 landing a hair above 3.0.
    if deviation.abs() <= config.temperature_tolerance + DEVIATION_EPSILON {
        return None;
    }

    let direction = if deviation > 0.0 { "above" } else { "below" };
    let magnitude = deviation.abs();

    Some(Alert::new(
        NotificationKind::Warning,
        TEMPERATURE_ALERT_TITLE,
        format!("Temperature is {direction} target by {magnitude:.1}°C"),
    ))
}

pub fn evaluate_humidity(humidity: u8, config: &ThresholdConfig) -> Option<Alert> {
    let label = if humidity > config.humidity_high {
        "too high"
    } else if humidity < config.humidity_low {
        "too low"
    } else {
        return None;
    };

    Some(Alert::new(
        NotificationKind::Warning,
        HUMIDITY_ALERT_TITLE,
        format!("Humidity is {label} at {humidity}%"),
    ))
}
