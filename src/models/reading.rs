use serde::{Deserialize, Serialize};

pub const MIN_TEMPERATURE_C: f64 = 20.0;
pub const MAX_TEMPERATURE_C: f64 = 40.0;
pub const MIN_HUMIDITY_PCT: u8 = 0;
pub const MAX_HUMIDITY_PCT: u8 = 100;

/// Band around the target inside which the temperature reads as normal.
const TEMPERATURE_STATUS_BAND_C: f64 = 2.0;
const HUMIDITY_STATUS_LOW_PCT: u8 = 50;
const HUMIDITY_STATUS_HIGH_PCT: u8 = 70;

/// One simulated sample of the brooder environment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Degrees Celsius, one decimal place.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
}

impl Reading {
    pub fn new(temperature: f64, humidity: u8) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            humidity: 60,
        }
    }
}

/// Label shown next to a live value on the monitoring view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReadingStatus {
    Low,
    Normal,
    High,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Low => "Low",
            ReadingStatus::Normal => "Normal",
            ReadingStatus::High => "High",
        }
    }
}

pub fn temperature_status(temperature: f64, target: f64) -> ReadingStatus {
    if temperature > target + TEMPERATURE_STATUS_BAND_C {
        ReadingStatus::High
    } else if temperature < target - TEMPERATURE_STATUS_BAND_C {
        ReadingStatus::Low
    } else {
        ReadingStatus::Normal
    }
}

pub fn humidity_status(humidity: u8) -> ReadingStatus {
    if humidity > HUMIDITY_STATUS_HIGH_PCT {
        ReadingStatus::High
    } else if humidity < HUMIDITY_STATUS_LOW_PCT {
        ReadingStatus::Low
    } else {
        ReadingStatus::Normal
    }
}

/// Clamp a user-supplied target into the range the slider allows.
/// Returns `None` for NaN or infinities.
pub fn clamp_target_temperature(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(MIN_TEMPERATURE_C, MAX_TEMPERATURE_C))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_status_uses_two_degree_band() {
        assert_eq!(temperature_status(32.0, 30.0), ReadingStatus::Normal);
        assert_eq!(temperature_status(32.1, 30.0), ReadingStatus::High);
        assert_eq!(temperature_status(28.0, 30.0), ReadingStatus::Normal);
        assert_eq!(temperature_status(27.9, 30.0), ReadingStatus::Low);
    }

    #[test]
    fn humidity_status_bands() {
        assert_eq!(humidity_status(50), ReadingStatus::Normal);
        assert_eq!(humidity_status(70), ReadingStatus::Normal);
        assert_eq!(humidity_status(71), ReadingStatus::High);
        assert_eq!(humidity_status(49), ReadingStatus::Low);
    }

    #[test]
    fn target_is_clamped_and_non_finite_rejected() {
        assert_eq!(clamp_target_temperature(45.0), Some(40.0));
        assert_eq!(clamp_target_temperature(12.5), Some(20.0));
        assert_eq!(clamp_target_temperature(31.5), Some(31.5));
        assert_eq!(clamp_target_temperature(f64::NAN), None);
        assert_eq!(clamp_target_temperature(f64::INFINITY), None);
    }
}
