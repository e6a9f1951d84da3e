//! Property tests for the brooder engine: simulator bounds, threshold rules,
//! notification dedupe and the light state machine.

use brooder_monitor_lib::alerts::thresholds::{
    evaluate_humidity, evaluate_temperature, HUMIDITY_ALERT_TITLE, TEMPERATURE_ALERT_TITLE,
};
use brooder_monitor_lib::alerts::{NotificationStore, ThresholdConfig};
use brooder_monitor_lib::models::{Alert, LightMode, LightSchedule, LightState, LightStatus, NotificationKind, Reading};
use brooder_monitor_lib::sensing::SensorSimulator;
use chrono::Utc;
use proptest::prelude::*;

fn arb_reading() -> impl Strategy<Value = Reading> {
    (200u32..=400u32, 0u8..=100u8).prop_map(|(tenths, humidity)| Reading::new(f64::from(tenths) / 10.0, humidity))
}

proptest! {
    #[test]
    fn simulator_stays_in_bounds(seed in any::<u64>(), start in arb_reading()) {
        for reading in SensorSimulator::seeded(seed, start).take(2_000) {
            prop_assert!((20.0..=40.0).contains(&reading.temperature));
            prop_assert!(reading.humidity <= 100);
            // One decimal place.
            let tenths = reading.temperature * 10.0;
            prop_assert!((tenths - tenths.round()).abs() < 1e-9);
        }
    }

    /// Targets are arbitrary floats in the slider range, not just tenths.
    #[test]
    fn temperature_alert_iff_deviation_exceeds_three(
        temp_tenths in 200u32..=400u32,
        target in 20.0f64..=40.0f64,
    ) {
        let temperature = f64::from(temp_tenths) / 10.0;
        let deviation = temperature - target;
        let alert = evaluate_temperature(temperature, target, &ThresholdConfig::default());

        if deviation.abs() > 3.0 + 1e-6 {
            prop_assert!(alert.is_some(), "{temperature} vs {target} should fire");
        }
        if deviation.abs() <= 3.0 {
            prop_assert!(alert.is_none(), "{temperature} vs {target} should stay quiet");
        }
        if let Some(alert) = alert {
            prop_assert_eq!(alert.title, TEMPERATURE_ALERT_TITLE);
            let direction = if deviation > 0.0 { "above" } else { "below" };
            prop_assert!(alert.message.contains(direction));
        }
    }

    #[test]
    fn grid_targets_fire_strictly_past_three(
        temp_tenths in 200i64..=400i64,
        target_tenths in 200i64..=400i64,
    ) {
        let temperature = temp_tenths as f64 / 10.0;
        let target = target_tenths as f64 / 10.0;
        let alert = evaluate_temperature(temperature, target, &ThresholdConfig::default());
        prop_assert_eq!(alert.is_some(), (temp_tenths - target_tenths).abs() > 30);
    }

    #[test]
    fn humidity_alert_iff_outside_band(humidity in 0u8..=100u8) {
        let alert = evaluate_humidity(humidity, &ThresholdConfig::default());
        prop_assert_eq!(alert.is_some(), humidity > 75 || humidity < 45);
        if let Some(alert) = alert {
            prop_assert_eq!(alert.title, HUMIDITY_ALERT_TITLE);
            prop_assert_eq!(alert.kind, NotificationKind::Warning);
        }
    }

    /// Raising the same title repeatedly yields exactly one unread entry per
    /// title, however the raises and reads interleave.
    #[test]
    fn at_most_one_unread_per_title(ops in proptest::collection::vec((0usize..3, any::<bool>()), 1..60)) {
        let titles = ["A", "B", "C"];
        let mut store = NotificationStore::new();
        let now = Utc::now();

        for (index, read_first) in ops {
            if read_first {
                let unread: Vec<String> = store
                    .iter()
                    .filter(|n| !n.read && n.title == titles[index])
                    .map(|n| n.id.clone())
                    .collect();
                for id in unread {
                    store.mark_read(&id);
                }
            }
            store.raise(Alert::new(NotificationKind::Warning, titles[index], "m"), now);

            for title in titles {
                let unread = store.iter().filter(|n| !n.read && n.title == title).count();
                prop_assert!(unread <= 1);
            }
        }
    }

    #[test]
    fn toggle_never_changes_automatic(status in any::<bool>(), hour in 0u32..24) {
        let status = if status { LightStatus::On } else { LightStatus::Off };
        let automatic = LightState::new(status, LightMode::Automatic);
        prop_assert_eq!(automatic.toggled(), automatic);

        let entered = LightState::new(status, LightMode::Manual).mode_toggled(hour, &LightSchedule::default());
        let expected = if (6..20).contains(&hour) { LightStatus::On } else { LightStatus::Off };
        prop_assert_eq!(entered.status, expected);
        prop_assert_eq!(entered.mode, LightMode::Automatic);
    }
}
