use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::reading::{
    Reading, MAX_HUMIDITY_PCT, MAX_TEMPERATURE_C, MIN_HUMIDITY_PCT, MIN_TEMPERATURE_C,
};

/// Largest temperature change per tick, in degrees.
const TEMPERATURE_STEP_C: f64 = 1.0;
/// Largest humidity change per tick, in percentage points.
const HUMIDITY_STEP_PCT: f64 = 1.5;

/// Bounded random walk standing in for a real temperature/humidity sensor.
///
/// Iterating yields an endless stream of readings, each one a small
/// perturbation of the last. [`SensorSimulator::next_from`] continues the walk
/// from a reading that was replaced elsewhere (a session reset).
pub struct SensorSimulator<R = StdRng> {
    rng: R,
    current: Reading,
}

impl SensorSimulator<StdRng> {
    pub fn from_entropy(start: Reading) -> Self {
        Self::new(StdRng::from_entropy(), start)
    }

    pub fn seeded(seed: u64, start: Reading) -> Self {
        Self::new(StdRng::seed_from_u64(seed), start)
    }

    pub fn with_optional_seed(seed: Option<u64>, start: Reading) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed, start),
            None => Self::from_entropy(start),
        }
    }
}

impl<R: Rng> SensorSimulator<R> {
    pub fn new(rng: R, start: Reading) -> Self {
        Self {
            rng,
            current: start,
        }
    }

    pub fn next_from(&mut self, previous: Reading) -> Reading {
        let next = step(&previous, &mut self.rng);
        self.current = next;
        next
    }
}

impl<R: Rng> Iterator for SensorSimulator<R> {
    type Item = Reading;

    fn next(&mut self) -> Option<Reading> {
        let previous = self.current;
        Some(self.next_from(previous))
    }
}

/// One tick of the walk.
pub fn step<R: Rng>(previous: &Reading, rng: &mut R) -> Reading {
    let temperature_delta = rng.gen_range(-TEMPERATURE_STEP_C..TEMPERATURE_STEP_C);
    let humidity_delta = rng.gen_range(-HUMIDITY_STEP_PCT..HUMIDITY_STEP_PCT);

    Reading {
        temperature: next_temperature(previous.temperature, temperature_delta),
        humidity: next_humidity(previous.humidity, humidity_delta),
    }
}

fn next_temperature(previous: f64, delta: f64) -> f64 {
    let clamped = (previous + delta).clamp(MIN_TEMPERATURE_C, MAX_TEMPERATURE_C);
    (clamped * 10.0).round() / 10.0
}

fn next_humidity(previous: u8, delta: f64) -> u8 {
    let clamped = (f64::from(previous) + delta)
        .clamp(f64::from(MIN_HUMIDITY_PCT), f64::from(MAX_HUMIDITY_PCT));
    clamped.round() as u8
}
