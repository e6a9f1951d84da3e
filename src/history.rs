use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Reading;

/// One hour of 3-second ticks.
pub const DEFAULT_RECENT_CAPACITY: usize = 60 * 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub at: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: u8,
    pub target: f64,
}

impl Sample {
    pub fn new(at: DateTime<Utc>, reading: &Reading, target: f64) -> Self {
        Self {
            at,
            temperature: reading.temperature,
            humidity: reading.humidity,
            target,
        }
    }
}

/// A point on the weekly trend chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAverage {
    pub week: String,
    pub avg_temp: f64,
    pub avg_humidity: u8,
    pub target_temp: f64,
}

#[derive(Debug, Clone, Default)]
struct WeekAccumulator {
    temperature_sum: f64,
    humidity_sum: u64,
    count: u64,
    last_target: f64,
}

impl WeekAccumulator {
    fn add(&mut self, sample: &Sample) {
        self.temperature_sum += sample.temperature;
        self.humidity_sum += u64::from(sample.humidity);
        self.count += 1;
        self.last_target = sample.target;
    }

    fn average(&self, week: i64) -> WeeklyAverage {
        let count = self.count as f64;
        WeeklyAverage {
            week: format!("Week {week}"),
            avg_temp: (self.temperature_sum / count * 10.0).round() / 10.0,
            avg_humidity: (self.humidity_sum as f64 / count).round() as u8,
            target_temp: self.last_target,
        }
    }
}

/// Samples for one brooder session.
///
/// Raw samples are kept only in a short bounded buffer for the recent
/// readings chart. Every sample is also folded into its brooder week, so the
/// weekly trend covers the whole session however long it runs.
#[derive(Debug, Clone)]
pub struct ReadingHistory {
    started_at: DateTime<Utc>,
    recent: VecDeque<Sample>,
    capacity: usize,
    weeks: BTreeMap<i64, WeekAccumulator>,
}

impl ReadingHistory {
    pub fn new(started_at: DateTime<Utc>, capacity: usize) -> Self {
        Self {
            started_at,
            recent: VecDeque::new(),
            capacity: capacity.max(1),
            weeks: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, sample: Sample) {
        // Days 0-6 after the start are week 1.
        let days = sample
            .at
            .signed_duration_since(self.started_at)
            .num_days()
            .max(0);
        self.weeks.entry(days / 7 + 1).or_default().add(&sample);

        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(sample);
    }

    /// Raw samples still in the recent buffer.
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent `count` samples, oldest first.
    pub fn latest(&self, count: usize) -> Vec<Sample> {
        let skip = self.recent.len().saturating_sub(count);
        self.recent.iter().skip(skip).copied().collect()
    }

    pub fn weekly_trend(&self) -> Vec<WeeklyAverage> {
        self.weeks
            .iter()
            .map(|(week, acc)| acc.average(*week))
            .collect()
    }
}
