pub mod store;
pub mod thresholds;

pub use store::NotificationStore;
pub use thresholds::{evaluate, Evaluation, ThresholdConfig};
