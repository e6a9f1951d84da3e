#[cfg(feature = "app")]
pub mod commands;
pub mod controller;
pub mod events;
pub mod ports;
pub mod session;

pub use controller::BrooderController;
pub use events::BrooderEvent;
pub use ports::{Clock, EventSink, LogSink, SystemClock};
pub use session::{Session, SessionSnapshot};
