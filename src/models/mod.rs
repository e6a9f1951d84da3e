pub mod light;
pub mod notification;
pub mod reading;

pub use light::{LightMode, LightSchedule, LightState, LightStatus};
pub use notification::{Alert, Notification, NotificationKind, NotificationView};
pub use reading::{Reading, ReadingStatus};
