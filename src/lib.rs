pub mod config;
pub mod error;
pub mod headless;
pub mod notification;
pub mod ui;

pub use error::{AppError, Result};
pub use notification::{Category, Notification, NotificationId, NotificationQueue};
