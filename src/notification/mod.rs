//! Ephemeral toast notifications.
//!
//! A [`NotificationQueue`] holds the live toasts in insertion order. Each
//! toast removes itself when its lifetime elapses unless it was dismissed
//! first; removal of an id that is already gone is a no-op.
//!
//! # Example
//!
//! ```ignore
//! use portal_toast::notification::NotificationQueue;
//!
//! let queue = NotificationQueue::current()?;
//! let id = queue.notify_success("Declaration saved", None);
//! // user clicked close before the 4s timer
//! queue.dismiss(id);
//! ```

mod queue;
mod types;

pub use queue::NotificationQueue;
pub use types::{Category, Notification, NotificationId};
