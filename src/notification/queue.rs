//! Timed toast queue.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::Local;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, trace};

use super::types::{Category, Notification, NotificationId};
use crate::config::NotificationConfig;
use crate::error::{AppError, Result};

/// Queue contents plus the expiry timer of every live entry.
struct State {
    entries: Vec<Notification>,
    timers: HashMap<NotificationId, AbortHandle>,
    next_id: u64,
    /// Lossless change streams handed out by `changes()`.
    streams: Vec<mpsc::UnboundedSender<Vec<Notification>>>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            timers: HashMap::new(),
            next_id: 1,
            streams: Vec::new(),
        }
    }
}

impl Drop for State {
    fn drop(&mut self) {
        for timer in self.timers.values() {
            timer.abort();
        }
    }
}

struct Shared {
    state: Mutex<State>,
    default_lifetime: Duration,
    handle: Handle,
    changes: watch::Sender<Vec<Notification>>,
}

/// Why an entry left the queue.
#[derive(Debug, Clone, Copy)]
enum Removal {
    Dismissed,
    Expired,
}

/// Ordered set of live toasts, oldest first.
///
/// Clones share the same queue. Every operation takes the lock for its whole
/// mutation, so readers never see a half-applied change.
#[derive(Clone)]
pub struct NotificationQueue {
    shared: Arc<Shared>,
}

impl NotificationQueue {
    /// Create a queue whose expiry timers run on `handle`.
    pub fn new(handle: Handle) -> Self {
        Self::with_config(handle, &NotificationConfig::default())
    }

    /// Create a queue using the configured default lifetime.
    pub fn with_config(handle: Handle, config: &NotificationConfig) -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                default_lifetime: config.default_lifetime(),
                handle,
                changes,
            }),
        }
    }

    /// Create a queue on the runtime of the calling context.
    pub fn current() -> Result<Self> {
        let handle = Handle::try_current().map_err(|e| AppError::runtime(e.to_string()))?;
        Ok(Self::new(handle))
    }

    /// Lifetime applied when `enqueue` is given none.
    pub fn default_lifetime(&self) -> Duration {
        self.shared.default_lifetime
    }

    /// Append a toast and schedule its expiry.
    ///
    /// The returned id can be passed to [`dismiss`](Self::dismiss) to close the
    /// toast early. A zero lifetime expires on the next scheduler tick.
    pub fn enqueue(
        &self,
        message: impl Into<String>,
        category: Option<Category>,
        lifetime: Option<Duration>,
    ) -> NotificationId {
        let message = message.into();
        let lifetime = lifetime.unwrap_or(self.shared.default_lifetime);

        // Id and timestamp are taken under the lock so queue order matches id order.
        let mut state = self.lock();
        let id = NotificationId(state.next_id);
        state.next_id += 1;
        let notification = Notification {
            id,
            message,
            category: category.unwrap_or_default(),
            lifetime,
            created_at: Local::now(),
        };
        debug!(%id, category = %notification.category, ?lifetime, "Toast enqueued");
        state.entries.push(notification);

        // Timer holds a weak ref so a dropped queue lets it finish as a no-op.
        let queue = Arc::downgrade(&self.shared);
        let timer = self.shared.handle.spawn(expire_after(queue, id, lifetime));
        state.timers.insert(id, timer.abort_handle());

        self.publish(&mut state);
        id
    }

    /// Remove a toast and cancel its timer. Unknown ids are ignored.
    pub fn dismiss(&self, id: NotificationId) {
        self.remove(id, Removal::Dismissed);
    }

    /// Current toasts, oldest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().entries.clone()
    }

    /// Remove every toast and cancel all pending timers.
    pub fn clear(&self) {
        let mut state = self.lock();
        if state.entries.is_empty() {
            return;
        }
        for (_, timer) in state.timers.drain() {
            timer.abort();
        }
        let count = state.entries.len();
        state.entries.clear();
        debug!(count, "Toasts cleared");
        self.publish(&mut state);
    }

    /// Number of live toasts.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// True when no toast is live.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Watch the queue. The receiver sees the latest snapshot; changes made
    /// between two reads are coalesced.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.shared.changes.subscribe()
    }

    /// Stream of every snapshot the queue publishes from now on, in order.
    ///
    /// Unlike [`subscribe`](Self::subscribe) nothing is coalesced. The stream
    /// ends when the queue is dropped.
    pub fn changes(&self) -> mpsc::UnboundedReceiver<Vec<Notification>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().streams.push(tx);
        rx
    }

    /// Enqueue an `info` toast.
    pub fn notify_info(&self, message: impl Into<String>, lifetime: Option<Duration>) -> NotificationId {
        self.enqueue(message, Some(Category::Info), lifetime)
    }

    /// Enqueue a `success` toast.
    pub fn notify_success(&self, message: impl Into<String>, lifetime: Option<Duration>) -> NotificationId {
        self.enqueue(message, Some(Category::Success), lifetime)
    }

    /// Enqueue a `warning` toast.
    pub fn notify_warning(&self, message: impl Into<String>, lifetime: Option<Duration>) -> NotificationId {
        self.enqueue(message, Some(Category::Warning), lifetime)
    }

    /// Enqueue an `error` toast.
    pub fn notify_error(&self, message: impl Into<String>, lifetime: Option<Duration>) -> NotificationId {
        self.enqueue(message, Some(Category::Error), lifetime)
    }

    fn remove(&self, id: NotificationId, reason: Removal) {
        let mut state = self.lock();
        let Some(pos) = state.entries.iter().position(|n| n.id == id) else {
            trace!(%id, ?reason, "Toast already gone");
            return;
        };
        state.entries.remove(pos);

        if let Some(timer) = state.timers.remove(&id) {
            // An expiring timer is the running task; only cancel on dismiss.
            if matches!(reason, Removal::Dismissed) {
                timer.abort();
            }
        }
        debug!(%id, ?reason, "Toast removed");
        self.publish(&mut state);
    }

    fn publish(&self, state: &mut State) {
        let snapshot = state.entries.clone();
        state.streams.retain(|tx| tx.send(snapshot.clone()).is_ok());
        self.shared.changes.send_replace(snapshot);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State is consistent after every statement, so a poisoned lock is safe to reuse.
        self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn expire_after(queue: Weak<Shared>, id: NotificationId, lifetime: Duration) {
    tokio::time::sleep(lifetime).await;
    if let Some(shared) = queue.upgrade() {
        NotificationQueue { shared }.remove(id, Removal::Expired);
    }
}

impl std::fmt::Debug for NotificationQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationQueue")
            .field("len", &self.len())
            .field("default_lifetime", &self.shared.default_lifetime)
            .finish()
    }
}
