//! Change notification
//!
//! A synchronous multicast channel: every container mutation delivers the
//! changed property name to every subscriber before the write call returns.
//! Delivery iterates a snapshot of the subscriber list, so handlers are free
//! to subscribe, unsubscribe, or mutate the container from inside their own
//! invocation.

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Handle identifying one subscription
///
/// Ids are allocated from a monotonically increasing counter and never
/// reused, so a stale handle can never detach someone else's handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

struct Subscriber {
    id: u64,
    handler: ChangeHandler,
}

/// Multicast change-event channel
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl ChangeNotifier {
    /// Create a notifier with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Add a handler, returning the handle that detaches it
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().push(Subscriber {
            id,
            handler: Arc::new(handler),
        });
        SubscriptionId(id)
    }

    /// Remove a previously subscribed handler
    ///
    /// Returns `true` when the handle was live. Removal does not affect a
    /// delivery already in progress, which runs on its own snapshot.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id.0);
        subscribers.len() != before
    }

    /// Deliver a change for `name` to every current subscriber
    ///
    /// Handlers run synchronously, in subscription order, to completion
    /// before this returns. The subscriber list is snapshotted up front and
    /// no lock is held while handlers run, so a handler may re-enter the
    /// notifier or the container. There is no recursion guard: a handler
    /// that unconditionally re-triggers the same name recurses without
    /// bound.
    pub fn notify(&self, name: &str) {
        let snapshot: Vec<ChangeHandler> = {
            let subscribers = self.subscribers.read();
            subscribers.iter().map(|s| s.handler.clone()).collect()
        };
        for handler in snapshot {
            handler(name);
        }
    }

    /// Number of current subscribers
    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Check whether no handlers are subscribed
    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.len())
            .finish()
    }
}
