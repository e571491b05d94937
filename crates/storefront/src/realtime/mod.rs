//! Realtime change feed.
//!
//! Row triggers publish every change to `products` and `store_settings` on the
//! [`CHANGE_CHANNEL`] notification channel. A single background
//! [`listener`] task forwards those notifications into an in-process
//! [`ChangeFeed`], and every open page holds a [`Subscription`] filtered to
//! the table and event types it renders.
//!
//! Subscriptions live exactly as long as the page's event stream: dropping
//! the stream drops the subscription. Closing the feed at shutdown ends every
//! subscription so open streams do not hold the server up.

pub mod listener;

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use tehtehair_core::{ChangeEvent, ChangeKind, Table};

/// `LISTEN`/`NOTIFY` channel the triggers publish on.
pub const CHANGE_CHANNEL: &str = "table_changes";

/// Events buffered per subscriber before it is considered lagging.
const FEED_CAPACITY: usize = 64;

/// Which change kinds a subscription reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    /// Inserts, updates, and deletes.
    All,
    /// A single kind of change.
    Only(ChangeKind),
}

/// Table and event scope of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeFilter {
    pub table: Table,
    pub scope: EventScope,
}

impl ChangeFilter {
    /// Every change to the product catalog.
    pub const PRODUCTS: Self = Self {
        table: Table::Products,
        scope: EventScope::All,
    };

    /// Updates to the settings singleton.
    pub const SETTINGS_UPDATES: Self = Self {
        table: Table::StoreSettings,
        scope: EventScope::Only(ChangeKind::Update),
    };

    /// Whether the event is in scope.
    #[must_use]
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        if event.table != self.table {
            return false;
        }
        match self.scope {
            EventScope::All => true,
            EventScope::Only(kind) => event.kind == kind,
        }
    }
}

/// What a subscription hands to its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A matching change arrived.
    Changed(ChangeEvent),
    /// The subscriber fell behind and this many events were dropped. Some of
    /// them may have matched, so callers reload as if one had.
    Missed(u64),
}

/// Fan-out of database change events to open pages.
///
/// Cheaply cloneable; all clones share one channel.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
    closed: Arc<watch::Sender<bool>>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    /// Create a feed with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_CAPACITY);
        let (closed, _) = watch::channel(false);
        Self {
            sender,
            closed: Arc::new(closed),
        }
    }

    /// Deliver an event to every current subscriber.
    ///
    /// Returns how many subscribers received it. Publishing with nobody
    /// listening is not an error.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Open a subscription.
    #[must_use]
    pub fn subscribe(&self, filter: ChangeFilter) -> Subscription {
        Subscription {
            filter,
            receiver: self.sender.subscribe(),
            closed: self.closed.subscribe(),
        }
    }

    /// End every subscription, current and future.
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    /// Number of open subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A filtered view of the feed, released on drop.
#[derive(Debug)]
pub struct Subscription {
    filter: ChangeFilter,
    receiver: broadcast::Receiver<ChangeEvent>,
    closed: watch::Receiver<bool>,
}

impl Subscription {
    /// The filter this subscription was opened with.
    #[must_use]
    pub const fn filter(&self) -> ChangeFilter {
        self.filter
    }

    /// Wait for the next in-scope change.
    ///
    /// Returns `None` once the feed is closed or gone.
    pub async fn next(&mut self) -> Option<Signal> {
        loop {
            let closed = *self.closed.borrow_and_update();
            if closed {
                return None;
            }

            tokio::select! {
                changed = self.closed.changed() => {
                    if changed.is_err() {
                        return None;
                    }
                }
                received = self.receiver.recv() => match received {
                    Ok(event) if self.filter.matches(&event) => {
                        return Some(Signal::Changed(event));
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        return Some(Signal::Missed(missed));
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                },
            }
        }
    }
}
