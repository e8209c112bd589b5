// Change feed: admin writes are published here so open listings can refresh

use log::{debug, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use ts_rs::TS;

use crate::config::app::CHANGE_FEED_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ContentCollection {
    Videos,
    News,
    Events,
    Opinions,
    Hero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContentChange {
    pub collection: ContentCollection,
    pub id: String,
    pub kind: ChangeKind,
}

impl ContentChange {
    pub fn new(collection: ContentCollection, id: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            collection,
            id: id.into(),
            kind,
        }
    }
}

/// Fan-out of content changes to every live subscriber.
///
/// Slow subscribers lose the oldest changes once `capacity` is exceeded;
/// they are told how many through a log line and keep receiving.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ContentChange>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Raw receiver for every collection
    pub fn subscribe(&self) -> broadcast::Receiver<ContentChange> {
        self.tx.subscribe()
    }

    /// Receiver limited to one collection. Dropping it unsubscribes.
    pub fn watch(&self, collection: ContentCollection) -> Subscription {
        Subscription {
            collection,
            rx: self.tx.subscribe(),
        }
    }

    /// Returns how many subscribers saw the change. Zero is not an error.
    pub fn publish(&self, change: ContentChange) -> usize {
        debug!(
            "Publishing {:?} {:?}/{}",
            change.kind, change.collection, change.id
        );
        self.tx.send(change).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(CHANGE_FEED_CAPACITY)
    }
}

pub struct Subscription {
    collection: ContentCollection,
    rx: broadcast::Receiver<ContentChange>,
}

impl Subscription {
    pub fn collection(&self) -> ContentCollection {
        self.collection
    }

    /// Next change for this collection; `None` once the feed is gone.
    pub async fn recv(&mut self) -> Option<ContentChange> {
        loop {
            match self.rx.recv().await {
                Ok(change) if change.collection == self.collection => return Some(change),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        "{:?} subscriber lagged, {} changes skipped",
                        self.collection, skipped
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`Subscription::recv`]
    pub fn try_recv(&mut self) -> Option<ContentChange> {
        loop {
            match self.rx.try_recv() {
                Ok(change) if change.collection == self.collection => return Some(change),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(
                        "{:?} subscriber lagged, {} changes skipped",
                        self.collection, skipped
                    );
                }
                Err(_) => return None,
            }
        }
    }
}
