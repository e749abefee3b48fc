//! Document-scoped notification bus
//!
//! Carries `verticesUpdated` to every attached view. A view subscribes at
//! attach and drops its [`Subscription`] at teardown.

use tokio::sync::broadcast;
use tracing::warn;

use artview_model::VerticesUpdated;

const DEFAULT_CAPACITY: usize = 64;

/// Broadcast bus for graph-store notifications
#[derive(Debug, Clone)]
pub struct DocumentBus {
    sender: broadcast::Sender<VerticesUpdated>,
}

impl DocumentBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to every live subscription, returning how many received it
    pub fn publish(&self, update: VerticesUpdated) -> usize {
        self.sender.send(update).unwrap_or(0)
    }

    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    #[inline]
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for DocumentBus {
    fn default() -> Self {
        Self::new()
    }
}

/// One view's registration on the bus
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<VerticesUpdated>,
}

impl Subscription {
    /// Next pending notification without waiting
    ///
    /// Lagged notifications are skipped with a warning.
    pub fn try_next(&mut self) -> Option<VerticesUpdated> {
        loop {
            match self.receiver.try_recv() {
                Ok(update) => return Some(update),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "vertex notifications dropped");
                }
                Err(_) => return None,
            }
        }
    }

    /// Wait for the next notification; `None` once the bus is gone
    pub async fn next(&mut self) -> Option<VerticesUpdated> {
        loop {
            match self.receiver.recv().await {
                Ok(update) => return Some(update),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "vertex notifications dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artview_model::{VertexId, VertexProperties, VertexUpdate};

    fn update(id: &str) -> VerticesUpdated {
        VerticesUpdated {
            vertices: vec![VertexUpdate {
                id: VertexId::new(id),
                properties: VertexProperties::new(),
            }],
        }
    }

    #[test]
    fn subscription_is_counted_until_dropped() {
        let bus = DocumentBus::new();
        let sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(update("v1")), 0);
    }

    #[test]
    fn try_next_drains_in_order() {
        let bus = DocumentBus::new();
        let mut sub = bus.subscribe();
        bus.publish(update("a"));
        bus.publish(update("b"));

        assert_eq!(sub.try_next().unwrap().vertices[0].id.as_str(), "a");
        assert_eq!(sub.try_next().unwrap().vertices[0].id.as_str(), "b");
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn lagged_subscription_keeps_latest() {
        let bus = DocumentBus::with_capacity(1);
        let mut sub = bus.subscribe();
        bus.publish(update("old"));
        bus.publish(update("new"));

        assert_eq!(sub.try_next().unwrap().vertices[0].id.as_str(), "new");
    }

    #[tokio::test]
    async fn next_waits_for_publish_and_ends_with_bus() {
        let bus = DocumentBus::new();
        let mut sub = bus.subscribe();

        let publisher = bus.clone();
        let handle = tokio::spawn(async move {
            publisher.publish(update("later"));
        });
        assert_eq!(sub.next().await.unwrap().vertices[0].id.as_str(), "later");
        handle.await.unwrap();

        drop(bus);
        assert!(sub.next().await.is_none());
    }
}
