// Generation-guarded result slot for overlapping refreshes
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Identifies one fetch. Later fetches get strictly larger generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// Holds the newest published value. A result whose fetch started before the
/// currently published one is discarded, whatever order the fetches finish in.
#[derive(Debug)]
pub struct Sequenced<T> {
    next: AtomicU64,
    current: RwLock<Option<(Generation, T)>>,
}

impl<T: Clone> Sequenced<T> {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
            current: RwLock::new(None),
        }
    }

    /// Call when a fetch starts.
    pub fn issue(&self) -> Generation {
        Generation(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// Stores `value` unless something newer is already published.
    pub async fn publish(&self, generation: Generation, value: T) -> bool {
        let mut current = self.current.write().await;
        if let Some((published, _)) = current.as_ref() {
            if *published >= generation {
                tracing::debug!(
                    "Discarding stale result {:?}, {:?} already published",
                    generation,
                    published
                );
                return false;
            }
        }
        *current = Some((generation, value));
        true
    }

    pub async fn snapshot(&self) -> Option<(Generation, T)> {
        self.current.read().await.clone()
    }
}

impl<T: Clone> Default for Sequenced<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_in_order() {
        let slot = Sequenced::new();
        assert_eq!(slot.snapshot().await, None);

        let first = slot.issue();
        assert!(slot.publish(first, "a").await);
        let second = slot.issue();
        assert!(slot.publish(second, "b").await);

        assert_eq!(slot.snapshot().await, Some((second, "b")));
    }

    #[tokio::test]
    async fn test_stale_result_is_discarded() {
        let slot = Sequenced::new();
        let slow = slot.issue();
        let fast = slot.issue();
        assert!(fast > slow);

        assert!(slot.publish(fast, 2).await);
        assert!(!slot.publish(slow, 1).await);
        assert_eq!(slot.snapshot().await, Some((fast, 2)));
    }

    #[tokio::test]
    async fn test_same_generation_published_once() {
        let slot = Sequenced::new();
        let generation = slot.issue();
        assert!(slot.publish(generation, 1).await);
        assert!(!slot.publish(generation, 2).await);
        assert_eq!(slot.snapshot().await, Some((generation, 1)));
    }
}
