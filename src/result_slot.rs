//! ResultSlot - Latest Classification Result
//!
//! ## Responsibilities
//!
//! - Hold at most one pending classification result
//! - Overwrite on publish (most recent result only, never a backlog)
//! - Drain on consume, exactly one consumer wins a given value

use crate::models::ClassificationResult;
use std::sync::Mutex;

/// One-capacity latest-wins slot between the classification worker
/// and the polling endpoint.
#[derive(Default)]
pub struct ResultSlot {
    slot: Mutex<Option<ClassificationResult>>,
}

impl ResultSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result, discarding any unconsumed previous one.
    /// Never blocks beyond the internal lock.
    pub fn publish(&self, result: ClassificationResult) {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.is_some() {
            tracing::trace!("Discarding unconsumed classification result");
        }
        *slot = Some(result);
    }

    /// Take the pending result, if any, emptying the slot.
    /// Repeated calls on an empty slot keep returning `None`.
    pub fn try_consume(&self) -> Option<ClassificationResult> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LabelScore;
    use std::sync::Arc;

    fn result(fruit: &str) -> ClassificationResult {
        ClassificationResult::new(
            LabelScore::new(fruit, 0.9),
            LabelScore::new("fresh", 0.9),
            "info",
        )
    }

    #[test]
    fn test_empty_slot_returns_none_repeatedly() {
        let slot = ResultSlot::new();
        assert!(slot.try_consume().is_none());
        assert!(slot.try_consume().is_none());
    }

    #[test]
    fn test_consume_drains_slot() {
        let slot = ResultSlot::new();
        slot.publish(result("apple"));

        assert_eq!(slot.try_consume().unwrap().fruit.label, "apple");
        assert!(slot.try_consume().is_none());
    }

    #[test]
    fn test_publish_overwrites_unconsumed_value() {
        let slot = ResultSlot::new();
        slot.publish(result("apple"));
        slot.publish(result("banana"));

        let consumed = slot.try_consume().unwrap();
        assert_eq!(consumed.fruit.label, "banana");
        assert!(slot.try_consume().is_none());
    }

    #[test]
    fn test_exactly_one_consumer_wins() {
        let slot = Arc::new(ResultSlot::new());
        slot.publish(result("mango"));

        let mut wins = 0;
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let slot = Arc::clone(&slot);
                    scope.spawn(move || slot.try_consume().is_some())
                })
                .collect();
            for handle in handles {
                if handle.join().unwrap() {
                    wins += 1;
                }
            }
        });

        assert_eq!(wins, 1);
    }
}
