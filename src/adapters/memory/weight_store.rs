//! Lock-guarded weight vector.

use std::sync::{PoisonError, RwLock};

use crate::domain::models::WeightVector;
use crate::domain::ports::WeightRepository;

/// Weight vector behind a single `RwLock`.
///
/// Snapshots copy the vector out under the read lock; modifications run
/// entirely under the write lock.
#[derive(Debug, Default)]
pub struct InMemoryWeightRepository {
    weights: RwLock<WeightVector>,
}

impl InMemoryWeightRepository {
    pub const fn new(initial: WeightVector) -> Self {
        Self {
            weights: RwLock::new(initial),
        }
    }
}

impl WeightRepository for InMemoryWeightRepository {
    fn snapshot(&self) -> WeightVector {
        // WeightVector is plain data, so a poisoned lock still holds a usable value
        *self.weights.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn modify(&self, apply: &mut dyn FnMut(WeightVector) -> WeightVector) -> WeightVector {
        let mut guard = self.weights.write().unwrap_or_else(PoisonError::into_inner);
        *guard = apply(*guard);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_snapshot_returns_initial_weights() {
        let initial = WeightVector::new(0.4, 0.3, 0.2, 0.1);
        let repo = InMemoryWeightRepository::new(initial);
        assert_eq!(repo.snapshot(), initial);
    }

    #[test]
    fn test_modify_returns_and_stores_new_value() {
        let repo = InMemoryWeightRepository::default();
        let updated = repo.modify(&mut |mut w| {
            w.effort = 0.0;
            w
        });
        assert_eq!(updated.effort, 0.0);
        assert_eq!(repo.snapshot(), updated);
    }

    #[test]
    fn test_concurrent_modifications_are_not_lost() {
        let repo = Arc::new(InMemoryWeightRepository::new(WeightVector::uniform(0.0)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    for _ in 0..100 {
                        repo.modify(&mut |mut w| {
                            w.graph += 1.0;
                            w
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.snapshot().graph, 800.0);
    }
}
