use crate::domain::models::WeightVector;

/// Port for the shared scoring-weight vector
///
/// Readers take a consistent copy; writers apply a read-modify-write
/// transition as one step, so a concurrent reader never observes a
/// partially updated vector.
///
/// # Examples
///
/// ```no_run
/// use triage::domain::ports::WeightRepository;
///
/// fn boost_urgency(repo: &dyn WeightRepository) {
///     repo.modify(&mut |mut w| {
///         w.urgency += 0.05;
///         w.normalized()
///     });
/// }
/// ```
pub trait WeightRepository: Send + Sync {
    /// Current weights
    fn snapshot(&self) -> WeightVector;

    /// Replace the weights with `apply(current)` and return the new value
    fn modify(&self, apply: &mut dyn FnMut(WeightVector) -> WeightVector) -> WeightVector;
}
