use crate::domain::models::ComponentScores;

/// Port remembering the component profile of recently suggested tasks
///
/// Feedback only carries task IDs; the ledger lets the feedback adapter
/// recover what those tasks looked like when they were suggested. IDs are
/// only unique within a batch, so a later suggestion with the same ID
/// replaces the earlier profile.
pub trait SuggestionLedger: Send + Sync {
    /// Remember the profile shown for `task_id`
    fn record(&self, task_id: &str, profile: ComponentScores);

    /// Profiles for the known IDs among `task_ids`, in input order
    fn lookup(&self, task_ids: &[String]) -> Vec<ComponentScores>;
}
