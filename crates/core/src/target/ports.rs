//! Port interfaces for target storage

use fieldpulse_domain::{Result, Target};

/// Trait for persisting targets
pub trait TargetRepository: Send + Sync {
    /// Fetch a target by id
    fn get_target(&self, target_id: &str) -> Result<Option<Target>>;

    /// Store `target` unless its id is taken; returns the stored target either
    /// way. Must be atomic with respect to concurrent callers.
    fn insert_target_if_absent(&self, target: Target) -> Result<Target>;

    /// Overwrite an existing target
    fn save_target(&self, target: &Target) -> Result<()>;

    /// Every target of `owner_id`, active or not, in any order
    fn targets_for_owner(&self, owner_id: &str) -> Result<Vec<Target>>;
}
