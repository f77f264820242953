//! Logical lifecycle shared by users, properties and property requests.

use serde::{Deserialize, Serialize};

/// Whether a record is live or has been soft-deleted.
///
/// Records are never physically removed; deletion moves them to `Deleted`
/// and every default read excludes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordState {
    #[default]
    Active,
    Deleted,
}

impl RecordState {
    /// Map the persisted `is_deleted` column to a state
    pub fn from_deleted_flag(is_deleted: bool) -> Self {
        if is_deleted {
            RecordState::Deleted
        } else {
            RecordState::Active
        }
    }

    /// Value of the persisted `is_deleted` column
    pub fn is_deleted(&self) -> bool {
        matches!(self, RecordState::Deleted)
    }

    /// Whether default reads may return the record
    pub fn is_active(&self) -> bool {
        matches!(self, RecordState::Active)
    }
}
