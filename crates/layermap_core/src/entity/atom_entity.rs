//! Row shape of the `atoms` table plus its tag links.

use crate::entity::tag_entity::TagEntity;

/// Stored atom row.
///
/// Enum-like columns stay as text and `is_deleted` stays as the stored
/// integer, so rows that no longer decode can still be loaded and inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomEntity {
    pub uuid: String,
    /// `note`, `task` or `event`.
    pub kind: String,
    pub content: String,
    /// `todo`, `in_progress`, `done` or `cancelled`.
    pub task_status: Option<String>,
    pub event_start: Option<i64>,
    pub event_end: Option<i64>,
    pub hlc_timestamp: Option<String>,
    /// `0` or `1`.
    pub is_deleted: i64,
    /// Linked rows from `atom_tags`.
    pub tags: Vec<TagEntity>,
}
