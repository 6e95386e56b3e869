//! Row shape of the `tags` table.

/// Stored tag row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagEntity {
    /// Row id. `None` until the tag has been inserted.
    pub id: Option<i64>,
    pub name: String,
}

impl TagEntity {
    pub fn unsaved(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}
