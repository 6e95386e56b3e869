//! Atom domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by note/task/event projections.
//! - Provide lifecycle helpers for soft-delete semantics.
//! - Validate cross-field rules before persistence.
//!
//! # Invariants
//! - `uuid` is stable, non-nil and never reused for another atom.
//! - `is_deleted` is the source of truth for tombstone state.
//! - `event_end` must not be earlier than `event_start` when both are set.
//! - `task_status` is only meaningful for `AtomType::Task`.

use crate::model::tag::Tag;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every atom.
pub type AtomId = Uuid;

/// Unified category for all Atom projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtomType {
    /// Free-form markdown note.
    Note,
    /// Actionable task with status metadata.
    Task,
    /// Calendar event with optional start/end time.
    Event,
}

impl AtomType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Task => "task",
            Self::Event => "event",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "note" => Some(Self::Note),
            "task" => Some(Self::Task),
            "event" => Some(Self::Event),
            _ => None,
        }
    }
}

impl Display for AtomType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task lifecycle state for `AtomType::Task`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Domain validation failures for [`Atom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomValidationError {
    /// The nil uuid is reserved and never identifies an atom.
    NilUuid,
    /// `event_end` is earlier than `event_start`.
    InvalidEventWindow { start: i64, end: i64 },
    /// `task_status` is set on an atom that is not a task.
    TaskStatusOnNonTask(AtomType),
}

impl Display for AtomValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "atom uuid must not be nil"),
            Self::InvalidEventWindow { start, end } => {
                write!(f, "event_end ({end}) must be >= event_start ({start})")
            }
            Self::TaskStatusOnNonTask(kind) => {
                write!(f, "task_status is only allowed on task atoms, got `{kind}`")
            }
        }
    }
}

impl Error for AtomValidationError {}

/// Canonical domain record for note/task/event data.
///
/// `tags` is a relation field. It is never filled by entity conversion; the
/// service layer assembles it per use case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub uuid: AtomId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: AtomType,
    pub content: String,
    /// Meaningful only when `kind == AtomType::Task`.
    pub task_status: Option<TaskStatus>,
    /// Unix epoch milliseconds.
    pub event_start: Option<i64>,
    /// Unix epoch milliseconds. Must be >= `event_start` when both are set.
    pub event_end: Option<i64>,
    /// Reserved for future CRDT/HLC merge strategy.
    pub hlc_timestamp: Option<String>,
    /// Soft delete tombstone.
    pub is_deleted: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Atom {
    /// Creates a new atom with a generated stable ID.
    ///
    /// Optional projection fields start as `None`, `is_deleted` as `false`
    /// and `tags` empty.
    pub fn new(kind: AtomType, content: impl Into<String>) -> Self {
        Self::build(Uuid::new_v4(), kind, content.into())
    }

    /// Creates a new atom with a caller-provided stable ID.
    ///
    /// # Errors
    /// - `AtomValidationError::NilUuid` when `uuid` is nil.
    pub fn with_id(
        uuid: AtomId,
        kind: AtomType,
        content: impl Into<String>,
    ) -> Result<Self, AtomValidationError> {
        if uuid.is_nil() {
            return Err(AtomValidationError::NilUuid);
        }
        Ok(Self::build(uuid, kind, content.into()))
    }

    fn build(uuid: AtomId, kind: AtomType, content: String) -> Self {
        Self {
            uuid,
            kind,
            content,
            task_status: None,
            event_start: None,
            event_end: None,
            hlc_timestamp: None,
            is_deleted: false,
            tags: Vec::new(),
        }
    }

    /// Checks cross-field invariants.
    pub fn validate(&self) -> Result<(), AtomValidationError> {
        if self.uuid.is_nil() {
            return Err(AtomValidationError::NilUuid);
        }

        if let (Some(start), Some(end)) = (self.event_start, self.event_end) {
            if end < start {
                return Err(AtomValidationError::InvalidEventWindow { start, end });
            }
        }

        if self.task_status.is_some() && self.kind != AtomType::Task {
            return Err(AtomValidationError::TaskStatusOnNonTask(self.kind));
        }

        Ok(())
    }

    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this atom should be considered visible.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}
