//! Business-layer domain model.
//!
//! # Responsibility
//! - Define domain objects free of persistence concerns.
//! - Own domain validation rules.
//!
//! # Invariants
//! - Every atom is identified by a stable non-nil `AtomId`.
//! - Tags are compared by normalized (trimmed, lowercase) name.

pub mod atom;
pub mod tag;
