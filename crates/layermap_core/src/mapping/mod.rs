//! Concrete [`Mapper`](crate::mapper::Mapper) implementations.
//!
//! # Responsibility
//! - Provide one mapper per (domain, entity) pair.
//! - Decide per pair which stored values have no domain form.
//!
//! # Invariants
//! - Entity to domain conversion never fills relation fields.
//! - Domain to entity conversion always fills relation fields.

pub mod atom_mapper;
pub mod tag_mapper;
