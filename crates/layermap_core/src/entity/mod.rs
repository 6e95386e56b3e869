//! Persistence-layer entities.
//!
//! # Responsibility
//! - Mirror stored row shapes, including their text/integer encodings.
//! - Carry relation graphs (`AtomEntity::tags`) for the repository to write.
//!
//! # Invariants
//! - Entities hold raw storage values and are never validated here.
//!   Interpretation belongs to the mappers.

pub mod atom_entity;
pub mod tag_entity;
