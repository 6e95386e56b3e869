//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define entity-level data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories accept and return entities only, never domain objects.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod atom_repo;
