//! Business-layer use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into domain-level APIs.
//! - Own relation assembly on the domain side.

pub mod atom_service;
