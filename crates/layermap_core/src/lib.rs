//! Domain/entity mapping core for layered applications.
//!
//! The [`Mapper`] trait is the conversion contract between business-layer
//! domain objects and persistence entities. The rest of the crate is one
//! complete vertical slice built on it: atoms and tags, their SQLite
//! entities, concrete mappers, a repository and a service.

pub mod db;
pub mod entity;
pub mod logging;
pub mod mapper;
pub mod mapping;
pub mod model;
pub mod repo;
pub mod service;

pub use entity::atom_entity::AtomEntity;
pub use entity::tag_entity::TagEntity;
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LogConfig, LoggingError,
};
pub use mapper::Mapper;
pub use mapping::atom_mapper::AtomMapper;
pub use mapping::tag_mapper::TagMapper;
pub use model::atom::{Atom, AtomId, AtomType, AtomValidationError, TaskStatus};
pub use model::tag::Tag;
pub use repo::atom_repo::{
    AtomListQuery, AtomRepository, RepoError, RepoResult, SqliteAtomRepository,
};
pub use service::atom_service::{
    AtomService, ScheduleEventRequest, ServiceError, ServiceResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
