//! Atom use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points in domain terms.
//! - Convert through the mappers and assemble the tag relation.
//!
//! # Invariants
//! - Atoms are validated before they reach the repository.
//! - Rows without a domain form read as absent and are dropped from lists.
//! - Returned tags are deduplicated and sorted by name.

use crate::entity::tag_entity::TagEntity;
use crate::mapper::Mapper;
use crate::mapping::atom_mapper::AtomMapper;
use crate::mapping::tag_mapper::TagMapper;
use crate::model::atom::{Atom, AtomId, AtomType, AtomValidationError, TaskStatus};
use crate::model::tag::Tag;
use crate::repo::atom_repo::{AtomListQuery, AtomRepository, RepoError};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for atom use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Domain invariants rejected the atom.
    Validation(AtomValidationError),
    /// Tag input contains a blank value.
    InvalidTag(String),
    /// Target atom does not exist or is not visible.
    NotFound(AtomId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidTag(value) => write!(f, "invalid tag: `{value}`"),
            Self::NotFound(id) => write!(f, "atom not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidTag(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<AtomValidationError> for ServiceError {
    fn from(value: AtomValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(uuid) => match Uuid::parse_str(&uuid) {
                Ok(id) => Self::NotFound(id),
                Err(_) => Self::Repo(RepoError::NotFound(uuid)),
            },
            other => Self::Repo(other),
        }
    }
}

/// Request model for scheduling an event atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEventRequest {
    pub title: String,
    /// Event start in epoch milliseconds.
    pub start_epoch_ms: i64,
    /// Optional event end in epoch milliseconds.
    pub end_epoch_ms: Option<i64>,
}

/// Business-layer facade over an entity repository.
pub struct AtomService<R: AtomRepository> {
    repo: R,
    atoms: AtomMapper,
    tags: TagMapper,
}

impl<R: AtomRepository> AtomService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            atoms: AtomMapper::new(),
            tags: TagMapper,
        }
    }

    /// Validates and persists an atom together with its tags.
    pub fn create_atom(&self, atom: &Atom) -> ServiceResult<AtomId> {
        atom.validate()?;
        let entity = self.atoms.to_entity(atom);
        self.repo.insert(&entity)?;
        info!(
            "event=atom_create module=service status=ok type={} tag_count={}",
            atom.kind,
            entity.tags.len()
        );
        Ok(atom.uuid)
    }

    /// Creates a note atom with the given raw tag names.
    ///
    /// # Errors
    /// - `ServiceError::InvalidTag` when any tag is blank.
    pub fn create_note(
        &self,
        content: impl Into<String>,
        tags: &[String],
    ) -> ServiceResult<AtomId> {
        let mut atom = Atom::new(AtomType::Note, content);
        atom.tags = normalize_tags(tags)?;
        self.create_atom(&atom)
    }

    /// Creates a task atom with status `todo`.
    pub fn create_task(&self, content: impl Into<String>) -> ServiceResult<AtomId> {
        let mut atom = Atom::new(AtomType::Task, content);
        atom.task_status = Some(TaskStatus::Todo);
        self.create_atom(&atom)
    }

    /// Schedules a point (`end_epoch_ms = None`) or range event.
    pub fn schedule_event(&self, request: &ScheduleEventRequest) -> ServiceResult<AtomId> {
        let mut atom = Atom::new(AtomType::Event, request.title.clone());
        atom.event_start = Some(request.start_epoch_ms);
        atom.event_end = request.end_epoch_ms;
        self.create_atom(&atom)
    }

    /// Rewrites an existing atom, including its full tag set.
    pub fn update_atom(&self, atom: &Atom) -> ServiceResult<()> {
        atom.validate()?;
        self.repo.update(&self.atoms.to_entity(atom))?;
        Ok(())
    }

    /// Gets one atom with its tags.
    ///
    /// A stored row without a domain form is reported as `None`.
    pub fn get_atom(&self, id: AtomId, include_deleted: bool) -> ServiceResult<Option<Atom>> {
        let entity = self.repo.find(&id.to_string(), include_deleted)?;
        let tags = entity.as_ref().map(|entity| entity.tags.as_slice());
        Ok(self
            .atoms
            .to_domain_opt(entity.as_ref())
            .map(|atom| self.attach_tags(atom, tags)))
    }

    /// Lists atoms in repository order, skipping rows without a domain form.
    pub fn list_atoms(&self, query: &AtomListQuery) -> ServiceResult<Vec<Atom>> {
        let entities = self.repo.list(query)?;
        let total = entities.len();
        let atoms: Vec<Atom> = entities
            .iter()
            .filter_map(|entity| {
                self.atoms
                    .to_domain(entity)
                    .map(|atom| self.attach_tags(atom, Some(entity.tags.as_slice())))
            })
            .collect();

        let dropped = total - atoms.len();
        if dropped > 0 {
            warn!(
                "event=atom_list module=service status=partial returned={} dropped={}",
                atoms.len(),
                dropped
            );
        } else {
            debug!(
                "event=atom_list module=service status=ok returned={}",
                atoms.len()
            );
        }
        Ok(atoms)
    }

    /// Returns every known tag sorted by name.
    pub fn list_tags(&self) -> ServiceResult<Vec<Tag>> {
        let entities = self.repo.list_tags()?;
        Ok(sorted(self.tags.to_domain_set(Some(&entities))))
    }

    /// Replaces the whole tag set of an active atom and returns the stored
    /// result.
    pub fn set_tags(&self, id: AtomId, tags: &[String]) -> ServiceResult<Atom> {
        let tags = normalize_tags(tags)?;
        let mut atom = self.get_atom(id, false)?.ok_or(ServiceError::NotFound(id))?;
        atom.tags = tags;
        self.update_atom(&atom)?;
        self.get_atom(id, false)?.ok_or(ServiceError::NotFound(id))
    }

    pub fn soft_delete_atom(&self, id: AtomId) -> ServiceResult<()> {
        self.repo.soft_delete(&id.to_string())?;
        info!("event=atom_soft_delete module=service status=ok");
        Ok(())
    }

    fn attach_tags(&self, mut atom: Atom, tags: Option<&[TagEntity]>) -> Atom {
        atom.tags = sorted(self.tags.to_domain_set(tags));
        atom
    }
}

/// Normalizes raw tag names, rejecting blanks and dropping duplicates.
pub fn normalize_tags(tags: &[String]) -> ServiceResult<Vec<Tag>> {
    let mut unique = BTreeSet::new();
    for raw in tags {
        let tag = Tag::new(raw).ok_or_else(|| ServiceError::InvalidTag(raw.clone()))?;
        unique.insert(tag);
    }
    Ok(unique.into_iter().collect())
}

fn sorted(tags: impl IntoIterator<Item = Tag>) -> Vec<Tag> {
    let mut tags: Vec<Tag> = tags.into_iter().collect();
    tags.sort();
    tags
}
