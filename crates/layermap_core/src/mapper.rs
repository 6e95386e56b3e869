//! Domain/entity mapping contract.
//!
//! # Responsibility
//! - Convert between business-layer domain objects and persistence entities.
//! - Provide optional and collection conveniences on top of the two
//!   single-value conversions.
//!
//! # Invariants
//! - `to_domain` is partial: `None` means the entity has no meaningful domain
//!   form and callers skip it.
//! - `to_entity` is total and always yields exactly one entity.
//! - `to_domain` leaves relation fields empty; `to_entity` populates them.
//! - Absent collections map to empty sets.

use std::collections::HashSet;
use std::hash::Hash;

/// Bidirectional conversion between domain type `D` and entity type `E`.
///
/// Implement once per concrete (domain, entity) pair. Only [`Mapper::to_domain`]
/// and [`Mapper::to_entity`] are required.
pub trait Mapper<D, E> {
    /// Maps one entity to its domain form.
    ///
    /// Relation fields must not be populated here. The business layer
    /// assembles relations according to its use case.
    ///
    /// Returns `None` when the entity cannot be meaningfully converted.
    fn to_domain(&self, entity: &E) -> Option<D>;

    /// Maps one domain object to its entity form.
    ///
    /// Relation fields are fully populated so the persistence layer can store
    /// the whole graph.
    fn to_entity(&self, domain: &D) -> E;

    /// Forwards a present entity to [`Mapper::to_domain`].
    fn to_domain_opt(&self, entity: Option<&E>) -> Option<D> {
        let entity = entity?;
        self.to_domain(entity)
    }

    /// Maps a collection of entities, dropping those without a domain form.
    ///
    /// `None` yields an empty set. Equal results collapse.
    fn to_domain_set<'a, I>(&self, entities: Option<I>) -> HashSet<D>
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
        D: Eq + Hash,
    {
        match entities {
            Some(entities) => entities
                .into_iter()
                .filter_map(|entity| self.to_domain(entity))
                .collect(),
            None => HashSet::new(),
        }
    }

    /// Maps a collection of domain objects. `None` yields an empty set.
    fn to_entity_set<'a, I>(&self, domains: Option<I>) -> HashSet<E>
    where
        I: IntoIterator<Item = &'a D>,
        D: 'a,
        E: Eq + Hash,
    {
        match domains {
            Some(domains) => domains
                .into_iter()
                .map(|domain| self.to_entity(domain))
                .collect(),
            None => HashSet::new(),
        }
    }
}
