//! `Atom` <-> `AtomEntity` mapping.
//!
//! # Responsibility
//! - Decode stored text/integer encodings into typed domain fields.
//! - Encode domain atoms, including their tag relation, into entities.
//!
//! # Invariants
//! - A row that fails to decode or fails `Atom::validate()` maps to `None`.
//! - Skipped rows are logged by reason and uuid only, never by content.

use crate::entity::atom_entity::AtomEntity;
use crate::mapper::Mapper;
use crate::mapping::tag_mapper::TagMapper;
use crate::model::atom::{Atom, AtomType, TaskStatus};
use log::warn;
use uuid::Uuid;

/// Maps atoms. Tags are written on the way to storage and left empty on the
/// way back.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomMapper {
    tags: TagMapper,
}

impl AtomMapper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Mapper<Atom, AtomEntity> for AtomMapper {
    fn to_domain(&self, entity: &AtomEntity) -> Option<Atom> {
        let Ok(uuid) = Uuid::parse_str(&entity.uuid) else {
            skip("invalid_uuid", "-");
            return None;
        };

        let Some(kind) = AtomType::parse(&entity.kind) else {
            skip("invalid_type", &entity.uuid);
            return None;
        };

        let task_status = match entity.task_status.as_deref() {
            Some(value) => match TaskStatus::parse(value) {
                Some(status) => Some(status),
                None => {
                    skip("invalid_task_status", &entity.uuid);
                    return None;
                }
            },
            None => None,
        };

        let is_deleted = match entity.is_deleted {
            0 => false,
            1 => true,
            _ => {
                skip("invalid_is_deleted", &entity.uuid);
                return None;
            }
        };

        let atom = Atom {
            uuid,
            kind,
            content: entity.content.clone(),
            task_status,
            event_start: entity.event_start,
            event_end: entity.event_end,
            hlc_timestamp: entity.hlc_timestamp.clone(),
            is_deleted,
            tags: Vec::new(),
        };

        if let Err(err) = atom.validate() {
            warn!(
                "event=atom_to_domain module=mapping status=skipped reason=validation uuid={} error={}",
                entity.uuid, err
            );
            return None;
        }

        Some(atom)
    }

    fn to_entity(&self, domain: &Atom) -> AtomEntity {
        AtomEntity {
            uuid: domain.uuid.to_string(),
            kind: domain.kind.as_str().to_string(),
            content: domain.content.clone(),
            task_status: domain.task_status.map(|status| status.as_str().to_string()),
            event_start: domain.event_start,
            event_end: domain.event_end,
            hlc_timestamp: domain.hlc_timestamp.clone(),
            is_deleted: i64::from(domain.is_deleted),
            tags: domain
                .tags
                .iter()
                .map(|tag| self.tags.to_entity(tag))
                .collect(),
        }
    }
}

fn skip(reason: &str, uuid: &str) {
    warn!("event=atom_to_domain module=mapping status=skipped reason={reason} uuid={uuid}");
}

#[cfg(test)]
mod tests {
    use super::AtomMapper;
    use crate::entity::atom_entity::AtomEntity;
    use crate::entity::tag_entity::TagEntity;
    use crate::mapper::Mapper;
    use crate::model::atom::{Atom, AtomType, TaskStatus};
    use crate::model::tag::Tag;

    fn stored_task() -> AtomEntity {
        AtomEntity {
            uuid: "11111111-2222-4333-8444-555555555555".to_string(),
            kind: "task".to_string(),
            content: "ship it".to_string(),
            task_status: Some("in_progress".to_string()),
            event_start: None,
            event_end: None,
            hlc_timestamp: None,
            is_deleted: 0,
            tags: vec![TagEntity {
                id: Some(1),
                name: "work".to_string(),
            }],
        }
    }

    #[test]
    fn to_domain_decodes_fields_and_ignores_tags() {
        let atom = AtomMapper::new()
            .to_domain(&stored_task())
            .expect("row should map");

        assert_eq!(atom.uuid.to_string(), "11111111-2222-4333-8444-555555555555");
        assert_eq!(atom.kind, AtomType::Task);
        assert_eq!(atom.task_status, Some(TaskStatus::InProgress));
        assert!(atom.is_active());
        assert!(atom.tags.is_empty());
    }

    #[test]
    fn undecodable_rows_map_to_none() {
        let mapper = AtomMapper::new();
        let cases: [fn(&mut AtomEntity); 7] = [
            |row| row.uuid = "not-a-uuid".to_string(),
            |row| row.uuid = "00000000-0000-0000-0000-000000000000".to_string(),
            |row| row.kind = "memo".to_string(),
            |row| row.task_status = Some("blocked".to_string()),
            |row| row.is_deleted = 2,
            |row| row.kind = "note".to_string(),
            |row| {
                row.event_start = Some(200);
                row.event_end = Some(100);
            },
        ];

        for mutate in cases {
            let mut row = stored_task();
            mutate(&mut row);
            assert_eq!(mapper.to_domain(&row), None, "row should be rejected: {row:?}");
        }
    }

    #[test]
    fn to_entity_populates_tag_relation() {
        let mut atom = Atom::new(AtomType::Note, "with tags");
        atom.tags = vec![
            Tag::new("b").expect("valid tag"),
            Tag::new("a").expect("valid tag"),
        ];

        let entity = AtomMapper::new().to_entity(&atom);
        assert_eq!(entity.kind, "note");
        assert_eq!(entity.is_deleted, 0);
        assert_eq!(
            entity.tags,
            vec![TagEntity::unsaved("b"), TagEntity::unsaved("a")]
        );
    }

    #[test]
    fn round_trip_preserves_non_relation_fields() {
        let mapper = AtomMapper::new();
        let mut atom = Atom::new(AtomType::Event, "standup");
        atom.event_start = Some(1_700_000_000_000);
        atom.event_end = Some(1_700_000_900_000);
        atom.hlc_timestamp = Some("2026-02-13T10:00:00Z#node-a#42".to_string());
        atom.soft_delete();
        atom.tags = vec![Tag::new("daily").expect("valid tag")];

        let back = mapper
            .to_domain(&mapper.to_entity(&atom))
            .expect("round trip should map");
        assert_eq!(
            back,
            Atom {
                tags: Vec::new(),
                ..atom
            }
        );
    }
}
