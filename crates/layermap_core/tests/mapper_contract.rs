use layermap_core::{Atom, AtomEntity, AtomMapper, AtomType, Mapper, Tag, TagEntity, TagMapper};
use std::collections::HashSet;

fn note_entity(uuid: &str, content: &str) -> AtomEntity {
    AtomEntity {
        uuid: uuid.to_string(),
        kind: "note".to_string(),
        content: content.to_string(),
        task_status: None,
        event_start: None,
        event_end: None,
        hlc_timestamp: None,
        is_deleted: 0,
        tags: Vec::new(),
    }
}

#[test]
fn optional_input_matches_single_conversion() {
    let mapper = AtomMapper::new();
    let valid = note_entity("11111111-2222-4333-8444-555555555555", "ok");
    let broken = note_entity("broken", "bad");

    assert_eq!(mapper.to_domain_opt(Some(&valid)), mapper.to_domain(&valid));
    assert_eq!(mapper.to_domain_opt(Some(&broken)), None);
    assert_eq!(mapper.to_domain_opt(None), None);
}

#[test]
fn absent_collections_yield_empty_sets() {
    assert!(AtomMapper::new().to_domain_set(None::<&[AtomEntity]>).is_empty());
    assert!(AtomMapper::new().to_entity_set(None::<&[Atom]>).is_empty());
    assert!(TagMapper.to_domain_set(None::<&[TagEntity]>).is_empty());
    assert!(TagMapper.to_entity_set(None::<&[Tag]>).is_empty());
}

#[test]
fn entity_set_keeps_only_convertible_rows() {
    let mapper = AtomMapper::new();
    let e1 = note_entity("11111111-2222-4333-8444-555555555555", "kept");
    let e2 = note_entity("11111111-2222-4333-8444-555555555555", "kept");
    let mut e3 = note_entity("22222222-2222-4333-8444-555555555555", "bad kind");
    e3.kind = "memo".to_string();
    let entities = vec![e1.clone(), e2, e3];

    let mapped = mapper.to_domain_set(Some(&entities));

    let expected: HashSet<Atom> = [mapper.to_domain(&e1).unwrap()].into_iter().collect();
    assert_eq!(mapped, expected);
    assert!(mapped.len() <= entities.len());
}

#[test]
fn to_entity_set_converts_every_domain_object() {
    let atoms = vec![
        Atom::new(AtomType::Note, "a"),
        Atom::new(AtomType::Note, "b"),
        Atom::new(AtomType::Event, "c"),
    ];

    let entities = AtomMapper::new().to_entity_set(Some(&atoms));

    assert_eq!(entities.len(), atoms.len());
    for atom in &atoms {
        assert!(entities.iter().any(|entity| entity.uuid == atom.uuid.to_string()));
    }
}

#[test]
fn tag_sets_collapse_case_variants() {
    let rows = vec![
        TagEntity {
            id: Some(1),
            name: "Work".to_string(),
        },
        TagEntity {
            id: Some(2),
            name: "work ".to_string(),
        },
        TagEntity {
            id: Some(3),
            name: "".to_string(),
        },
    ];

    let tags = TagMapper.to_domain_set(Some(&rows));
    assert_eq!(tags.len(), 1);
    assert!(tags.contains(&Tag::new("work").unwrap()));
}

#[test]
fn domain_entity_domain_round_trip_drops_only_relations() {
    let mapper = AtomMapper::new();
    let mut atom = Atom::new(AtomType::Note, "body");
    atom.tags = vec![Tag::new("a").unwrap(), Tag::new("b").unwrap()];

    let entity = mapper.to_entity(&atom);
    assert_eq!(entity.tags.len(), 2);

    let back = mapper.to_domain(&entity).unwrap();
    assert!(back.tags.is_empty());
    assert_eq!(Atom { tags: atom.tags.clone(), ..back }, atom);
}
