use layermap_core::db::open_db_in_memory;
use layermap_core::{
    Atom, AtomListQuery, AtomService, AtomType, AtomValidationError, ScheduleEventRequest,
    ServiceError, SqliteAtomRepository, TaskStatus,
};
use rusqlite::Connection;
use uuid::Uuid;

fn service(conn: &Connection) -> AtomService<SqliteAtomRepository<'_>> {
    AtomService::new(SqliteAtomRepository::new(conn))
}

fn tag_names(atom: &Atom) -> Vec<&str> {
    atom.tags.iter().map(|tag| tag.name()).collect()
}

#[test]
fn create_note_persists_normalized_tags() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let id = service
        .create_note(
            "tagged",
            &["Work".to_string(), "urgent".to_string(), "WORK".to_string()],
        )
        .unwrap();

    let atom = service.get_atom(id, false).unwrap().unwrap();
    assert_eq!(atom.kind, AtomType::Note);
    assert_eq!(tag_names(&atom), vec!["urgent", "work"]);
}

#[test]
fn create_note_rejects_blank_tags_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .create_note("tagged", &["ok".to_string(), " ".to_string()])
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTag(_)));
    assert!(service
        .list_atoms(&AtomListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn create_task_and_event_set_projection_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let task_id = service.create_task("write tests").unwrap();
    let task = service.get_atom(task_id, false).unwrap().unwrap();
    assert_eq!(task.task_status, Some(TaskStatus::Todo));

    let event_id = service
        .schedule_event(&ScheduleEventRequest {
            title: "review".to_string(),
            start_epoch_ms: 1_000,
            end_epoch_ms: Some(2_000),
        })
        .unwrap();
    let event = service.get_atom(event_id, false).unwrap().unwrap();
    assert_eq!(event.event_start, Some(1_000));
    assert_eq!(event.event_end, Some(2_000));
}

#[test]
fn invalid_atoms_are_rejected_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .schedule_event(&ScheduleEventRequest {
            title: "backwards".to_string(),
            start_epoch_ms: 2_000,
            end_epoch_ms: Some(1_000),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(AtomValidationError::InvalidEventWindow { .. })
    ));
}

#[test]
fn update_atom_rewrites_fields_and_tags() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = service.create_note("draft", &["old".to_string()]).unwrap();

    let mut atom = service.get_atom(id, false).unwrap().unwrap();
    atom.content = "final".to_string();
    atom.tags = Vec::new();
    service.update_atom(&atom).unwrap();

    let loaded = service.get_atom(id, false).unwrap().unwrap();
    assert_eq!(loaded.content, "final");
    assert!(loaded.tags.is_empty());
}

#[test]
fn update_missing_atom_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let atom = Atom::new(AtomType::Note, "never stored");

    let err = service.update_atom(&atom).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(id) if id == atom.uuid));
}

#[test]
fn set_tags_replaces_relation() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = service.create_note("note", &["a".to_string()]).unwrap();

    let atom = service
        .set_tags(id, &["B".to_string(), "c".to_string()])
        .unwrap();
    assert_eq!(tag_names(&atom), vec!["b", "c"]);

    let err = service.set_tags(Uuid::new_v4(), &[]).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn unconvertible_rows_read_as_absent_and_are_dropped_from_lists() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let good = service.create_note("good", &[]).unwrap();
    let bad = service.create_note("bad", &[]).unwrap();
    conn.execute(
        "UPDATE atoms SET type = 'memo' WHERE uuid = ?1;",
        [bad.to_string()],
    )
    .unwrap();

    assert_eq!(service.get_atom(bad, false).unwrap(), None);

    let listed = service.list_atoms(&AtomListQuery::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].uuid, good);
}

#[test]
fn soft_delete_hides_atom_from_default_reads() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = service.create_task("gone soon").unwrap();

    service.soft_delete_atom(id).unwrap();

    assert_eq!(service.get_atom(id, false).unwrap(), None);
    let deleted = service.get_atom(id, true).unwrap().unwrap();
    assert!(!deleted.is_active());
    assert!(matches!(
        service.soft_delete_atom(Uuid::new_v4()).unwrap_err(),
        ServiceError::NotFound(_)
    ));
}

#[test]
fn list_tags_returns_sorted_distinct_tags() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .create_note("one", &["Zed".to_string(), "alpha".to_string()])
        .unwrap();
    service.create_note("two", &["zed".to_string()]).unwrap();

    let names: Vec<String> = service
        .list_tags()
        .unwrap()
        .iter()
        .map(|tag| tag.name().to_string())
        .collect();
    assert_eq!(names, vec!["alpha".to_string(), "zed".to_string()]);
}
