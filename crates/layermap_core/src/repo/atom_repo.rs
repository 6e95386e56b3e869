//! Atom entity repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store and load `AtomEntity` graphs (row plus tag links).
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Row values are handed back as stored; decoding belongs to the mappers.
//! - A row and its tag links are always written in one transaction.
//! - Tag links are loaded ordered by tag name.

use crate::db::DbError;
use crate::entity::atom_entity::AtomEntity;
use crate::entity::tag_entity::TagEntity;
use crate::model::atom::AtomType;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ATOM_SELECT_SQL: &str = "SELECT
    uuid,
    type,
    content,
    task_status,
    event_start,
    event_end,
    hlc_timestamp,
    is_deleted
FROM atoms";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for atom persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// No row with this uuid exists.
    NotFound(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(uuid) => write!(f, "atom not found: {uuid}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing atoms.
#[derive(Debug, Clone, Default)]
pub struct AtomListQuery {
    pub kind: Option<AtomType>,
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Entity-level persistence contract for atoms.
pub trait AtomRepository {
    /// Inserts the row and links every tag in `entity.tags`.
    fn insert(&self, entity: &AtomEntity) -> RepoResult<()>;
    /// Rewrites the row and replaces its tag links.
    fn update(&self, entity: &AtomEntity) -> RepoResult<()>;
    /// Loads one row with its tags.
    fn find(&self, uuid: &str, include_deleted: bool) -> RepoResult<Option<AtomEntity>>;
    /// Lists rows ordered by `updated_at DESC, uuid ASC`.
    fn list(&self, query: &AtomListQuery) -> RepoResult<Vec<AtomEntity>>;
    fn soft_delete(&self, uuid: &str) -> RepoResult<()>;
    /// Returns every stored tag ordered by name.
    fn list_tags(&self) -> RepoResult<Vec<TagEntity>>;
}

/// SQLite-backed atom repository.
pub struct SqliteAtomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAtomRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AtomRepository for SqliteAtomRepository<'_> {
    fn insert(&self, entity: &AtomEntity) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO atoms (
                uuid,
                type,
                content,
                task_status,
                event_start,
                event_end,
                hlc_timestamp,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                entity.uuid.as_str(),
                entity.kind.as_str(),
                entity.content.as_str(),
                entity.task_status.as_deref(),
                entity.event_start,
                entity.event_end,
                entity.hlc_timestamp.as_deref(),
                entity.is_deleted,
            ],
        )?;
        link_tags(&tx, &entity.uuid, &entity.tags)?;
        tx.commit()?;
        Ok(())
    }

    fn update(&self, entity: &AtomEntity) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE atoms
             SET
                type = ?1,
                content = ?2,
                task_status = ?3,
                event_start = ?4,
                event_end = ?5,
                hlc_timestamp = ?6,
                is_deleted = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?8;",
            params![
                entity.kind.as_str(),
                entity.content.as_str(),
                entity.task_status.as_deref(),
                entity.event_start,
                entity.event_end,
                entity.hlc_timestamp.as_deref(),
                entity.is_deleted,
                entity.uuid.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(entity.uuid.clone()));
        }

        tx.execute(
            "DELETE FROM atom_tags WHERE atom_uuid = ?1;",
            [entity.uuid.as_str()],
        )?;
        link_tags(&tx, &entity.uuid, &entity.tags)?;
        tx.commit()?;
        Ok(())
    }

    fn find(&self, uuid: &str, include_deleted: bool) -> RepoResult<Option<AtomEntity>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ATOM_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![uuid, i64::from(include_deleted)])?;
        if let Some(row) = rows.next()? {
            let mut entity = entity_from_row(row)?;
            entity.tags = load_tags(self.conn, &entity.uuid)?;
            return Ok(Some(entity));
        }

        Ok(None)
    }

    fn list(&self, query: &AtomListQuery) -> RepoResult<Vec<AtomEntity>> {
        let mut sql = format!("{ATOM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(kind) = query.kind {
            sql.push_str(" AND type = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entities = Vec::new();

        while let Some(row) = rows.next()? {
            let mut entity = entity_from_row(row)?;
            entity.tags = load_tags(self.conn, &entity.uuid)?;
            entities.push(entity);
        }

        Ok(entities)
    }

    fn soft_delete(&self, uuid: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE atoms
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [uuid],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(uuid.to_string()));
        }

        Ok(())
    }

    fn list_tags(&self) -> RepoResult<Vec<TagEntity>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM tags ORDER BY name COLLATE NOCASE ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(tag_from_row(row)?);
        }
        Ok(tags)
    }
}

fn entity_from_row(row: &Row<'_>) -> rusqlite::Result<AtomEntity> {
    Ok(AtomEntity {
        uuid: row.get("uuid")?,
        kind: row.get("type")?,
        content: row.get("content")?,
        task_status: row.get("task_status")?,
        event_start: row.get("event_start")?,
        event_end: row.get("event_end")?,
        hlc_timestamp: row.get("hlc_timestamp")?,
        is_deleted: row.get("is_deleted")?,
        tags: Vec::new(),
    })
}

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<TagEntity> {
    Ok(TagEntity {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn load_tags(conn: &Connection, atom_uuid: &str) -> RepoResult<Vec<TagEntity>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name
         FROM atom_tags at
         INNER JOIN tags t ON t.id = at.tag_id
         WHERE at.atom_uuid = ?1
         ORDER BY t.name COLLATE NOCASE ASC;",
    )?;
    let mut rows = stmt.query([atom_uuid])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(tag_from_row(row)?);
    }
    Ok(tags)
}

fn link_tags(conn: &Connection, atom_uuid: &str, tags: &[TagEntity]) -> RepoResult<()> {
    for tag in tags {
        conn.execute(
            "INSERT OR IGNORE INTO tags (name) VALUES (?1);",
            [tag.name.as_str()],
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO atom_tags (atom_uuid, tag_id)
             SELECT ?1, id
             FROM tags
             WHERE name = ?2 COLLATE NOCASE;",
            params![atom_uuid, tag.name.as_str()],
        )?;
    }
    Ok(())
}
