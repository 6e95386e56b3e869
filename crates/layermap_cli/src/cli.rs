//! Argument model and command dispatch.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use layermap_core::db::{open_db, open_db_in_memory};
use layermap_core::{
    default_log_level, flush_logging, init_logging, Atom, AtomListQuery, AtomService, AtomType,
    SqliteAtomRepository,
};
use log::{error, info};
use rusqlite::Connection;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "layermap", version, about = "Inspect and edit a layermap atom store")]
pub struct Cli {
    /// SQLite database file. An in-memory database is used when omitted.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "LAYERMAP_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print core linkage info.
    Ping,
    /// Create a note.
    AddNote {
        content: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Create a task with status `todo`.
    AddTask { content: String },
    /// List atoms, newest first.
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        #[arg(long)]
        include_deleted: bool,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List all tags.
    Tags,
    /// Soft-delete an atom.
    Delete { id: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Note,
    Task,
    Event,
}

impl From<KindArg> for AtomType {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Note => AtomType::Note,
            KindArg::Task => AtomType::Task,
            KindArg::Event => AtomType::Event,
        }
    }
}

/// Runs one parsed command, writing results to `out`.
///
/// Buffered log lines are flushed before returning, on success and on error.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let result = dispatch(cli, out);
    if let Err(err) = &result {
        error!("event=cli_command module=cli status=error error={err:#}");
    }
    flush_logging();
    result
}

fn dispatch(cli: Cli, out: &mut impl Write) -> Result<()> {
    if let Command::Ping = cli.command {
        writeln!(out, "layermap_core ping={}", layermap_core::ping())?;
        writeln!(out, "layermap_core version={}", layermap_core::core_version())?;
        return Ok(());
    }

    let conn = open_connection(cli.db.as_ref())?;
    let service = AtomService::new(SqliteAtomRepository::new(&conn));
    info!("event=cli_command module=cli status=start");

    match cli.command {
        Command::Ping => {}
        Command::AddNote { content, tags } => {
            let id = service
                .create_note(content, &tags)
                .context("failed to create note")?;
            writeln!(out, "{id}")?;
        }
        Command::AddTask { content } => {
            let id = service.create_task(content).context("failed to create task")?;
            writeln!(out, "{id}")?;
        }
        Command::List {
            kind,
            include_deleted,
            limit,
        } => {
            let query = AtomListQuery {
                kind: kind.map(AtomType::from),
                include_deleted,
                limit,
                offset: 0,
            };
            for atom in service.list_atoms(&query).context("failed to list atoms")? {
                writeln!(out, "{}", format_atom(&atom))?;
            }
        }
        Command::Tags => {
            for tag in service.list_tags().context("failed to list tags")? {
                writeln!(out, "{}", tag.name())?;
            }
        }
        Command::Delete { id } => {
            service
                .soft_delete_atom(id)
                .with_context(|| format!("failed to delete atom {id}"))?;
            writeln!(out, "deleted {id}")?;
        }
    }

    info!("event=cli_command module=cli status=ok");
    Ok(())
}

fn open_connection(path: Option<&PathBuf>) -> Result<Connection> {
    match path {
        Some(path) => {
            open_db(path).with_context(|| format!("failed to open database {}", path.display()))
        }
        None => open_db_in_memory().context("failed to open in-memory database"),
    }
}

/// `<uuid>\t<type>\t<status>\t<tags>\t<content>` with `-` for empty columns.
fn format_atom(atom: &Atom) -> String {
    let status = atom.task_status.map_or("-", |status| status.as_str());
    let tags = if atom.tags.is_empty() {
        "-".to_string()
    } else {
        atom.tags
            .iter()
            .map(|tag| tag.name())
            .collect::<Vec<_>>()
            .join(",")
    };
    let deleted = if atom.is_deleted { " (deleted)" } else { "" };
    format!(
        "{}\t{}\t{}\t{}\t{}{}",
        atom.uuid,
        atom.kind,
        status,
        tags,
        atom.content.replace(['\n', '\t'], " "),
        deleted
    )
}
