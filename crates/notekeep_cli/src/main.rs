//! `notekeep` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration (environment, then flags) and open the store.
//! - Drive `NotesApp` through the same open/fill/submit flow as any UI.
//!
//! # Invariants
//! - Blank submissions never mutate stored notes and exit non-zero.
//! - Errors are reported on stderr with exit code 1.

use clap::{Args, Parser, Subcommand};
use log::warn;
use notekeep_core::db::open_db;
use notekeep_core::{
    init_logging, AppConfig, KvStore, NoteCard, NoteChange, NoteId, NotesApp, SqliteKvStore,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const SUMMARY_WIDTH: usize = 100;

#[derive(Parser, Debug)]
#[command(
    name = "notekeep",
    version = notekeep_core::core_version(),
    about = "Keep short text notes in a local store",
    arg_required_else_help = true
)]
struct Cli {
    /// SQLite file holding the note store (overrides NOTEKEEP_DB_PATH).
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files (overrides NOTEKEEP_LOG_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides NOTEKEEP_LOG_LEVEL).
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List notes, newest first.
    #[command(alias = "ls")]
    List,
    /// Show one note.
    Show { id: NoteId },
    /// Create a note.
    Add(NoteFields),
    /// Edit a note's title and/or content.
    Edit {
        id: NoteId,
        #[command(flatten)]
        fields: NoteFields,
    },
    /// Delete a note.
    #[command(alias = "rm")]
    Delete { id: NoteId },
    /// Print the raw stored JSON.
    Export,
}

#[derive(Args, Debug, Default)]
struct NoteFields {
    #[arg(long, short)]
    title: Option<String>,
    #[arg(long, short)]
    content: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&cli)?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(config.log_level, &log_dir.to_string_lossy())?;
    }

    let mut store = SqliteKvStore::try_new(open_db(&config.db_path)?)?;
    if let Some(quota) = config.store_quota {
        store = store.with_quota(quota);
    }
    let mut app = NotesApp::mount(store);

    match cli.command {
        Command::List => print_list(&app),
        Command::Show { id } => {
            let note = app.get_note(id).ok_or(format!("note not found: {id}"))?;
            println!("{}", NoteCard::new(note).render());
        }
        Command::Add(fields) => {
            app.open_create();
            fill_form(&mut app, fields);
            submit(&mut app)?;
        }
        Command::Edit { id, fields } => {
            app.open_edit_by_id(id)?;
            fill_form(&mut app, fields);
            submit(&mut app)?;
        }
        Command::Delete { id } => {
            let change = app.delete(id)?;
            report(&change, "Deleted");
        }
        Command::Export => {
            let raw = app.service().repository().load_raw()?;
            println!("{}", raw.unwrap_or_else(|| "[]".to_string()));
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, Box<dyn Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }
    if let Some(dir) = cli.log_dir.clone() {
        config.log_dir = Some(dir);
    }
    if let Some(level) = cli.log_level.as_deref() {
        config.set_log_level(level)?;
    }
    Ok(config)
}

fn fill_form<S: KvStore>(app: &mut NotesApp<S>, fields: NoteFields) {
    let form = app.form_mut();
    if let Some(title) = fields.title {
        form.set_title(title);
    }
    if let Some(content) = fields.content {
        form.set_content(content);
    }
}

fn submit<S: KvStore>(app: &mut NotesApp<S>) -> Result<(), Box<dyn Error>> {
    match app.submit_form()? {
        Some(change) => {
            report(&change, "Saved");
            Ok(())
        }
        None => {
            app.close();
            Err("nothing to save: title and content are both blank".into())
        }
    }
}

fn report(change: &NoteChange, verb: &str) {
    println!("{verb} note {}", change.note.id);
    if !change.persisted {
        warn!("event=cli_persist module=cli status=error note_id={}", change.note.id);
        eprintln!("warning: change could not be written to the store; it was not saved");
    }
}

fn print_list<S: KvStore>(app: &NotesApp<S>) {
    if app.notes().is_empty() {
        println!("No notes yet!");
        println!("Run `notekeep add --title <TITLE>` to get started.");
        return;
    }
    for card in app.cards() {
        println!("{}", card.summary(SUMMARY_WIDTH));
    }
}
