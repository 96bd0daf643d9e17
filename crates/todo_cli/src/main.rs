//! `todo` command-line front end.
//!
//! # Responsibility
//! - Parse one command, apply it to the persisted todo list, print the view.
//! - Keep all todo rules in `todo_core`; this binary only wires I/O.

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::Write;
use std::path::PathBuf;
use todo_core::db::open_db;
use todo_core::{
    init_logging, ConfigOverrides, FilterMode, SqliteKeyValueStore, SystemClock, TodoCommand,
    TodoConfig, TodoId, TodoSession, TodoStore,
};

/// Manage a local todo list.
#[derive(Parser)]
#[command(name = "todo", version, about = "Add, complete, delete and filter todos")]
struct Cli {
    /// SQLite database file [env: TODO_DB_PATH].
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error [env: TODO_LOG_LEVEL].
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files [env: TODO_LOG_DIR].
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Write the sample todos when the list is empty.
    #[arg(long, global = true)]
    seed: bool,

    /// Which todos to show after the command runs.
    #[arg(long, global = true, default_value_t = FilterMode::All)]
    filter: FilterMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a todo; words are joined with spaces.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Flip a todo between active and completed.
    Toggle { id: TodoId },
    /// Delete a todo.
    Delete { id: TodoId },
    /// Remove every completed todo.
    ClearCompleted,
    /// Show todos.
    List,
}

impl Commands {
    fn into_command(self) -> Option<TodoCommand> {
        match self {
            Self::Add { text } => Some(TodoCommand::Add(text.join(" "))),
            Self::Toggle { id } => Some(TodoCommand::Toggle(id)),
            Self::Delete { id } => Some(TodoCommand::Delete(id)),
            Self::ClearCompleted => Some(TodoCommand::ClearCompleted),
            Self::List => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TodoConfig::from_env(ConfigOverrides {
        db_path: cli.db,
        storage_key: None,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
        seed_samples: cli.seed,
    })
    .context("invalid configuration")?;

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let storage = SqliteKeyValueStore::try_new(&conn).context("todo storage is not usable")?;
    let store = TodoStore::load_with(storage, config.storage_key.as_str(), SystemClock);
    let mut session = TodoSession::new(store).with_filter(cli.filter);

    if config.seed_samples {
        session
            .seed_samples_if_empty()
            .context("failed to write sample todos")?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Some(command) = cli.command.into_command() {
        let outcome = session
            .apply(command)
            .context("failed to save todos")?;
        info!("event=cli_command module=cli status=ok outcome={outcome:?}");
        render::write_outcome(&mut out, outcome)?;
    }

    render::write_view(&mut out, &session.view())?;
    out.flush()?;
    Ok(())
}
