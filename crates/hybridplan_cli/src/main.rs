//! Command-line front end for the planner document store.
//!
//! # Responsibility
//! - Drive every repository operation against a data directory.
//! - Print resulting documents as JSON and map core error kinds onto
//!   process exit codes.

use clap::{Parser, Subcommand, ValueEnum};
use hybridplan_core::{
    core_version, init_logging_with, ActionItem, ActionItemRepository, ChatRepository, ChatRole,
    DocumentStore, ErrorKind, Event, EventRepository, FileBackend, LogConfig, NoteRepository,
    Priority, RepoError, StoreActionItemRepository, StoreChatRepository, StoreConfig,
    StoreEventRepository, StoreNoteRepository,
};
use log::error;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "hybridplan", about = "Events, notes, chat and action items store")]
struct Cli {
    /// Directory holding the JSON documents. Defaults to HYBRIDPLAN_DATA_DIR.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Write rolling logs (level and directory from HYBRIDPLAN_LOG_*).
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calendar events keyed by day.
    #[command(subcommand)]
    Events(EventsCommand),
    /// Free-text notes.
    #[command(subcommand)]
    Notes(NotesCommand),
    /// Chat transcript.
    #[command(subcommand)]
    Chat(ChatCommand),
    /// Categorized action items.
    #[command(subcommand)]
    Actions(ActionsCommand),
    /// Print the core version.
    Version,
}

#[derive(Debug, Subcommand)]
enum EventsCommand {
    List,
    Add {
        day: String,
        title: String,
        #[arg(long)]
        hour: u8,
        #[arg(long, default_value_t = 1)]
        duration: u8,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        day: String,
        index: usize,
    },
}

#[derive(Debug, Subcommand)]
enum NotesCommand {
    List,
    Create {
        text: String,
        #[arg(long, default_value = "personal")]
        category: String,
    },
    Update {
        id: u64,
        text: String,
        #[arg(long, default_value = "personal")]
        category: String,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Assistant,
}

impl From<RoleArg> for ChatRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::User => ChatRole::User,
            RoleArg::Assistant => ChatRole::Assistant,
        }
    }
}

#[derive(Debug, Subcommand)]
enum ChatCommand {
    List,
    Append {
        #[arg(value_enum)]
        role: RoleArg,
        text: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriorityArg {
    Hoch,
    Mittel,
    Niedrig,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Hoch => Priority::High,
            PriorityArg::Mittel => Priority::Medium,
            PriorityArg::Niedrig => Priority::Low,
        }
    }
}

#[derive(Debug, Subcommand)]
enum ActionsCommand {
    List,
    Create {
        category: String,
        title: String,
        description: String,
        #[arg(long, value_enum, default_value = "mittel")]
        priority: PriorityArg,
    },
    Update {
        category: String,
        index: usize,
        title: String,
        description: String,
        #[arg(long, value_enum, default_value = "mittel")]
        priority: PriorityArg,
    },
    Delete {
        category: String,
        index: usize,
    },
    /// Replace all action items with a generated plan read from a JSON file.
    Import {
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            exit_code_for(err.as_ref())
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Command::Version = cli.command {
        println!("hybridplan_core version={}", core_version());
        return Ok(());
    }

    let config = match cli.data_dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::from_env()?,
    };
    if cli.log {
        init_logging_with(&LogConfig::from_env(&config)?)?;
    }
    let store = DocumentStore::open(config);

    match cli.command {
        Command::Events(command) => run_events(&store, command),
        Command::Notes(command) => run_notes(&store, command),
        Command::Chat(command) => run_chat(&store, command),
        Command::Actions(command) => run_actions(&store, command),
        Command::Version => Ok(()),
    }
}

fn run_events(
    store: &DocumentStore<FileBackend>,
    command: EventsCommand,
) -> Result<(), Box<dyn Error>> {
    let repo = StoreEventRepository::new(store);
    let document = match command {
        EventsCommand::List => repo.list_events()?,
        EventsCommand::Add {
            day,
            title,
            hour,
            duration,
            description,
        } => {
            let mut event = Event::new(title, hour, duration);
            event.description = description;
            repo.add_event(&day, event)?
        }
        EventsCommand::Delete { day, index } => repo.delete_event(&day, index)?,
    };
    print_json(&document)
}

fn run_notes(
    store: &DocumentStore<FileBackend>,
    command: NotesCommand,
) -> Result<(), Box<dyn Error>> {
    let repo = StoreNoteRepository::new(store);
    let notes = match command {
        NotesCommand::List => repo.list_notes()?,
        NotesCommand::Create { text, category } => repo.create_note(&text, &category)?,
        NotesCommand::Update { id, text, category } => repo.update_note(id, &text, &category)?,
        NotesCommand::Delete { id } => repo.delete_note(id)?,
    };
    print_json(&notes)
}

fn run_chat(
    store: &DocumentStore<FileBackend>,
    command: ChatCommand,
) -> Result<(), Box<dyn Error>> {
    let repo = StoreChatRepository::new(store);
    let messages = match command {
        ChatCommand::List => repo.list_messages()?,
        ChatCommand::Append { role, text } => repo.append_message(role.into(), &text)?,
    };
    print_json(&messages)
}

fn run_actions(
    store: &DocumentStore<FileBackend>,
    command: ActionsCommand,
) -> Result<(), Box<dyn Error>> {
    let repo = StoreActionItemRepository::new(store);
    let document = match command {
        ActionsCommand::List => repo.list()?,
        ActionsCommand::Create {
            category,
            title,
            description,
            priority,
        } => repo.create(
            &category,
            ActionItem::new(title, description, priority.into()),
        )?,
        ActionsCommand::Update {
            category,
            index,
            title,
            description,
            priority,
        } => repo.update(
            &category,
            index,
            ActionItem::new(title, description, priority.into()),
        )?,
        ActionsCommand::Delete { category, index } => repo.delete(&category, index)?,
        ActionsCommand::Import { file } => {
            let raw = std::fs::read(&file)?;
            repo.replace_all(serde_json::from_slice(&raw)?)?
        }
    };
    print_json(&document)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code_for(err: &(dyn Error + 'static)) -> ExitCode {
    let Some(repo_err) = err.downcast_ref::<RepoError>() else {
        return ExitCode::FAILURE;
    };
    match repo_err.kind() {
        ErrorKind::NotFound => ExitCode::from(3),
        ErrorKind::InvalidCategory | ErrorKind::Conflict | ErrorKind::Validation => {
            ExitCode::from(2)
        }
        ErrorKind::Storage => {
            error!("event=cli_command module=cli status=error error={repo_err}");
            ExitCode::FAILURE
        }
    }
}
