//! Command-line front end for the notes backend.
//!
//! # Responsibility
//! - Bootstrap the client once and inject the handle into `App`.
//! - Render note results or request errors for one command per run.

use clap::{Parser, Subcommand};
use log::error;
use notes_core::{
    bootstrap, default_log_level, init_logging, BootstrapError, ClientConfig, ClientHandle,
    LogSink, Note, NoteId, NoteService, NoteServiceError, Transport,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "notes", version, about = "Create, list, update and delete notes")]
struct Cli {
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rotated log files; logs go to stderr otherwise.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all notes.
    List,
    /// Create a note.
    Create {
        #[arg(long)]
        author: String,
        #[arg(long)]
        body: String,
    },
    /// Replace author and body of a note.
    Update {
        id: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        body: String,
    },
    /// Delete a note.
    Delete { id: String },
}

/// Rendered result of one command.
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    stdout: String,
    stderr: String,
    status: u8,
}

impl Outcome {
    fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status)
    }
}

/// UI root; receives the client handle at construction.
struct App<T: Transport> {
    notes: NoteService<T>,
}

impl<T: Transport> App<T> {
    fn new(client: ClientHandle<T>) -> Self {
        Self {
            notes: NoteService::new(client),
        }
    }

    async fn run(&self, command: Command) -> Outcome {
        match self.render(command).await {
            Ok(stdout) => Outcome {
                stdout,
                stderr: String::new(),
                status: 0,
            },
            Err(err) => {
                error!("event=cli_command module=cli status=error error={err}");
                Outcome {
                    stdout: String::new(),
                    stderr: format!("notes: {err}\n"),
                    status: 1,
                }
            }
        }
    }

    async fn render(&self, command: Command) -> Result<String, NoteServiceError> {
        let mut out = String::new();
        match command {
            Command::List => {
                let notes = self.notes.list_notes().await?;
                if notes.is_empty() {
                    out.push_str("No notes.\n");
                }
                for note in &notes {
                    push_note(&mut out, note);
                }
            }
            Command::Create { author, body } => {
                let note = self.notes.create_note(author, body).await?;
                push_note(&mut out, &note);
            }
            Command::Update { id, author, body } => {
                let note = self
                    .notes
                    .update_note(&NoteId::from(id), author, body)
                    .await?;
                push_note(&mut out, &note);
            }
            Command::Delete { id } => {
                let deleted = self.notes.delete_note(&NoteId::from(id)).await?;
                out.push_str(&format!("Deleted {deleted}.\n"));
            }
        }
        Ok(out)
    }
}

fn push_note(out: &mut String, note: &Note) {
    out.push_str(&format!("{}\t{}\t{}\n", note.id, note.author, note.body));
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let sink = cli.log_dir.map(LogSink::Directory).unwrap_or(LogSink::Stderr);
    if let Err(err) = init_logging(level, sink) {
        eprintln!("notes: {err}");
        return ExitCode::FAILURE;
    }

    let client = match ClientConfig::from_env()
        .map_err(BootstrapError::from)
        .and_then(|config| bootstrap(&config))
    {
        Ok(client) => client,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!("notes: {err}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = App::new(client).run(cli.command).await;
    print!("{}", outcome.stdout);
    eprint!("{}", outcome.stderr);
    outcome.exit_code()
}
