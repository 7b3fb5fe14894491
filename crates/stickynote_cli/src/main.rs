//! StickyNote command line host.
//!
//! Operates on the same whole-collection store the browser widget uses,
//! backed by a SQLite key-value slot instead of `localStorage`.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;
use stickynote_core::{
    default_log_level, init_logging, NoteService, NoteServiceError, NoteStore, SqliteSlot,
    StorageSlot,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let slot = SqliteSlot::open(&cli.db)?;
    let service = NoteService::new(NoteStore::new(slot, cli.key));

    match cli.command {
        Commands::List { json } => {
            let notes = service.list_notes()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else if notes.is_empty() {
                println!("no notes");
            } else {
                for note in notes {
                    println!("{:>6}  {}", note.id, first_line(&note.content));
                }
            }
        }
        Commands::Add { content } => {
            let note = service.create_note_with(content)?;
            println!("added note {}", note.id);
        }
        Commands::Show { id } => match service.get_note(id)? {
            Some(note) => println!("{}", note.content),
            None => return Err(NoteServiceError::NoteNotFound(id).into()),
        },
        Commands::Edit { id, content } => {
            service.update_note(id, content)?;
            println!("updated note {id}");
        }
        Commands::Delete { id } => {
            let removed = service.delete_note(id)?;
            if removed == 0 {
                println!("note {id} was already absent");
            } else {
                println!("deleted note {id}");
            }
        }
        Commands::Dump => {
            let store = service.store();
            let raw = store.slot().get_item(store.key())?;
            println!("{}", raw.as_deref().unwrap_or("[]"));
        }
        Commands::Reset => {
            service.reset()?;
            println!("notes cleared");
        }
    }

    Ok(())
}

fn first_line(content: &str) -> &str {
    content.lines().next().unwrap_or("")
}
