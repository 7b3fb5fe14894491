use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stickynote_core::config::DEFAULT_STORAGE_KEY;
use stickynote_core::NoteId;

#[derive(Parser, Debug)]
#[command(name = "stickynote")]
#[command(version, about = "Manage sticky notes stored in a local SQLite slot")]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database holding the storage slot
    #[arg(long, global = true, default_value = "stickynote.db")]
    pub db: PathBuf,

    /// Storage key of the notes collection
    #[arg(long, global = true, default_value = DEFAULT_STORAGE_KEY)]
    pub key: String,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes in collection order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Append a new note
    Add {
        /// Initial content (empty when omitted)
        #[arg(default_value = "")]
        content: String,
    },

    /// Print the full content of one note
    Show { id: NoteId },

    /// Replace the content of a note
    Edit {
        id: NoteId,
        content: String,
    },

    /// Delete a note
    Delete { id: NoteId },

    /// Print the raw persisted collection blob
    Dump,

    /// Remove the collection and its id counter
    Reset,
}
