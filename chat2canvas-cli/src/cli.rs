use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "canvas")]
#[command(version)]
#[command(about = "Plan projects as kanban boards and trade them with AI chats as Canvas Code")]
#[command(long_about = "
canvas keeps a set of project boards in a local snapshot. Each project has
ordered columns, each column ordered cards, and each card a checklist.

Boards move in and out of AI chats as Canvas Code, a small JSON format:
  canvas prompt creator            # instructions for the assistant
  canvas import reply.txt          # paste the assistant's answer back
  canvas prompt sync               # share progress for review

Configuration is read from chat2canvas.{toml,yaml,json} in the current
directory and from CHAT2CANVAS_* environment variables.
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the board snapshot (overrides configuration)
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all projects
    Projects,
    /// Create a project with the default columns and make it active
    New {
        /// Project name
        name: String,
    },
    /// Rename a project
    Rename {
        /// Project id
        id: String,
        /// New name
        name: String,
    },
    /// Delete a project and everything in it
    Delete {
        /// Project id
        id: String,
    },
    /// Make a project active
    Use {
        /// Project id
        id: String,
    },
    /// Show the active project (or the one given) as a board
    Show {
        /// Project id instead of the active one
        #[arg(long)]
        project: Option<String>,
    },
    /// Manage columns of the active project
    Column {
        #[command(subcommand)]
        subcommand: ColumnCommands,
    },
    /// Manage cards of the active project
    Card {
        #[command(subcommand)]
        subcommand: CardCommands,
    },
    /// Manage card checklists
    Task {
        #[command(subcommand)]
        subcommand: TaskCommands,
    },
    /// Import Canvas Code as a new active project
    #[command(long_about = "
Import Canvas Code as a new active project.

The input may be a whole AI reply: the first complete JSON object is used
and any surrounding text or markdown fences are ignored. Reads standard
input when FILE is omitted or '-'.
")]
    Import {
        /// File to read, or '-' for standard input
        file: Option<PathBuf>,
    },
    /// Print a project as Canvas Code
    Export {
        /// Project id instead of the active one
        #[arg(long)]
        project: Option<String>,
    },
    /// Print a prompt to paste into an AI chat
    Prompt {
        #[arg(value_enum)]
        kind: PromptKind,
    },
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommands {
    /// Append a column
    Add {
        /// Column title
        title: String,
        /// Column color (defaults to configuration)
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename or recolor a column
    Edit {
        /// Column id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a column and its cards
    Delete {
        /// Column id
        id: String,
    },
    /// Move a column to a new position
    Move {
        /// Current position (0-based)
        from: usize,
        /// New position (0-based)
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// Append a card to a column
    Add {
        /// Column id
        column: String,
        /// Card title
        title: String,
        /// Card color (defaults to configuration)
        #[arg(long)]
        color: Option<String>,
        /// Checklist item (repeatable)
        #[arg(long = "task", value_name = "TEXT")]
        tasks: Vec<String>,
    },
    /// Edit a card's title or color
    Edit {
        /// Card id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a card
    Delete {
        /// Card id
        id: String,
    },
    /// Move a card to another column (or within its own)
    Move {
        /// Card id
        id: String,
        /// Target column id
        to: String,
        /// Position in the target column; appends when omitted
        #[arg(long)]
        index: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Flip a checklist item between done and not done
    Toggle {
        /// Card id
        card: String,
        /// Checklist position (0-based)
        index: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// Instructions that make an assistant produce Canvas Code
    Creator,
    /// Short reminder of the exact Canvas Code format
    Reminder,
    /// The active project with a request for review
    Sync,
}
