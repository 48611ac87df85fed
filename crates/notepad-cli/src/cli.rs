use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "notepad")]
#[command(about = "Notes with categories, tags, images and reminders")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Category id or name (defaults to the default category)
        #[arg(short, long)]
        category: Option<String>,
        /// Note content; read from stdin when omitted
        content: Vec<String>,
    },
    /// List notes, pinned first then most recently updated
    #[command(alias = "ls")]
    List {
        /// Only notes in this category (id or name)
        #[arg(long)]
        category: Option<String>,
        /// Only notes with this tag (id or name)
        #[arg(long)]
        tag: Option<String>,
        /// Case-insensitive text in title, content or tag names
        #[arg(short, long)]
        search: Option<String>,
        /// Maximum number of notes to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single note
    Show {
        /// Note ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit title, content or category of a note
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New content ("-" reads stdin)
        #[arg(long)]
        content: Option<String>,
        /// Move to this category (id or name)
        #[arg(long, conflicts_with = "no_category")]
        category: Option<String>,
        /// Detach the note from its category
        #[arg(long)]
        no_category: bool,
    },
    /// Toggle the pinned flag
    Pin {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Delete a note and cancel its reminder
    #[command(alias = "rm")]
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Manage note images
    #[command(subcommand)]
    Image(ImageCommand),
    /// Manage tags
    #[command(subcommand)]
    Tag(TagCommand),
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage reminders
    #[command(subcommand)]
    Remind(RemindCommand),
    /// Manage application settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
pub enum ImageCommand {
    /// Attach an image file to a note
    Add {
        /// Note ID or unique ID prefix
        id: String,
        /// Image file to attach
        path: PathBuf,
        /// Caption for the image
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Remove the image at a zero-based index
    Remove {
        /// Note ID or unique ID prefix
        id: String,
        /// Zero-based image index
        index: usize,
    },
}

#[derive(Subcommand)]
pub enum TagCommand {
    /// Create a tag
    Create {
        /// Tag name
        name: String,
    },
    /// List tags with usage counts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an unused tag
    Delete {
        /// Tag id or name
        tag: String,
    },
    /// Attach a tag to a note
    Add {
        /// Note ID or unique ID prefix
        id: String,
        /// Tag id or name
        tag: String,
    },
    /// Detach a tag from a note
    Remove {
        /// Note ID or unique ID prefix
        id: String,
        /// Tag id or name
        tag: String,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// Create a category
    Create {
        /// Category name
        name: String,
    },
    /// List categories with note counts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an unused category
    Delete {
        /// Category id or name
        category: String,
    },
}

#[derive(Subcommand)]
pub enum RemindCommand {
    /// Set a reminder ("YYYY-MM-DD HH:MM" local time, or RFC 3339)
    Set {
        /// Note ID or unique ID prefix
        id: String,
        /// When to remind
        when: String,
    },
    /// Clear a reminder
    Clear {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// List pending reminders
    Pending {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print and dequeue reminders that are due
    Due,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// List all settings
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one setting
    Get {
        /// Setting key
        key: String,
    },
    /// Set a setting (booleans and numbers are detected)
    Set {
        /// Setting key
        key: String,
        /// Setting value
        value: String,
    },
    /// Remove a setting
    Unset {
        /// Setting key
        key: String,
    },
}
