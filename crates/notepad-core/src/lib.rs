//! notepad-core - Core library for Notepad
//!
//! This crate contains the note model, slot persistence, reminder scheduling
//! and query logic used by the Notepad front ends.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod reminder;
pub mod services;
pub mod store;
mod util;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::{
    Category, CategoryId, Note, NoteId, NoteImage, SettingValue, SettingsMap, Tag, TagId,
};
pub use query::NoteQuery;
pub use services::{LocalNotebook, Notebook};
pub use util::truncate_chars;
