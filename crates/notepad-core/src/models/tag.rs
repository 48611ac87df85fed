//! Tag model

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{normalize_text_option, now_ms};

use super::id::string_id;

string_id! {
    /// A unique identifier for a tag
    TagId
}

/// A multi-valued label a note may carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: TagId,
    /// Display name (trimmed, case preserved)
    pub name: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Tag {
    /// Create a new tag with the given name
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = normalize_text_option(Some(name.into()))
            .ok_or_else(|| Error::InvalidInput("Tag name cannot be empty".to_string()))?;

        Ok(Self {
            id: TagId::new(),
            name,
            created_at: now_ms(),
        })
    }
}
