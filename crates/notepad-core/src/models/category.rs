//! Category model

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{normalize_text_option, now_ms};

use super::id::string_id;

/// Name of the category every installation starts with.
pub const DEFAULT_CATEGORY_NAME: &str = "Default";

string_id! {
    /// A unique identifier for a category
    CategoryId
}

/// A single-valued grouping a note may belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,
    /// Display name (not unique)
    pub name: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Category {
    /// Create a new category with the given name
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = normalize_text_option(Some(name.into()))
            .ok_or_else(|| Error::InvalidInput("Category name cannot be empty".to_string()))?;

        Ok(Self {
            id: CategoryId::new(),
            name,
            created_at: now_ms(),
        })
    }

    /// Create the privileged default category
    #[must_use]
    pub fn default_category() -> Self {
        Self {
            id: CategoryId::new(),
            name: DEFAULT_CATEGORY_NAME.to_string(),
            created_at: now_ms(),
        }
    }

    /// Whether this is the privileged default category
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CATEGORY_NAME
    }
}
