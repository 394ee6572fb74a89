//! Title validation for lists and todos

use super::ValidationError;

/// Minimum title length, in characters, after trimming
const MIN_TITLE_LEN: usize = 1;

/// Maximum title length, in characters, after trimming
const MAX_TITLE_LEN: usize = 100;

/// Validated, trimmed title
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    /// Create a title for the given field, trimming surrounding whitespace.
    ///
    /// # Rules
    /// - 1 to 100 characters once trimmed (counted as chars, not bytes)
    ///
    /// # Example
    /// ```
    /// use tickoff_server::models::Title;
    ///
    /// assert_eq!(Title::new("  Groceries ", "The list title").unwrap().as_str(), "Groceries");
    /// assert!(Title::new("   ", "The list title").is_err());
    /// ```
    pub fn new(s: &str, field: &'static str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        let len = trimmed.chars().count();

        if !(MIN_TITLE_LEN..=MAX_TITLE_LEN).contains(&len) {
            return Err(ValidationError::Length {
                field,
                min: MIN_TITLE_LEN,
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Title for a todo list.
    pub fn list(s: &str) -> Result<Self, ValidationError> {
        Self::new(s, "The list title")
    }

    /// Title for a todo.
    pub fn todo(s: &str) -> Result<Self, ValidationError> {
        Self::new(s, "Todo title")
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
