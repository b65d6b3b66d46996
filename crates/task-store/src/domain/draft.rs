//! Draft Input State
//!
//! The not-yet-submitted text of the next task.

use super::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    text: String,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the draft (called on every keystroke)
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// True when the draft is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Take the draft for submission.
    ///
    /// Returns the text exactly as typed (not trimmed) and clears the draft.
    /// A blank draft is rejected and left untouched.
    pub fn submit(&mut self) -> Result<String, ValidationError> {
        if self.is_blank() {
            return Err(ValidationError::EmptyTask);
        }
        Ok(std::mem::take(&mut self.text))
    }
}
