//! Validation result types for rubric checks.
//!
//! A [`ValidationResult`] carries the ordered list of human-readable
//! violation messages produced while checking a score record. It is the
//! wire shape returned to graders, so field names follow the client
//! (`isValid`, `errors`).

use serde::{Deserialize, Serialize};

/// Result of validating a score record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the validation passed (no errors)
    pub is_valid: bool,

    /// Violation messages in the order they were detected
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a new successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Create a validation result from a list of messages
    pub fn with_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Append an error to this validation result
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    /// Merge another validation result into this one, keeping order
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consume the result, yielding the messages
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
