//! Field-keyed validation errors
//!
//! Business failures are synchronous validation-level errors: there is
//! nothing transient to retry.

use std::collections::HashMap;
use thiserror::Error;

/// Field-keyed validation errors, reported distinctly from business-rule
/// failures.
#[derive(Error, Debug, Default, Clone)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> message
    pub errors: HashMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&String> {
        self.errors.get(field)
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{} {}", field, msg))
            .collect();
        messages.sort();
        messages
    }
}
