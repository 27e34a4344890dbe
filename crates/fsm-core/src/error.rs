//! Core error types for ESFSM Stock
//!
//! Every rule violation a user can trigger ends up as a [`ValidationErrors`]
//! collection wrapped in [`FsmError::Validation`].

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsmError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid stock configuration: {0}")]
    Config(String),
}

impl FsmError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        FsmError::NotFound { entity, id }
    }

    /// Shortcut for a single base validation message
    pub fn validation(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        FsmError::Validation(errors)
    }

    /// Stable identifier for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            FsmError::NotFound { .. } => "not_found",
            FsmError::Validation(_) => "validation_failed",
            FsmError::Config(_) => "bad_config",
        }
    }

    /// The collected validation messages, if this is a user-facing rule failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            FsmError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Messages keyed by the field (or product) they are about
///
/// Base messages concern the action as a whole, such as
/// "No materials to take.".
#[derive(Error, Debug, Default, Clone, PartialEq)]
#[error("{}", self.full_messages().join("; "))]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, Vec<String>>,
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.base_errors.is_empty() && self.errors.is_empty()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Base messages first, then "<field> <message>" in field order
    pub fn full_messages(&self) -> Vec<String> {
        let keyed = self
            .errors
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{} {}", field, m)));
        self.base_errors.iter().cloned().chain(keyed).collect()
    }

    /// `Ok(())` when empty, otherwise the collection as an error
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
