//! Outcome of a user-facing action
//!
//! Wizards and form actions report either a value, with an optional notice
//! for display, or the validation errors that stopped them. Nothing is
//! written when they fail.

use std::collections::BTreeMap;
use std::fmt;

use fsm_core::error::{FsmError, ValidationErrors};
use fsm_core::result::FsmResult;

static NO_ERRORS: ValidationErrors = ValidationErrors {
    errors: BTreeMap::new(),
    base_errors: Vec::new(),
};

#[derive(Debug)]
pub struct ServiceResult<T> {
    outcome: Result<T, ValidationErrors>,
    /// Notice for display, e.g. material still out with the technician
    message: Option<String>,
}

impl<T> ServiceResult<T> {
    pub fn success(result: T) -> Self {
        Self {
            outcome: Ok(result),
            message: None,
        }
    }

    pub fn success_with_message(result: T, message: impl Into<String>) -> Self {
        Self {
            outcome: Ok(result),
            message: Some(message.into()),
        }
    }

    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            outcome: Err(errors),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }

    pub fn result(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    /// Errors of a failed action; empty on success
    pub fn errors(&self) -> &ValidationErrors {
        match &self.outcome {
            Ok(_) => &NO_ERRORS,
            Err(errors) => errors,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors().full_messages()
    }

    /// Back to a plain result, for callers that chain with `?`
    pub fn into_result(self) -> FsmResult<T> {
        self.outcome.map_err(FsmError::Validation)
    }
}

impl<T> From<FsmResult<T>> for ServiceResult<T> {
    fn from(result: FsmResult<T>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(FsmError::Validation(errors)) => Self::failure(errors),
            Err(other) => {
                let mut errors = ValidationErrors::new();
                errors.add_base(other.to_string());
                Self::failure(errors)
            }
        }
    }
}

impl<T> From<Result<T, ValidationErrors>> for ServiceResult<T> {
    fn from(outcome: Result<T, ValidationErrors>) -> Self {
        Self {
            outcome,
            message: None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServiceResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.outcome, &self.message) {
            (Ok(value), Some(message)) => write!(f, "{} ({})", value, message),
            (Ok(value), None) => write!(f, "{}", value),
            (Err(errors), _) => write!(f, "rejected: {}", errors.full_messages().join("; ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_no_errors() {
        let done = ServiceResult::success("WH/REV/00001");
        assert!(done.is_success());
        assert_eq!(done.result(), Some(&"WH/REV/00001"));
        assert!(done.errors().is_empty());
        assert!(done.message().is_none());
    }

    #[test]
    fn test_validation_error_becomes_failure() {
        let result: ServiceResult<i32> = Err(FsmError::validation("No materials to take.")).into();
        assert!(result.is_failure());
        assert_eq!(result.full_messages(), vec!["No materials to take.".to_string()]);
    }

    #[test]
    fn test_missing_record_becomes_base_error() {
        let result: ServiceResult<i32> = Err(FsmError::not_found("Job", 3)).into();
        assert!(result.is_failure());
        assert!(result.full_messages()[0].contains("Job"));
    }

    #[test]
    fn test_into_result_keeps_errors() {
        assert_eq!(ServiceResult::success(1).into_result().unwrap(), 1);

        let mut errors = ValidationErrors::new();
        errors.add("used_qty", "exceeds taken quantity");
        let err = ServiceResult::<i32>::failure(errors).into_result().unwrap_err();
        assert!(err.validation_errors().unwrap().has_error("used_qty"));
    }

    #[test]
    fn test_display() {
        let done = ServiceResult::success_with_message("WH/OUT/00002", "4 left to return");
        assert_eq!(done.to_string(), "WH/OUT/00002 (4 left to return)");

        let mut errors = ValidationErrors::new();
        errors.add_base("No materials to return.");
        let rejected: ServiceResult<&str> = ServiceResult::failure(errors);
        assert_eq!(rejected.to_string(), "rejected: No materials to return.");
    }
}
