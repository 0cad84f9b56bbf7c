use thiserror::Error;

/// One failed rule for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

/// Schema validation failure: every violated rule, in declared field
/// order. Low severity, surfaced to the user verbatim and never logged as
/// an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", self.first_message())]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Message of the first violated rule in declared field order. This is
    /// what the action factory places into the `error` field.
    pub fn first_message(&self) -> &'static str {
        self.violations
            .first()
            .map(|v| v.message)
            .unwrap_or("Invalid input")
    }

    /// All violation messages joined into one user-facing string.
    pub fn joined_messages(&self) -> String {
        if self.violations.is_empty() {
            return "Invalid input".to_string();
        }
        self.violations
            .iter()
            .map(|v| v.message)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
