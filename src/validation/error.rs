//! Defines the structured issue types produced by the validator.

use serde::Serialize;

/// The specific category of a validation issue.
///
// This enum allows for programmatic inspection of issues, which is more
// robust than string matching on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    /// The design's shape or field values violate the entity model.
    Schema,
    /// A variable or item name is declared more than once.
    DuplicateName,
    /// An effect references a name that does not exist.
    DanglingReference,
    /// An effect whose source and target are the same name.
    SelfLoop,
    /// An effect endpoint whose distribution carries no mean/variance.
    CategoricalEndpoint,
    /// The effect graph contains a directed cycle.
    Cycle,
}

/// A single finding, addressed by a path into the design document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Where in the design the issue sits, e.g. `nodes[2]` or `effects[0]`.
    pub path: String,
    /// A human-readable message explaining the issue.
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, path: path.into(), message: message.into() }
    }
}

/// The validator's verdict: every applicable issue, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<ValidationIssue>) -> Self {
        Self { valid: errors.is_empty(), errors }
    }

    pub fn ok() -> Self {
        Self { valid: true, errors: Vec::new() }
    }
}
