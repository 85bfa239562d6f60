//! Structural validation of study designs.
//!
//! The validator is the gate between editing and generation: it checks the
//! schema, naming, reference and acyclicity invariants and reports every
//! finding as structured data. Nothing here throws; a design is either
//! accepted or described.

// Publicly export the primary components for use by other modules.
pub use self::error::{IssueKind, ValidationIssue, ValidationReport};
pub use self::validator::{validate, validate_value};

// --- MODULE DECLARATIONS ---
mod error;
mod schema;
mod validator;

pub use schema::is_valid_name;
