//! Core of the study-design compiler.
//!
//! A caller describes a statistical study declaratively: variables with
//! marginal distributions, plus pairwise correlation effects between them.
//! This crate validates that description, resolves the effects into
//! per-variable linear formulas with adjusted residual variances, and
//! serializes the result as the program text the external generation runtime
//! executes.
//!
//! Every operation is a synchronous pure function of the design passed in;
//! no state is retained between calls, so concurrent use needs no
//! coordination. The surrounding service (HTTP routing, persistence, the R
//! runtime itself) lives elsewhere and only consumes these functions.

pub mod codegen;
pub mod graph;
pub mod model;
pub mod resolve;
pub mod validation;

pub use codegen::generate_script;
pub use graph::{available_sources, available_targets, conflicting_nodes, path_exists};
pub use model::{
    DataType, Distribution, Effect, EffectKind, Instrument, InstrumentItem, StudyDesign,
    StudyNode, StudyType, Variable, MAX_GENERATION_N, PREVIEW_LIMIT,
};
pub use resolve::{resolve, ResolvedModel, ResolvedNode, ResolvedParent};
pub use validation::{validate, validate_value, IssueKind, ValidationIssue, ValidationReport};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("design failed validation with {} error(s)", .0.len())]
    InvalidDesign(Vec<ValidationIssue>),
}

/// Validates, resolves and serializes a design in one call, the sequence the
/// serving layer runs for a generation request. The requested row count is
/// clamped to [`MAX_GENERATION_N`].
pub fn compile(design: &StudyDesign, rows: u32) -> Result<String, CompileError> {
    let report = validate(design);
    if !report.valid {
        return Err(CompileError::InvalidDesign(report.errors));
    }

    let resolved = resolve(design);
    Ok(generate_script(design, &resolved, rows.min(MAX_GENERATION_N)))
}
