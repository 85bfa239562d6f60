//! The effect-resolution engine.
//!
//! Consumes a validator-passing design and computes, for every variable with
//! incoming effects, a linear formula and an adjusted residual variance.
//! Total over its precondition: it never fails, it only skips what it cannot
//! use.

// Publicly export the primary components for use by other modules.
pub use self::engine::{resolve, ResolvedModel, ResolvedNode, ResolvedParent};
pub use self::formula::{format_number, LinearFormula};

// --- MODULE DECLARATIONS ---
mod engine;
mod formula;
