//! Shared data types all other components operate on.
pub mod design;
pub mod node;

// Re-export key types for convenient access
pub use design::{
    Effect, EffectKind, StudyDesign, StudyType, MAX_CATEGORIES, MAX_GENERATION_N, MAX_NAME_LEN,
    MAX_NUMERIC_MAGNITUDE, MIN_CATEGORIES, PREVIEW_LIMIT,
};
pub use node::{
    DataType, Distribution, DistributionKind, Instrument, InstrumentItem, Moments, Scale,
    ScaleItem, StudyNode, Variable,
};
