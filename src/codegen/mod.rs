//! Code generation for the external statistical runtime.

// Publicly export the primary components for use by other modules.
pub use self::record::{records, NodeRecord, RecordBody};
pub use self::script::generate_script;

// --- MODULE DECLARATIONS ---
mod record;
mod script;
