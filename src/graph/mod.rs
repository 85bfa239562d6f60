//! Reachability and cycle queries over the effect graph, used interactively
//! while a design is being edited.
pub mod adjacency;
pub mod conflicts;
pub mod queries;

// Re-export key operations for convenient access
pub use adjacency::path_exists;
pub use conflicts::conflicting_nodes;
pub use queries::{available_sources, available_targets};
