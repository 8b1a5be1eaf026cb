//! Canonical unparser for Go expression and type syntax trees.
//!
//! - `ast` holds the arena-allocated tree a parser hands over.
//! - `unparse` renders any node into a compact, deterministic string key.
//! - `walk` traverses a tree, `builder` constructs one.

pub mod ast;
pub mod builder;
pub mod error;
pub mod unparse;
pub mod walk;

// Re-exports for convenience
pub use builder::TreeBuilder;
pub use error::TreeError;
pub use unparse::{render, Unparser};
