// ============================================================================
// typedset Library
// ============================================================================

pub mod collection;
pub mod config;
pub mod core;
pub mod prelude;
pub mod storage;
mod macros;

// Re-export main types for convenience
pub use collection::{AnyItem, Collection, CollectionPolicy};
pub use config::CollectionConfig;
pub use core::{CanonicalKey, CollectionError, ElementType, IndexKey, Result, Scalar};
pub use storage::Handle;
