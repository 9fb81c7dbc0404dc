//! Everything needed to declare and use a collection.
//!
//! ```
//! use typedset::prelude::*;
//!
//! struct Tag(&'static str);
//!
//! collection_policy!(Tags<Tag> by |tag| tag.0);
//!
//! let tags: Collection<Tags> = [Tag("rust"), Tag("serde")]
//!     .into_iter()
//!     .map(std::sync::Arc::new)
//!     .collect();
//! assert_eq!(tags.len(), 2);
//! assert!(tags.get("serde").is_some());
//! ```

pub use crate::collection_policy;
pub use crate::{
    AnyItem, Collection, CollectionConfig, CollectionError, CollectionPolicy, IndexKey, Scalar,
};
