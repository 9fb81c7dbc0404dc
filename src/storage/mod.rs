pub mod identity;
pub mod index;

pub use identity::{Handle, IdentityStore, Iter};
pub use index::SecondaryIndex;
