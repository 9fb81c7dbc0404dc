pub mod engine;
pub mod policy;
mod serialize;

pub use engine::{AnyItem, Collection};
pub use policy::CollectionPolicy;
