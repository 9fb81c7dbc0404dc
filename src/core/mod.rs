pub mod error;
pub mod key;
pub mod types;
pub mod value;

pub use error::{CollectionError, Result};
pub use key::{CanonicalKey, IndexKey, KEY_SEPARATOR};
pub use types::ElementType;
pub use value::Scalar;
