use crate::core::{ElementType, IndexKey};
use std::any::Any;

/// Declares what a concrete collection stores and how its items are indexed.
///
/// A policy is a type-level description: collections are parameterized by it
/// (`Collection<P>`) and never hold a policy value.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use typedset::{Collection, CollectionPolicy, IndexKey};
///
/// struct User {
///     id: i64,
///     email: String,
/// }
///
/// struct UsersByEmail;
///
/// impl CollectionPolicy for UsersByEmail {
///     type Item = User;
///
///     fn index_by(user: &User) -> Option<IndexKey> {
///         Some(IndexKey::from(user.email.as_str()))
///     }
/// }
///
/// let mut users = Collection::<UsersByEmail>::new();
/// users.attach(User { id: 1, email: "ann@example.com".into() });
/// assert_eq!(users.get("ann@example.com").map(|u| u.id), Some(1));
/// ```
pub trait CollectionPolicy {
    /// Declared element type.
    type Item: Any + Send + Sync;

    /// Derives the secondary lookup key of an item.
    ///
    /// `None`, an empty text key and an empty composite all keep the item out
    /// of the secondary index. The default indexes nothing.
    fn index_by(_item: &Self::Item) -> Option<IndexKey> {
        None
    }

    fn element_type() -> ElementType {
        ElementType::of::<Self::Item>()
    }
}
