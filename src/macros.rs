/// Declares a [`CollectionPolicy`](crate::CollectionPolicy) unit struct.
///
/// Without a `by` clause the policy indexes nothing. With one, the closure-like
/// body derives the index key from the item; it may evaluate to anything
/// convertible into an [`IndexKey`](crate::IndexKey), tuples included.
///
/// ```
/// use typedset::{Collection, collection_policy};
///
/// pub struct Dto {
///     pub id: i64,
///     pub name: String,
/// }
///
/// collection_policy!(pub DtoSet<Dto>);
/// collection_policy!(pub DtoById<Dto> by |dto| dto.id);
/// collection_policy!(pub DtoByIdAndName<Dto> by |dto| (dto.id, dto.name.as_str()));
///
/// let mut by_pair = Collection::<DtoByIdAndName>::new();
/// by_pair.attach(Dto { id: 2, name: "two".into() });
/// assert!(by_pair.get((2, "two")).is_some());
/// assert!(by_pair.get((3, "two")).is_none());
/// ```
#[macro_export]
macro_rules! collection_policy {
    ($(#[$meta:meta])* $vis:vis $name:ident<$item:ty>) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::CollectionPolicy for $name {
            type Item = $item;
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident<$item:ty> by |$arg:ident| $key:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::CollectionPolicy for $name {
            type Item = $item;

            fn index_by($arg: &$item) -> ::std::option::Option<$crate::IndexKey> {
                ::std::option::Option::Some($crate::IndexKey::from($key))
            }
        }
    };
}
