mod common;

use common::{
    Dto, DtoCollection, IndexCollection, IndexCompositeKeyCollection, IndexStringCollection,
    OptionalNameCollection, Tagged, TaggedCollection,
};
use std::sync::Arc;
use typedset::{Collection, IndexKey, Scalar};

#[test]
fn test_integer_index() {
    let collection = Collection::<IndexCollection>::from_items([
        Dto::new(1, "first"),
        Dto::new(2, "second"),
        Dto::new(3, "third"),
    ]);

    let dto = collection.get(2).expect("id 2 is indexed");
    assert_eq!(dto.id, 2);

    assert!(collection.get(5).is_none());
}

#[test]
fn test_string_index_accepts_any_text() {
    let index_key = "длинное имя, чтобы проверить что ключ может быть любой строкой";

    let collection = Collection::<IndexStringCollection>::from_items([
        Dto::new(1, "first"),
        Dto::new(2, "second"),
        Dto::new(3, "third"),
        Dto::new(4, index_key),
    ]);

    let dto = collection.get(index_key).expect("long key is indexed");
    assert_eq!(dto.id, 4);
    assert_eq!(collection.get(String::from("second")).map(|dto| dto.id), Some(2));
}

#[test]
fn test_composite_index() {
    let collection = Collection::<IndexCompositeKeyCollection>::from_items([
        Dto::new(1, "one"),
        Dto::new(2, "two"),
        Dto::new(3, "three"),
        Dto::new(2, "four"),
    ]);

    let dto = collection.get((2, "two")).expect("(2, two) is indexed");
    assert_eq!(dto.id, 2);
    assert_eq!(dto.name, "two");

    assert!(collection.get((3, "two")).is_none());
    assert!(collection.get(2).is_none());
}

#[test]
fn test_composite_key_from_scalars() {
    let collection = Collection::<IndexCompositeKeyCollection>::from_items([Dto::new(9, "nine")]);
    let key = IndexKey::Composite(vec![Scalar::Integer(9), Scalar::from("nine")]);

    assert_eq!(collection.get(key).map(|dto| dto.id), Some(9));
}

#[test]
fn test_detach_removes_index_entry() {
    let item = Dto::new(2, "second");

    let mut collection = Collection::<IndexCollection>::new();
    collection.attach(Dto::new(1, "first"));
    collection.attach(Arc::clone(&item));
    collection.detach(&item);

    assert_eq!(collection.len(), 1);
    assert!(collection.get(2).is_none());
    assert!(collection.get(1).is_some());
}

#[test]
fn test_attach_twice_then_detach() {
    let item = Dto::new(1, "a");
    let mut collection = Collection::<IndexCollection>::new();

    collection.attach(Arc::clone(&item));
    collection.attach(Arc::clone(&item));
    assert_eq!(collection.len(), 1);

    collection.detach(&item);
    assert_eq!(collection.len(), 0);
    assert!(collection.get(1).is_none());
}

#[test]
fn test_colliding_key_latest_attach_wins() {
    let older = Dto::new(1, "older");
    let newer = Dto::new(1, "newer");

    let mut collection = Collection::<IndexCollection>::new();
    collection.attach(Arc::clone(&older));
    collection.attach(Arc::clone(&newer));

    assert_eq!(collection.len(), 2);
    assert!(Arc::ptr_eq(collection.get(1).unwrap(), &newer));
    assert_eq!(collection.index_len(), 1);
}

#[test]
fn test_reattach_reclaims_key() {
    let older = Dto::new(1, "older");
    let newer = Dto::new(1, "newer");

    let mut collection = Collection::<IndexCollection>::new();
    collection.attach(Arc::clone(&older));
    collection.attach(Arc::clone(&newer));
    collection.attach(Arc::clone(&older));

    assert_eq!(collection.len(), 2);
    assert!(Arc::ptr_eq(collection.get(1).unwrap(), &older));
    // Position is kept from the first attach.
    assert!(Arc::ptr_eq(collection.first().unwrap(), &older));
}

#[test]
fn test_detaching_overwritten_owner_keeps_newer_entry() {
    let older = Dto::new(1, "older");
    let newer = Dto::new(1, "newer");

    let mut collection = Collection::<IndexCollection>::new();
    collection.attach(Arc::clone(&older));
    collection.attach(Arc::clone(&newer));
    collection.detach(&older);

    assert_eq!(collection.len(), 1);
    assert!(Arc::ptr_eq(collection.get(1).unwrap(), &newer));
}

#[test]
fn test_detaching_current_owner_leaves_key_unresolved() {
    let older = Dto::new(1, "older");
    let newer = Dto::new(1, "newer");

    let mut collection = Collection::<IndexCollection>::new();
    collection.attach(Arc::clone(&older));
    collection.attach(Arc::clone(&newer));
    collection.detach(&newer);

    // The older item stays stored but lost the key to `newer`.
    assert!(collection.contains(&older));
    assert!(collection.get(1).is_none());
}

#[test]
fn test_unindexed_policy_never_resolves() {
    let collection = Collection::<DtoCollection>::from_items([Dto::new(1, "first")]);

    assert!(collection.get(1).is_none());
    assert!(collection.get("first").is_none());
    assert_eq!(collection.index_len(), 0);
}

#[test]
fn test_absent_keys_are_not_indexed() {
    let collection = Collection::<OptionalNameCollection>::from_items([
        Dto::new(1, ""),
        Dto::new(2, "named"),
    ]);

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.index_len(), 1);
    assert!(collection.get("").is_none());
    assert_eq!(collection.get("named").map(|dto| dto.id), Some(2));
}

#[test]
fn test_empty_lookup_keys_resolve_to_nothing() {
    let collection = Collection::<IndexStringCollection>::from_items([Dto::new(1, "first")]);

    assert!(collection.get("").is_none());
    assert!(collection.get(IndexKey::Composite(Vec::new())).is_none());
}

#[test]
fn test_integer_and_text_keys_share_canonical_form() {
    let collection = Collection::<IndexStringCollection>::from_items([Dto::new(1, "42")]);

    assert_eq!(collection.get(42).map(|dto| dto.id), Some(1));
    assert_eq!(collection.get("42").map(|dto| dto.id), Some(1));
}

#[test]
fn test_clear_resets_index() {
    let mut collection = Collection::<IndexCollection>::from_items([Dto::new(1, "a"), Dto::new(2, "b")]);
    collection.clear();

    assert!(collection.get(1).is_none());
    assert_eq!(collection.index_len(), 0);

    collection.attach(Dto::new(1, "again"));
    assert_eq!(collection.get(1).map(|dto| dto.name.as_str()), Some("again"));
}

#[test]
fn test_reattach_after_rekey_drops_stale_key() {
    let item = Tagged::new("x");
    let mut collection = Collection::<TaggedCollection>::new();
    let handle = collection.attach(Arc::clone(&item));

    item.retag("y");
    assert_eq!(collection.attach(Arc::clone(&item)), handle);

    assert!(collection.get("x").is_none());
    assert!(Arc::ptr_eq(collection.get("y").unwrap(), &item));
    assert_eq!(collection.index_len(), 1);
}

#[test]
fn test_reattach_with_absent_key_drops_own_entry() {
    let item = Tagged::new("x");
    let other = Tagged::new("z");
    let mut collection = Collection::<TaggedCollection>::from_items([
        Arc::clone(&item),
        Arc::clone(&other),
    ]);

    item.retag("");
    collection.attach(Arc::clone(&item));

    assert!(collection.get("x").is_none());
    assert!(Arc::ptr_eq(collection.get("z").unwrap(), &other));
    assert_eq!(collection.index_len(), 1);
    assert_eq!(collection.len(), 2);
}
