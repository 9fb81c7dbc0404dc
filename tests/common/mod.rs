#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use typedset::{CollectionPolicy, IndexKey, collection_policy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dto {
    pub id: i64,
    pub name: String,
}

impl Dto {
    pub fn new(id: i64, name: &str) -> Arc<Self> {
        Arc::new(Self {
            id,
            name: name.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct Other;

collection_policy!(pub DtoCollection<Dto>);
collection_policy!(pub IndexCollection<Dto> by |dto| dto.id);
collection_policy!(pub IndexStringCollection<Dto> by |dto| dto.name.as_str());
collection_policy!(pub IndexCompositeKeyCollection<Dto> by |dto| (dto.id, dto.name.as_str()));

/// Indexes by name, leaving nameless items out of the index.
pub struct OptionalNameCollection;

impl CollectionPolicy for OptionalNameCollection {
    type Item = Dto;

    fn index_by(dto: &Dto) -> Option<IndexKey> {
        if dto.name.is_empty() {
            None
        } else {
            Some(IndexKey::from(dto.name.as_str()))
        }
    }
}

/// Item whose key can change while it is attached.
#[derive(Debug)]
pub struct Tagged {
    pub tag: Mutex<String>,
}

impl Tagged {
    pub fn new(tag: &str) -> Arc<Self> {
        Arc::new(Self {
            tag: Mutex::new(tag.to_string()),
        })
    }

    pub fn retag(&self, tag: &str) {
        *self.tag.lock().unwrap() = tag.to_string();
    }
}

/// Indexes by the current tag; an empty tag is absent.
pub struct TaggedCollection;

impl CollectionPolicy for TaggedCollection {
    type Item = Tagged;

    fn index_by(item: &Tagged) -> Option<IndexKey> {
        let tag = item.tag.lock().ok()?;
        if tag.is_empty() {
            None
        } else {
            Some(IndexKey::from(tag.as_str()))
        }
    }
}

pub fn ids<'a, I>(items: I) -> Vec<i64>
where
    I: IntoIterator<Item = &'a Arc<Dto>>,
{
    items.into_iter().map(|dto| dto.id).collect()
}
