use super::engine::Collection;
use super::policy::CollectionPolicy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Serializes as a sequence of items in iteration order.
impl<P> Serialize for Collection<P>
where
    P: CollectionPolicy,
    P::Item: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|item| &**item))
    }
}

/// Deserializes a sequence of items, attaching each as a fresh instance so
/// the index is rebuilt through the policy.
impl<'de, P> Deserialize<'de> for Collection<P>
where
    P: CollectionPolicy,
    P::Item: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<P::Item>::deserialize(deserializer)?;
        Ok(items.into_iter().map(Arc::new).collect())
    }
}
