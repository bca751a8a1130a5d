//! Accessors for HAL links and embedded resources.
//!
//! These never fail: a relation that is missing, or a resource whose
//! `_links`/`_embedded` section is absent or empty, yields `None` (or an
//! empty collection).

use serde_json::Value;

/// Relation naming the members of a collection.
pub const ITEMS: &str = "items";

/// Relation pointing at the following page of a collection.
pub const NEXT: &str = "next";

const LINKS: &str = "_links";
const EMBEDDED: &str = "_embedded";

/// The `href` of `relation` in `resource`'s `_links`.
pub fn link_href<'a>(resource: &'a Value, relation: &str) -> Option<&'a str> {
    resource
        .get(LINKS)?
        .get(relation)?
        .get("href")?
        .as_str()
}

/// The resource embedded under `relation`. A `null` entry counts as absent.
pub fn embedded<'a>(resource: &'a Value, relation: &str) -> Option<&'a Value> {
    resource
        .get(EMBEDDED)?
        .get(relation)
        .filter(|value| !value.is_null())
}

/// Every item href of a collection, in server order.
pub fn item_hrefs(collection: &Value) -> Vec<&str> {
    collection
        .get(LINKS)
        .and_then(|links| links.get(ITEMS))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|link| link.get("href").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

/// The embedded item resources of a collection. Empty unless the
/// collection was fetched with items embedded.
pub fn embedded_items(collection: &Value) -> &[Value] {
    embedded(collection, ITEMS)
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}

/// The relation names present in `resource`'s `_links`.
pub fn link_relations(resource: &Value) -> impl Iterator<Item = &str> {
    resource
        .get(LINKS)
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|links| links.keys().map(String::as_str))
}
