//! Information scoring.
//!
//! The score approximates how much non-default data a value carries. The
//! merge engine compares scores to decide which operand of a structured field
//! is richer.
//!
//! # Rules
//!
//! | Value | Score |
//! |-------|-------|
//! | Absent scalar, empty collection, unset option | 0 |
//! | Present scalar | 1 |
//! | Non-empty mapping or sequence | 1 + sum of element scores |
//! | [`Node`] | non-empty identity fields + scores of attributes, relationships, links, meta |
//! | [`Relationship`] | 1 + node score per present related resource, + links + meta |
//! | Specified [`Nullable`] | score of the held value, at least 1 |
//!
//! ```
//! use jsonapi_reconcile::merge::score;
//! use jsonapi_reconcile::{Map, Value};
//!
//! let mut attrs = Map::new();
//! assert_eq!(score(&attrs), 0);
//!
//! attrs.insert("title".to_string(), Value::from(""));
//! assert_eq!(score(&attrs), 1);
//!
//! attrs.insert("body".to_string(), Value::from("text"));
//! assert_eq!(score(&attrs), 2);
//! ```

use super::presence::Presence;
use crate::nullable::Nullable;
use crate::types::{Node, Relationship, ToMany, ToOne, Value};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Computes the information score of a value.
pub trait Score {
    /// Non-negative score; 0 means "carries nothing".
    fn score(&self) -> usize;
}

/// Information score of `value`.
pub fn score<T: Score + ?Sized>(value: &T) -> usize {
    value.score()
}

macro_rules! scalar_score {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Score for $ty {
                fn score(&self) -> usize {
                    usize::from(self.is_present())
                }
            }
        )*
    };
}

scalar_score!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64, str, String,
    DateTime<Utc>
);

impl<T: Score> Score for Option<T> {
    fn score(&self) -> usize {
        self.as_ref().map_or(0, Score::score)
    }
}

impl<T: Score> Score for Nullable<T> {
    fn score(&self) -> usize {
        match self {
            Nullable::Specified(value) => value.score().max(1),
            Nullable::Null | Nullable::Unspecified => 0,
        }
    }
}

impl<T: Score + ?Sized> Score for Box<T> {
    fn score(&self) -> usize {
        (**self).score()
    }
}

impl<T: Score + ?Sized> Score for Arc<T> {
    fn score(&self) -> usize {
        (**self).score()
    }
}

impl<T: Score> Score for [T] {
    fn score(&self) -> usize {
        container_score(self.iter())
    }
}

impl<T: Score> Score for Vec<T> {
    fn score(&self) -> usize {
        self.as_slice().score()
    }
}

impl<K, V: Score> Score for BTreeMap<K, V> {
    fn score(&self) -> usize {
        container_score(self.values())
    }
}

impl<K, V: Score, S> Score for HashMap<K, V, S> {
    fn score(&self) -> usize {
        container_score(self.values())
    }
}

/// One point for being non-empty plus the elements' scores.
fn container_score<'a, T: Score + 'a>(items: impl Iterator<Item = &'a T>) -> usize {
    let mut total = 0;
    let mut seen_any = false;
    for item in items {
        seen_any = true;
        total += item.score();
    }
    if seen_any {
        total + 1
    } else {
        0
    }
}

impl Score for Value {
    fn score(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Bool(b) => b.score(),
            Value::Int(i) => i.score(),
            Value::Float(f) => f.score(),
            Value::String(s) => s.score(),
            Value::Time(t) => t.score(),
            Value::Nullable(n) => n.score(),
            Value::List(items) => items.score(),
            Value::Map(map) => map.score(),
            Value::Node(node) => node.score(),
        }
    }
}

impl Score for Node {
    fn score(&self) -> usize {
        let identity = [&self.resource_type, &self.id, &self.lid, &self.client_id]
            .into_iter()
            .filter(|field| field.is_present())
            .count();

        identity
            + self.attributes.score()
            + self.relationships.score()
            + self.links.score()
            + self.meta.score()
    }
}

/// A related resource counts one point for being there plus its own score.
fn related_score(node: &Node) -> usize {
    if node.is_absent() {
        0
    } else {
        1 + node.score()
    }
}

impl Score for ToOne {
    fn score(&self) -> usize {
        self.data.as_deref().map_or(0, related_score) + self.links.score() + self.meta.score()
    }
}

impl Score for ToMany {
    fn score(&self) -> usize {
        self.data.iter().map(related_score).sum::<usize>() + self.links.score() + self.meta.score()
    }
}

impl Score for Relationship {
    fn score(&self) -> usize {
        match self {
            Relationship::ToOne(rel) => rel.score(),
            Relationship::ToMany(rel) => rel.score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Map;
    use serde_json::json;

    fn map_of(value: serde_json::Value) -> Map {
        match Value::from(value) {
            Value::Map(map) => map,
            other => panic!("Expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_scalars() {
        assert_eq!(score(""), 0);
        assert_eq!(score("a"), 1);
        assert_eq!(score(&0i64), 0);
        assert_eq!(score(&7i64), 1);
        assert_eq!(score(&Value::Null), 0);
        assert_eq!(score(&Value::Bool(true)), 1);
        assert_eq!(score(&Value::Time(DateTime::<Utc>::default())), 0);
        assert_eq!(score(&Value::Time(Utc::now())), 1);
    }

    #[test]
    fn test_nullable() {
        assert_eq!(score(&Nullable::<String>::Unspecified), 0);
        assert_eq!(score(&Nullable::<String>::Null), 0);
        assert_eq!(score(&Nullable::with_value(false)), 1);
        assert_eq!(score(&Nullable::with_value(vec![1i64, 2])), 3);
    }

    #[test]
    fn test_flat_map() {
        assert_eq!(score(&map_of(json!({}))), 0);
        assert_eq!(score(&map_of(json!({"a": 1}))), 2);
        assert_eq!(score(&map_of(json!({"a": 1, "b": "", "c": null}))), 2);
    }

    #[test]
    fn test_nested_containers() {
        // 1 (outer) + [1 (list) + 1 + 1] + [1 (inner map) + 1]
        let map = map_of(json!({"tags": ["x", "y"], "dims": {"w": 3}}));
        assert_eq!(score(&map), 6);

        // empty nested containers contribute nothing, outer still counts
        let map = map_of(json!({"tags": [], "dims": {}}));
        assert_eq!(score(&map), 1);
    }

    #[test]
    fn test_node_score() {
        assert_eq!(score(&Node::default()), 0);

        let node = Node::new("articles", "1")
            .with_lid("l")
            .with_client_id("c")
            .with_attribute("title", "x");
        // 4 identity + (1 + 1) attributes
        assert_eq!(score(&node), 6);

        let node = Node::new("articles", "").with_link("self", "/a");
        // 1 identity + (1 + 1) links
        assert_eq!(score(&node), 3);
    }

    #[test]
    fn test_unset_and_empty_links_score_zero() {
        let mut node = Node::new("articles", "1");
        assert_eq!(score(&node), 2);
        node.links = Some(Arc::new(Map::new()));
        assert_eq!(score(&node), 2);
    }

    #[test]
    fn test_to_one_relationship() {
        assert_eq!(score(&Relationship::empty_to_one()), 0);

        // 1 (present) + 2 (type, id)
        let rel = Relationship::to_one(Node::new("people", "9"));
        assert_eq!(score(&rel), 3);

        let rel = rel.with_meta(map_of(json!({"count": 1})));
        assert_eq!(score(&rel), 5);
    }

    #[test]
    fn test_to_one_with_absent_node() {
        let rel = Relationship::to_one(Node::default());
        assert_eq!(score(&rel), 0);
    }

    #[test]
    fn test_to_many_relationship() {
        let rel = Relationship::to_many(vec![
            Node::new("comments", "1"),
            Node::new("comments", "2").with_attribute("body", "hi"),
        ]);
        // (1 + 2) + (1 + 2 + 2)
        assert_eq!(score(&rel), 8);
        assert_eq!(score(&Relationship::to_many(Vec::new())), 0);
    }

    #[test]
    fn test_relationship_map() {
        let mut rels = BTreeMap::new();
        rels.insert("author".to_string(), Relationship::to_one(Node::new("people", "9")));
        rels.insert("editor".to_string(), Relationship::empty_to_one());
        // 1 (non-empty map) + 3 + 0
        assert_eq!(score(&rels), 4);
    }

    #[test]
    fn test_embedded_node_in_attributes() {
        let mut attrs = Map::new();
        attrs.insert("owner".to_string(), Value::from(Node::new("people", "9")));
        // 1 + 2
        assert_eq!(score(&attrs), 3);
    }
}
