//! Resource record types consumed and produced by the merge engine.
//!
//! A [`Node`] is the in-memory form of a JSON:API resource object. Decoding
//! and encoding live elsewhere; this module only describes the shape the
//! merge engine works on.
//!
//! # Sharing
//!
//! The structured parts of a node (`attributes`, `relationships`, `links`,
//! `meta`) sit behind [`Arc`]. Cloning a node, or merging two nodes, shares
//! those maps instead of copying them. Builders go through
//! [`Arc::make_mut`], so mutating a shared map through a builder copies it
//! first and never touches the other owner. Use [`Node::deep_clone`] when a
//! fully independent copy is needed.
//!
//! # Examples
//!
//! ```
//! use jsonapi_reconcile::{Node, Relationship, Value};
//!
//! let author = Node::new("people", "9");
//! let article = Node::new("articles", "1")
//!     .with_attribute("title", "Rails is Omakase")
//!     .with_relationship("author", Relationship::to_one(author))
//!     .with_link("self", "/articles/1");
//!
//! assert_eq!(article.attributes["title"], Value::from("Rails is Omakase"));
//! assert!(article.links.is_some());
//! assert!(article.meta.is_none());
//! ```

use crate::nullable::Nullable;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name-to-value mapping used for attributes, links and meta.
pub type Map = BTreeMap<String, Value>;

/// Relationship name to descriptor mapping.
pub type Relationships = BTreeMap<String, Relationship>;

/// An attribute, link or meta value of arbitrary shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value
    #[default]
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating point scalar
    Float(f64),
    /// String scalar
    String(String),
    /// Point in time
    Time(DateTime<Utc>),
    /// Tri-state value carried through from a partial update payload
    Nullable(Nullable<Box<Value>>),
    /// Ordered sequence
    List(Vec<Value>),
    /// Nested mapping
    Map(Map),
    /// Embedded resource record
    Node(Box<Node>),
}

impl Value {
    /// Copy this value, rebuilding any shared maps inside embedded nodes.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Nullable(inner) => {
                Value::Nullable(inner.clone().map(|v| Box::new(v.deep_clone())))
            }
            Value::List(items) => Value::List(items.iter().map(Value::deep_clone).collect()),
            Value::Map(map) => Value::Map(deep_clone_map(map)),
            Value::Node(node) => Value::Node(Box::new(node.deep_clone())),
            scalar => scalar.clone(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Time(value)
    }
}

impl From<Node> for Value {
    fn from(value: Node) -> Self {
        Value::Node(Box::new(value))
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl<T: Into<Value>> From<Nullable<T>> for Value {
    fn from(value: Nullable<T>) -> Self {
        Value::Nullable(value.map(|v| Box::new(v.into())))
    }
}

/// Bridge from decoded JSON.
///
/// Integers that fit `i64` become [`Value::Int`]; every other number becomes
/// [`Value::Float`].
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Relationship to a single related resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToOne {
    /// The related resource, if any
    pub data: Option<Box<Node>>,
    /// Relationship-level links
    pub links: Option<Arc<Map>>,
    /// Relationship-level meta
    pub meta: Option<Arc<Map>>,
}

/// Relationship to an ordered list of related resources.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToMany {
    /// The related resources, in order
    pub data: Vec<Node>,
    /// Relationship-level links
    pub links: Option<Arc<Map>>,
    /// Relationship-level meta
    pub meta: Option<Arc<Map>>,
}

/// A relationship descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Relationship {
    /// At most one related resource
    ToOne(ToOne),
    /// Any number of related resources
    ToMany(ToMany),
}

impl Relationship {
    /// To-one relationship pointing at `node`.
    pub fn to_one(node: Node) -> Self {
        Relationship::ToOne(ToOne {
            data: Some(Box::new(node)),
            ..Default::default()
        })
    }

    /// To-one relationship with no related resource.
    pub fn empty_to_one() -> Self {
        Relationship::ToOne(ToOne::default())
    }

    /// To-many relationship over `nodes`.
    pub fn to_many(nodes: impl IntoIterator<Item = Node>) -> Self {
        Relationship::ToMany(ToMany {
            data: nodes.into_iter().collect(),
            ..Default::default()
        })
    }

    /// Relationship-level links.
    pub fn links(&self) -> Option<&Arc<Map>> {
        match self {
            Relationship::ToOne(rel) => rel.links.as_ref(),
            Relationship::ToMany(rel) => rel.links.as_ref(),
        }
    }

    /// Relationship-level meta.
    pub fn meta(&self) -> Option<&Arc<Map>> {
        match self {
            Relationship::ToOne(rel) => rel.meta.as_ref(),
            Relationship::ToMany(rel) => rel.meta.as_ref(),
        }
    }

    /// Attach relationship-level links.
    pub fn with_links(mut self, links: Map) -> Self {
        let links = Some(Arc::new(links));
        match &mut self {
            Relationship::ToOne(rel) => rel.links = links,
            Relationship::ToMany(rel) => rel.links = links,
        }
        self
    }

    /// Attach relationship-level meta.
    pub fn with_meta(mut self, meta: Map) -> Self {
        let meta = Some(Arc::new(meta));
        match &mut self {
            Relationship::ToOne(rel) => rel.meta = meta,
            Relationship::ToMany(rel) => rel.meta = meta,
        }
        self
    }

    /// Copy this descriptor without sharing any map with the original.
    pub fn deep_clone(&self) -> Relationship {
        match self {
            Relationship::ToOne(rel) => Relationship::ToOne(ToOne {
                data: rel.data.as_ref().map(|node| Box::new(node.deep_clone())),
                links: deep_clone_optional(&rel.links),
                meta: deep_clone_optional(&rel.meta),
            }),
            Relationship::ToMany(rel) => Relationship::ToMany(ToMany {
                data: rel.data.iter().map(Node::deep_clone).collect(),
                links: deep_clone_optional(&rel.links),
                meta: deep_clone_optional(&rel.meta),
            }),
        }
    }
}

/// A resource record.
///
/// Identity fields are plain strings where the empty string means "not set".
/// `links` and `meta` distinguish "unset" (`None`) from "set but empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    /// Resource type, e.g. `"articles"`
    pub resource_type: String,
    /// Server-assigned identifier
    pub id: String,
    /// Local identifier for resources the server has not seen yet
    pub lid: String,
    /// Client-assigned identifier
    pub client_id: String,
    /// Attribute values by name
    pub attributes: Arc<Map>,
    /// Relationship descriptors by name
    pub relationships: Arc<Relationships>,
    /// Resource-level links
    pub links: Option<Arc<Map>>,
    /// Resource-level meta
    pub meta: Option<Arc<Map>>,
}

impl Node {
    /// Create a node with a type and id.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Node {
            resource_type: resource_type.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the local identifier.
    pub fn with_lid(mut self, lid: impl Into<String>) -> Self {
        self.lid = lid.into();
        self
    }

    /// Set the client identifier.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Insert an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.attributes).insert(name.into(), value.into());
        self
    }

    /// Insert a relationship.
    pub fn with_relationship(mut self, name: impl Into<String>, relationship: Relationship) -> Self {
        Arc::make_mut(&mut self.relationships).insert(name.into(), relationship);
        self
    }

    /// Insert a resource-level link, creating the links map if unset.
    pub fn with_link(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let links = self.links.get_or_insert_with(Default::default);
        Arc::make_mut(links).insert(name.into(), value.into());
        self
    }

    /// Insert a resource-level meta entry, creating the meta map if unset.
    pub fn with_meta(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let meta = self.meta.get_or_insert_with(Default::default);
        Arc::make_mut(meta).insert(name.into(), value.into());
        self
    }

    /// Whether the node carries a server or local identifier.
    pub fn is_identified(&self) -> bool {
        !self.id.is_empty() || !self.lid.is_empty()
    }

    /// Copy this node without sharing any map with the original.
    ///
    /// Merge results share maps with their operands; call this on a result
    /// before handing it to code that mutates maps in place.
    pub fn deep_clone(&self) -> Node {
        Node {
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
            lid: self.lid.clone(),
            client_id: self.client_id.clone(),
            attributes: Arc::new(deep_clone_map(&self.attributes)),
            relationships: Arc::new(
                self.relationships
                    .iter()
                    .map(|(name, rel)| (name.clone(), rel.deep_clone()))
                    .collect(),
            ),
            links: deep_clone_optional(&self.links),
            meta: deep_clone_optional(&self.meta),
        }
    }
}

fn deep_clone_map(map: &Map) -> Map {
    map.iter()
        .map(|(key, value)| (key.clone(), value.deep_clone()))
        .collect()
}

fn deep_clone_optional(map: &Option<Arc<Map>>) -> Option<Arc<Map>> {
    map.as_ref().map(|m| Arc::new(deep_clone_map(m)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders_fill_maps() {
        let node = Node::new("articles", "1")
            .with_lid("tmp-1")
            .with_client_id("c-1")
            .with_attribute("views", 10)
            .with_meta("rev", 3);

        assert_eq!(node.resource_type, "articles");
        assert_eq!(node.lid, "tmp-1");
        assert_eq!(node.client_id, "c-1");
        assert_eq!(node.attributes["views"], Value::Int(10));
        assert!(node.links.is_none());
        assert_eq!(node.meta.as_ref().unwrap()["rev"], Value::Int(3));
    }

    #[test]
    fn test_builder_does_not_touch_shared_map() {
        let original = Node::new("articles", "1").with_attribute("title", "a");
        let edited = original.clone().with_attribute("body", "b");

        assert_eq!(original.attributes.len(), 1);
        assert_eq!(edited.attributes.len(), 2);
    }

    #[test]
    fn test_clone_shares_maps() {
        let node = Node::new("articles", "1").with_attribute("title", "a");
        let copy = node.clone();
        assert!(Arc::ptr_eq(&node.attributes, &copy.attributes));
    }

    #[test]
    fn test_deep_clone_shares_nothing() {
        let author = Node::new("people", "9").with_attribute("name", "Dan");
        let node = Node::new("articles", "1")
            .with_attribute("title", "a")
            .with_attribute("editor", author.clone())
            .with_relationship("author", Relationship::to_one(author))
            .with_link("self", "/articles/1");

        let copy = node.deep_clone();
        assert_eq!(copy, node);
        assert!(!Arc::ptr_eq(&node.attributes, &copy.attributes));
        assert!(!Arc::ptr_eq(&node.relationships, &copy.relationships));
        assert!(!Arc::ptr_eq(
            node.links.as_ref().unwrap(),
            copy.links.as_ref().unwrap()
        ));

        let (Value::Node(orig_editor), Value::Node(copy_editor)) =
            (&node.attributes["editor"], &copy.attributes["editor"])
        else {
            panic!("Expected embedded nodes");
        };
        assert!(!Arc::ptr_eq(&orig_editor.attributes, &copy_editor.attributes));
    }

    #[test]
    fn test_relationship_accessors() {
        let mut links = Map::new();
        links.insert("related".to_string(), Value::from("/articles/1/comments"));

        let rel = Relationship::to_many(vec![Node::new("comments", "5")]).with_links(links);
        assert!(rel.links().is_some());
        assert!(rel.meta().is_none());

        let Relationship::ToMany(many) = &rel else {
            panic!("Expected to-many relationship");
        };
        assert_eq!(many.data.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({
            "title": "Hello",
            "views": 3,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "draft": false,
            "extra": null
        }));

        let Value::Map(map) = value else {
            panic!("Expected map");
        };
        assert_eq!(map["title"], Value::from("Hello"));
        assert_eq!(map["views"], Value::Int(3));
        assert_eq!(map["ratio"], Value::Float(0.5));
        assert_eq!(
            map["tags"],
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(map["draft"], Value::Bool(false));
        assert_eq!(map["extra"], Value::Null);
    }

    #[test]
    fn test_is_identified() {
        assert!(Node::new("articles", "1").is_identified());
        assert!(Node::default().with_lid("l").is_identified());
        assert!(!Node::default().with_client_id("c").is_identified());
    }
}
