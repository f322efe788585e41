//! Information-preserving merge of resource nodes.
//!
//! This module reconciles two partial views of the same resource: a `base`
//! (usually what is already stored) and a `source` (usually an incoming
//! update). Instead of blindly overwriting, each field of the result comes
//! from whichever operand carries more information, so an update payload
//! that omits data does not erase it.
//!
//! # Field Policies
//!
//! | Field | Kind | Policy |
//! |-------|------|--------|
//! | `resource_type`, `id`, `lid`, `client_id` | Scalar | source if non-empty, else base |
//! | `attributes`, `relationships` | Mapping | empty side loses; higher score wins; tie → source |
//! | `links`, `meta` | Optional mapping | unset side loses; higher score wins; tie → source |
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Presence`] | Classifies a value as present or absent |
//! | [`Score`] | Recursive information score |
//! | [`Merger`] | Merge engine carrying a [`MergeConfig`] |
//!
//! # Examples
//!
//! ## Applying a partial update
//!
//! ```
//! use jsonapi_reconcile::merge::merge_nodes;
//! use jsonapi_reconcile::Node;
//!
//! let stored = Node::new("articles", "1")
//!     .with_attribute("title", "Draft")
//!     .with_attribute("body", "Lorem ipsum");
//! let update = Node::new("articles", "").with_attribute("title", "Final");
//!
//! let merged = merge_nodes(&stored, &update);
//! assert_eq!(merged.id, "1");
//! // the stored attributes carry more information and survive
//! assert_eq!(merged.attributes, stored.attributes);
//! ```
//!
//! ## Shared results
//!
//! ```
//! use jsonapi_reconcile::merge::merge_nodes;
//! use jsonapi_reconcile::Node;
//! use std::sync::Arc;
//!
//! let base = Node::new("articles", "1");
//! let source = Node::new("articles", "1").with_link("self", "/articles/1");
//!
//! let merged = merge_nodes(&base, &source);
//! assert!(Arc::ptr_eq(merged.links.as_ref().unwrap(), source.links.as_ref().unwrap()));
//!
//! let isolated = merged.deep_clone();
//! assert!(!Arc::ptr_eq(isolated.links.as_ref().unwrap(), source.links.as_ref().unwrap()));
//! ```

mod node_merge;
mod presence;
mod score;

pub use node_merge::{merge_nodes, MergeConfig, Merger, Side};
pub use presence::{is_absent, Presence};
pub use score::{score, Score};
