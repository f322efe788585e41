#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # JSON:API Reconcile: information-preserving resource merge
//!
//! This crate reconciles two partial representations of the same JSON:API
//! resource (a stored *base* and an incoming *source*) into one record,
//! choosing field by field whichever side carries more information.
//!
//! ## Overview
//!
//! 1. **Presence** - decide whether a value is the default for its kind
//! 2. **Scoring** - recursively count how much non-default data a value holds
//! 3. **Merging** - pick each field of the result from the richer operand
//! 4. **Nullable** - tri-state values that keep "unset" apart from "null"
//!
//! Merging and scoring are pure and never fail. Results share the selected
//! maps with the operands through `Arc`; see [`Node::deep_clone`] for an
//! isolated copy.
//!
//! ## Usage
//!
//! ```
//! use jsonapi_reconcile::{merge_nodes, Node, Nullable, Value};
//!
//! let stored = Node::new("articles", "1").with_attribute("title", "");
//! let update = Node::default()
//!     .with_attribute("title", "Hello")
//!     .with_attribute("archived", Nullable::<bool>::Null);
//!
//! let merged = merge_nodes(&stored, &update);
//! assert_eq!(merged.resource_type, "articles");
//! assert_eq!(merged.id, "1");
//! assert_eq!(merged.attributes["title"], Value::from("Hello"));
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Resource records (Node, Relationship, Value)
//! - **[nullable]** - Tri-state optional values
//! - **[merge]** - Presence classification, scoring and node merging
//! - **[identity]** - Local identifier generation
//! - **[error]** - Error types and result handling

pub mod error;
pub mod identity;
pub mod merge;
pub mod nullable;
pub mod types;

pub use error::{Error, IdError, NullableError, Result};
pub use identity::{IdGenerator, UuidGenerator};
pub use merge::{merge_nodes, MergeConfig, Merger, Side};
pub use nullable::Nullable;
pub use types::{Map, Node, Relationship, Relationships, ToMany, ToOne, Value};
