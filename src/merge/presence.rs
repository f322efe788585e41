//! Presence classification: does a value carry any information?
//!
//! A value is *absent* when it equals the default for its kind: the null
//! sentinel, an empty string, zero, `false`, the zero timestamp, an empty
//! collection, or a [`Nullable`] that is unspecified or explicitly null.
//! Everything else is *present*.
//!
//! Explicit null is absent here even though [`Nullable::is_null`] keeps it
//! distinct from unspecified. Null tells the receiver to clear a field, but
//! it carries no content, so it must not make an operand look richer.

use crate::nullable::Nullable;
use crate::types::{Node, Relationship, ToMany, ToOne, Value};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Classifies a value as present or absent.
///
/// Implemented for every field kind a [`Node`] can hold, so classification
/// is resolved statically per type.
pub trait Presence {
    /// Whether the value is the default for its kind.
    fn is_absent(&self) -> bool;

    /// Inverse of [`is_absent`](Presence::is_absent).
    fn is_present(&self) -> bool {
        !self.is_absent()
    }
}

/// Whether `value` carries no information.
///
/// ```
/// use jsonapi_reconcile::merge::is_absent;
/// use jsonapi_reconcile::{Nullable, Value};
///
/// assert!(is_absent(""));
/// assert!(is_absent(&0i64));
/// assert!(is_absent(&Nullable::<bool>::Null));
/// assert!(!is_absent(&Nullable::with_value(false)));
/// assert!(!is_absent(&Value::from("hi")));
/// ```
pub fn is_absent<T: Presence + ?Sized>(value: &T) -> bool {
    value.is_absent()
}

macro_rules! default_is_absent {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Presence for $ty {
                fn is_absent(&self) -> bool {
                    *self == <$ty>::default()
                }
            }
        )*
    };
}

default_is_absent!(bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl Presence for str {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl Presence for String {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

/// The zero instant is the Unix epoch, which is also `DateTime::default()`.
impl Presence for DateTime<Utc> {
    fn is_absent(&self) -> bool {
        *self == DateTime::<Utc>::default()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_absent(&self) -> bool {
        match self {
            None => true,
            Some(value) => value.is_absent(),
        }
    }
}

/// A specified value is present even when it holds its type's default.
impl<T> Presence for Nullable<T> {
    fn is_absent(&self) -> bool {
        !self.is_specified()
    }
}

impl<T: Presence + ?Sized> Presence for Box<T> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Presence + ?Sized> Presence for Arc<T> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T> Presence for [T] {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Presence for BTreeMap<K, V> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Presence for HashMap<K, V, S> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl Presence for Value {
    fn is_absent(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => b.is_absent(),
            Value::Int(i) => i.is_absent(),
            Value::Float(f) => f.is_absent(),
            Value::String(s) => s.is_absent(),
            Value::Time(t) => t.is_absent(),
            Value::Nullable(n) => n.is_absent(),
            Value::List(items) => items.is_absent(),
            Value::Map(map) => map.is_absent(),
            Value::Node(node) => node.is_absent(),
        }
    }
}

/// A node is absent only when every field is at its default.
impl Presence for Node {
    fn is_absent(&self) -> bool {
        self.resource_type.is_absent()
            && self.id.is_absent()
            && self.lid.is_absent()
            && self.client_id.is_absent()
            && self.attributes.is_absent()
            && self.relationships.is_absent()
            && self.links.is_none()
            && self.meta.is_none()
    }
}

impl Presence for ToOne {
    fn is_absent(&self) -> bool {
        self.data.is_absent() && self.links.is_none() && self.meta.is_none()
    }
}

impl Presence for ToMany {
    fn is_absent(&self) -> bool {
        self.data.is_absent() && self.links.is_none() && self.meta.is_none()
    }
}

impl Presence for Relationship {
    fn is_absent(&self) -> bool {
        match self {
            Relationship::ToOne(rel) => rel.is_absent(),
            Relationship::ToMany(rel) => rel.is_absent(),
        }
    }
}
