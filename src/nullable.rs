//! Tri-state optional values for partial update payloads.
//!
//! A PATCH-style payload needs to tell three situations apart for every
//! field: the client did not send it, the client sent `null`, or the client
//! sent a value. `Option<T>` only has two states, and `Option<Option<T>>`
//! hides the meaning of each layer, so [`Nullable`] spells the three states
//! out as an enum.
//!
//! # Serialization
//!
//! `Nullable<T>` serializes as the inner value or `null`. Unspecified fields
//! must be dropped from the output with
//! `skip_serializing_if = "Nullable::is_unspecified"`; combined with
//! `#[serde(default)]` a missing field deserializes back to
//! [`Nullable::Unspecified`].
//!
//! ```
//! use jsonapi_reconcile::Nullable;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Patch {
//!     #[serde(default, skip_serializing_if = "Nullable::is_unspecified")]
//!     title: Nullable<String>,
//!     #[serde(default, skip_serializing_if = "Nullable::is_unspecified")]
//!     archived: Nullable<bool>,
//! }
//!
//! let patch: Patch = serde_json::from_str(r#"{"title": null}"#).unwrap();
//! assert!(patch.title.is_null());
//! assert!(!patch.archived.is_specified());
//! assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"title":null}"#);
//! ```

use crate::error::NullableError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that is unspecified, explicitly null, or set to a value.
///
/// Starts out [`Unspecified`](Nullable::Unspecified). Every setter is a total
/// transition from any state, and the container can be reused indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    /// The field was never set
    Unspecified,
    /// The field was explicitly set to `null`
    Null,
    /// The field holds a value
    Specified(T),
}

impl<T> Nullable<T> {
    /// Create a container holding `value`.
    pub fn with_value(value: T) -> Self {
        Nullable::Specified(value)
    }

    /// Create a container in the explicit-null state.
    pub fn null() -> Self {
        Nullable::Null
    }

    /// Create an unspecified container (same as `Default`).
    pub fn unspecified() -> Self {
        Nullable::Unspecified
    }

    /// Store `value`, replacing whatever was there.
    pub fn set_value(&mut self, value: T) {
        *self = Nullable::Specified(value);
    }

    /// Mark the field as explicitly null.
    pub fn set_null(&mut self) {
        *self = Nullable::Null;
    }

    /// Reset the field to unspecified.
    pub fn clear(&mut self) {
        *self = Nullable::Unspecified;
    }

    /// Whether the field was explicitly set to null.
    pub fn is_null(&self) -> bool {
        matches!(self, Nullable::Null)
    }

    /// Whether the field holds a value.
    ///
    /// Both the unspecified and the null state answer `false`.
    pub fn is_specified(&self) -> bool {
        matches!(self, Nullable::Specified(_))
    }

    /// Whether the field was never set.
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Nullable::Unspecified)
    }

    /// Borrow the held value.
    ///
    /// # Errors
    ///
    /// [`NullableError::Null`] in the null state and
    /// [`NullableError::Unspecified`] when nothing was set.
    pub fn get(&self) -> Result<&T, NullableError> {
        match self {
            Nullable::Specified(value) => Ok(value),
            Nullable::Null => Err(NullableError::Null),
            Nullable::Unspecified => Err(NullableError::Unspecified),
        }
    }

    /// Consume the container and return the held value.
    ///
    /// # Errors
    ///
    /// Same conditions as [`get`](Nullable::get).
    pub fn into_value(self) -> Result<T, NullableError> {
        match self {
            Nullable::Specified(value) => Ok(value),
            Nullable::Null => Err(NullableError::Null),
            Nullable::Unspecified => Err(NullableError::Unspecified),
        }
    }

    /// View as nested options: `None` when unspecified, `Some(None)` when
    /// null, `Some(Some(v))` when set.
    pub fn as_option(&self) -> Option<Option<&T>> {
        match self {
            Nullable::Unspecified => None,
            Nullable::Null => Some(None),
            Nullable::Specified(value) => Some(Some(value)),
        }
    }

    /// Map the held value, keeping the null and unspecified states.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Nullable<U> {
        match self {
            Nullable::Unspecified => Nullable::Unspecified,
            Nullable::Null => Nullable::Null,
            Nullable::Specified(value) => Nullable::Specified(f(value)),
        }
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Unspecified
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Nullable::Specified(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Specified(value) => value.serialize(serializer),
            // Unspecified only reaches here when the field lacks skip_serializing_if
            Nullable::Null | Nullable::Unspecified => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Nullable::Specified(value),
            None => Nullable::Null,
        })
    }
}

/// Shorthand for a set boolean.
pub fn nullable_bool(value: bool) -> Nullable<bool> {
    Nullable::with_value(value)
}

/// Shorthand for an explicitly null boolean.
pub fn null_bool() -> Nullable<bool> {
    Nullable::null()
}

/// Shorthand for a set timestamp.
pub fn nullable_time(value: DateTime<Utc>) -> Nullable<DateTime<Utc>> {
    Nullable::with_value(value)
}

/// Shorthand for an explicitly null timestamp.
pub fn null_time() -> Nullable<DateTime<Utc>> {
    Nullable::null()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Patch {
        #[serde(default, skip_serializing_if = "Nullable::is_unspecified")]
        name: Nullable<String>,
        #[serde(default, skip_serializing_if = "Nullable::is_unspecified")]
        count: Nullable<i64>,
    }

    #[test]
    fn test_fresh_container_is_unspecified() {
        let value: Nullable<String> = Nullable::default();
        assert!(!value.is_specified());
        assert!(!value.is_null());
        assert_eq!(value.get(), Err(NullableError::Unspecified));
    }

    #[test]
    fn test_set_value_then_get() {
        let mut value = Nullable::unspecified();
        value.set_value(42);
        assert!(value.is_specified());
        assert_eq!(value.get(), Ok(&42));
    }

    #[test]
    fn test_set_null_then_get() {
        let mut value = Nullable::with_value("x".to_string());
        value.set_null();
        assert!(value.is_null());
        assert!(!value.is_specified());
        assert_eq!(value.get(), Err(NullableError::Null));
    }

    #[test]
    fn test_clear_returns_to_unspecified() {
        let mut value = nullable_bool(true);
        value.clear();
        assert!(value.is_unspecified());

        value.set_null();
        value.clear();
        assert_eq!(value.into_value(), Err(NullableError::Unspecified));
    }

    #[test]
    fn test_specified_zero_is_still_specified() {
        let value = nullable_bool(false);
        assert!(value.is_specified());
        assert_eq!(value.get(), Ok(&false));
    }

    #[test]
    fn test_as_option_layers() {
        assert_eq!(Nullable::<u8>::Unspecified.as_option(), None);
        assert_eq!(Nullable::<u8>::Null.as_option(), Some(None));
        assert_eq!(Nullable::with_value(3u8).as_option(), Some(Some(&3)));
    }

    #[test]
    fn test_time_helpers() {
        let now = Utc::now();
        assert_eq!(nullable_time(now).get(), Ok(&now));
        assert!(null_time().is_null());
        assert!(null_bool().is_null());
    }

    #[test]
    fn test_serialize_skips_unspecified() {
        let patch = Patch {
            name: Nullable::null(),
            count: Nullable::unspecified(),
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"name": null}));

        let patch = Patch {
            name: Nullable::with_value("a".to_string()),
            count: Nullable::with_value(0),
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"name": "a", "count": 0})
        );
    }

    #[test]
    fn test_deserialize_three_states() {
        let patch: Patch = serde_json::from_value(json!({"name": null, "count": 7})).unwrap();
        assert!(patch.name.is_null());
        assert_eq!(patch.count.get(), Ok(&7));

        let patch: Patch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.name.is_unspecified());
        assert!(patch.count.is_unspecified());
    }
}
