//! Identifier generation for resources created on the client.
//!
//! New resources need a local identifier (`lid`) before they can be
//! referenced from relationships or reconciled against a stored copy. The
//! merge engine never generates identifiers itself; callers assign them up
//! front with [`assign_local_id`].
//!
//! # Examples
//!
//! ```
//! use jsonapi_reconcile::identity::{assign_local_id, UuidGenerator};
//! use jsonapi_reconcile::Node;
//!
//! let mut node = Node::new("articles", "");
//! let assigned = assign_local_id(&mut node, Some(&UuidGenerator)).unwrap();
//! assert!(assigned);
//! assert_eq!(node.lid.len(), 36);
//! ```

use crate::error::IdError;
use crate::types::Node;
use tracing::debug;
use uuid::Uuid;

/// Source of fresh identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce a new, non-empty identifier.
    fn generate(&self) -> Result<String, IdError>;
}

/// Closures can act as generators, which keeps tests and adapters short.
impl<F> IdGenerator for F
where
    F: Fn() -> Result<String, IdError> + Send + Sync,
{
    fn generate(&self) -> Result<String, IdError> {
        self()
    }
}

/// Generates random (v4) UUIDs in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> Result<String, IdError> {
        Ok(Uuid::new_v4().to_string())
    }
}

/// Give `node` a local identifier if it has neither `id` nor `lid`.
///
/// Returns `Ok(true)` when a `lid` was assigned and `Ok(false)` when the node
/// was already identified.
///
/// # Errors
///
/// [`IdError::MissingGenerator`] when `generator` is `None`, and
/// [`IdError::GenerationFailed`] when the generator fails or returns an empty
/// string. The node is left untouched on error.
pub fn assign_local_id(node: &mut Node, generator: Option<&dyn IdGenerator>) -> Result<bool, IdError> {
    let generator = generator.ok_or(IdError::MissingGenerator)?;

    if node.is_identified() {
        return Ok(false);
    }

    let lid = generator.generate()?;
    if lid.is_empty() {
        return Err(IdError::GenerationFailed {
            reason: "generator returned an empty identifier".to_string(),
        });
    }

    debug!(resource_type = %node.resource_type, lid = %lid, "assigned local id");
    node.lid = lid;
    Ok(true)
}
