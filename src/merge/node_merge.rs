//! Two-way merge of resource nodes.
//!
//! Each field of the result is taken from one operand or the other; nothing
//! is spliced key by key. Identity scalars prefer the source when it is
//! non-empty. Structured fields go to whichever operand has the higher
//! information score, with ties settled by [`MergeConfig::tie_break`].
//!
//! The result shares the selected maps with its operands through [`Arc`].
//! Call [`Node::deep_clone`] on the result if it must be mutated in place
//! independently of the inputs.

use super::presence::Presence;
use super::score::Score;
use crate::types::{Map, Node};
use std::sync::Arc;
use tracing::{instrument, trace};

/// Which operand of a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// The previously stored record
    Base,
    /// The incoming update
    #[default]
    Source,
}

/// Merge behaviour settings.
///
/// # Examples
///
/// ```
/// use jsonapi_reconcile::merge::{MergeConfig, Side};
///
/// let config = MergeConfig::default();
/// assert_eq!(config.tie_break, Side::Source);
/// assert!(config.log_decisions);
/// ```
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Operand that wins when both structured fields score the same
    pub tie_break: Side,

    /// Emit a `trace` event for every structured-field decision
    pub log_decisions: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            tie_break: Side::Source,
            log_decisions: true,
        }
    }
}

/// Merges resource nodes according to a [`MergeConfig`].
///
/// Stateless apart from its configuration; one instance can be shared across
/// threads.
///
/// # Examples
///
/// ```
/// use jsonapi_reconcile::merge::Merger;
/// use jsonapi_reconcile::Node;
///
/// let stored = Node::new("articles", "1").with_attribute("title", "");
/// let update = Node::new("", "").with_attribute("title", "Hello");
///
/// let merged = Merger::default().merge(&stored, &update);
/// assert_eq!(merged.resource_type, "articles");
/// assert_eq!(merged.id, "1");
/// assert_eq!(merged.attributes, update.attributes);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Merger {
    config: MergeConfig,
}

impl Merger {
    /// Create a merger with the given configuration.
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge `source` on top of `base` into a new node.
    ///
    /// Neither operand is modified.
    #[instrument(
        level = "trace",
        name = "merge_nodes",
        skip_all,
        fields(resource_type = %first_non_empty(&source.resource_type, &base.resource_type))
    )]
    pub fn merge(&self, base: &Node, source: &Node) -> Node {
        Node {
            resource_type: first_non_empty(&source.resource_type, &base.resource_type).to_string(),
            id: first_non_empty(&source.id, &base.id).to_string(),
            lid: first_non_empty(&source.lid, &base.lid).to_string(),
            client_id: first_non_empty(&source.client_id, &base.client_id).to_string(),
            attributes: self.pick_mapping("attributes", &base.attributes, &source.attributes),
            relationships: self.pick_mapping(
                "relationships",
                &base.relationships,
                &source.relationships,
            ),
            links: self.pick_optional("links", base.links.as_ref(), source.links.as_ref()),
            meta: self.pick_optional("meta", base.meta.as_ref(), source.meta.as_ref()),
        }
    }

    /// Select between two always-present mappings.
    ///
    /// An empty side loses to a non-empty one without scoring.
    fn pick_mapping<M>(&self, field: &'static str, base: &Arc<M>, source: &Arc<M>) -> Arc<M>
    where
        M: Presence + Score,
    {
        match (base.is_absent(), source.is_absent()) {
            (false, true) => {
                self.log_short_circuit(field, Side::Base);
                Arc::clone(base)
            }
            (true, false) => {
                self.log_short_circuit(field, Side::Source);
                Arc::clone(source)
            }
            _ => self.compare(field, base, source),
        }
    }

    /// Select between two optional mappings, where unset differs from empty.
    fn pick_optional(
        &self,
        field: &'static str,
        base: Option<&Arc<Map>>,
        source: Option<&Arc<Map>>,
    ) -> Option<Arc<Map>> {
        match (base, source) {
            (None, None) => None,
            (Some(base), None) => {
                self.log_short_circuit(field, Side::Base);
                Some(Arc::clone(base))
            }
            (None, Some(source)) => {
                self.log_short_circuit(field, Side::Source);
                Some(Arc::clone(source))
            }
            (Some(base), Some(source)) => Some(self.compare(field, base, source)),
        }
    }

    fn compare<M: Score>(&self, field: &'static str, base: &Arc<M>, source: &Arc<M>) -> Arc<M> {
        let base_score = base.score();
        let source_score = source.score();

        let winner = if base_score > source_score {
            Side::Base
        } else if source_score > base_score {
            Side::Source
        } else {
            self.config.tie_break
        };

        if self.config.log_decisions {
            trace!(field, base_score, source_score, winner = ?winner, "compared scores");
        }

        match winner {
            Side::Base => Arc::clone(base),
            Side::Source => Arc::clone(source),
        }
    }

    fn log_short_circuit(&self, field: &'static str, winner: Side) {
        if self.config.log_decisions {
            trace!(field, winner = ?winner, "only one operand carries data");
        }
    }
}

/// Merge `source` on top of `base` with the default configuration.
///
/// See [`Merger::merge`].
pub fn merge_nodes(base: &Node, source: &Node) -> Node {
    Merger::default().merge(base, source)
}

fn first_non_empty<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_present() {
        preferred
    } else {
        fallback
    }
}
