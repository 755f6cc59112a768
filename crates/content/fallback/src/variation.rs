//! Request variation context and contextualization of culture/segment pairs.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use content_types::{ContentVariation, NodeId, VariationSettings};
use serde::{Deserialize, Serialize};

use crate::traits::VariationContextAccessor;

/// The culture and segment a request is rendered in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationContext {
    pub culture: Option<String>,
    pub segment: Option<String>,
    /// Segments that apply to individual nodes only
    #[serde(default)]
    pub node_segments: HashMap<NodeId, String>,
}

impl VariationContext {
    pub fn new(culture: Option<String>, segment: Option<String>) -> Self {
        Self {
            culture,
            segment,
            node_segments: HashMap::new(),
        }
    }

    pub fn with_node_segment(mut self, node: NodeId, segment: impl Into<String>) -> Self {
        self.node_segments.insert(node, segment.into());
        self
    }

    /// Segment for a node: its own override, else the request segment.
    pub fn segment_for(&self, node: Option<NodeId>) -> Option<&str> {
        node.and_then(|id| self.node_segments.get(&id))
            .or(self.segment.as_ref())
            .map(String::as_str)
    }
}

impl From<&VariationSettings> for VariationContext {
    fn from(settings: &VariationSettings) -> Self {
        Self::new(settings.culture.clone(), settings.segment.clone())
    }
}

/// A contextualized culture/segment pair, ready for value lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Variant {
    pub culture: Option<String>,
    pub segment: Option<String>,
}

impl Variant {
    pub fn culture(&self) -> Option<&str> {
        self.culture.as_deref()
    }

    pub fn segment(&self) -> Option<&str> {
        self.segment.as_deref()
    }
}

/// Variation context accessor holding one replaceable context.
#[derive(Debug, Default)]
pub struct StaticVariationContextAccessor {
    context: RwLock<Option<VariationContext>>,
}

impl StaticVariationContextAccessor {
    pub fn new(context: Option<VariationContext>) -> Self {
        Self {
            context: RwLock::new(context),
        }
    }

    pub fn from_settings(settings: &VariationSettings) -> Self {
        Self::new(Some(VariationContext::from(settings)))
    }

    pub fn set(&self, context: Option<VariationContext>) {
        *self.context.write().unwrap_or_else(PoisonError::into_inner) = context;
    }
}

impl VariationContextAccessor for StaticVariationContextAccessor {
    fn variation_context(&self) -> Option<VariationContext> {
        self.context
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Normalizes requested culture/segment against a property's variation.
pub trait ContextualizeVariation {
    /// A culture (segment) is dropped when the property does not vary by
    /// culture (segment). When it does and none was requested, the request
    /// context supplies it; segments honour per-node overrides.
    fn contextualize(
        &self,
        variation: ContentVariation,
        content_id: Option<NodeId>,
        culture: Option<&str>,
        segment: Option<&str>,
    ) -> Variant;
}

impl<A: VariationContextAccessor + ?Sized> ContextualizeVariation for A {
    fn contextualize(
        &self,
        variation: ContentVariation,
        content_id: Option<NodeId>,
        culture: Option<&str>,
        segment: Option<&str>,
    ) -> Variant {
        let needs_context = (variation.varies_by_culture() && culture.is_none())
            || (variation.varies_by_segment() && segment.is_none());
        let context = if needs_context {
            self.variation_context()
        } else {
            None
        };

        let culture = if variation.varies_by_culture() {
            culture
                .map(str::to_owned)
                .or_else(|| context.as_ref().and_then(|c| c.culture.clone()))
        } else {
            None
        };

        let segment = if variation.varies_by_segment() {
            segment.map(str::to_owned).or_else(|| {
                context
                    .as_ref()
                    .and_then(|c| c.segment_for(content_id))
                    .map(str::to_owned)
            })
        } else {
            None
        };

        Variant { culture, segment }
    }
}
