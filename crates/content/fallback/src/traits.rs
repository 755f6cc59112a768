use content_types::{ContentType, Language, NodeId, NodeKey, PropertyType};
use serde_json::Value;

use crate::variation::VariationContext;

/// A property of a published element.
///
/// `culture` and `segment` are expected to be contextualized already;
/// `None` addresses the invariant value.
pub trait PublishedProperty {
    fn alias(&self) -> &str;

    fn property_type(&self) -> &PropertyType;

    /// Whether the property holds a value for the variant.
    fn has_value(&self, culture: Option<&str>, segment: Option<&str>) -> bool;

    /// The stored value for the variant, if any.
    fn value(&self, culture: Option<&str>, segment: Option<&str>) -> Option<Value>;
}

/// A published element: typed, with properties, but outside the tree.
pub trait PublishedElement {
    /// Property handle. Handles are cheap to clone and outlive lookups.
    type Property: PublishedProperty + Clone;

    fn key(&self) -> NodeKey;

    fn content_type(&self) -> &ContentType;

    fn property(&self, alias: &str) -> Option<Self::Property>;

    fn has_value(&self, alias: &str, culture: Option<&str>, segment: Option<&str>) -> bool {
        self.property(alias)
            .is_some_and(|property| property.has_value(culture, segment))
    }

    fn value(&self, alias: &str, culture: Option<&str>, segment: Option<&str>) -> Option<Value> {
        self.property(alias)
            .filter(|property| property.has_value(culture, segment))
            .and_then(|property| property.value(culture, segment))
    }
}

/// A published content node: an element with a position in the tree.
pub trait PublishedContent: PublishedElement {
    fn id(&self) -> NodeId;

    /// Materialized path, e.g. `-1,1116,2112`.
    fn path(&self) -> &str;
}

/// Tree navigation over published content.
///
/// Implementations apply the caller's visibility filtering: a parent that
/// is not visible in the current context is reported as absent.
pub trait ContentNavigation<C>: Send + Sync {
    fn parent(&self, content: &C) -> Option<C>;
}

/// Directory of configured languages.
pub trait LanguageDirectory: Send + Sync {
    /// Look up a language by ISO code, case-insensitively.
    fn language_by_iso_code(&self, iso_code: &str) -> Option<Language>;

    fn default_language_iso_code(&self) -> Option<String>;
}

/// Access to the variation context of the current request.
pub trait VariationContextAccessor: Send + Sync {
    fn variation_context(&self) -> Option<VariationContext>;
}
