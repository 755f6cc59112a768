use std::collections::HashSet;
use std::sync::Arc;

use content_types::{
    cultures_match, ContentSettings, ContentVariation, Fallback, FallbackMode, NodeId,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::{FallbackError, FallbackLevel};
use crate::resolution::{convert, ContentResolution, NoValueProperty, Resolution};
use crate::traits::{
    ContentNavigation, LanguageDirectory, PublishedContent, PublishedElement, PublishedProperty,
    VariationContextAccessor,
};
use crate::variation::{ContextualizeVariation, StaticVariationContextAccessor, Variant};

/// Published value fallback: resolves property values through an ordered
/// fallback policy.
///
/// Modes are tried in the caller's order:
/// - `None` is skipped
/// - `DefaultValue` ends the search with the caller's default
/// - `Language` follows the language fallback chain, guarding against cycles
/// - `DefaultLanguage` tries the default language once
/// - `Ancestors` walks up the content tree (content level only)
///
/// The resolver holds no per-call state and can be shared across threads.
pub struct PublishedValueFallback<C> {
    languages: Arc<dyn LanguageDirectory>,
    variation: Arc<dyn VariationContextAccessor>,
    navigation: Arc<dyn ContentNavigation<C>>,
    default_fallback: Fallback,
}

impl<C: PublishedContent> PublishedValueFallback<C> {
    pub fn new(
        languages: Arc<dyn LanguageDirectory>,
        variation: Arc<dyn VariationContextAccessor>,
        navigation: Arc<dyn ContentNavigation<C>>,
    ) -> Self {
        Self {
            languages,
            variation,
            navigation,
            default_fallback: Fallback::none(),
        }
    }

    /// Build a resolver whose variation context and default policy come
    /// from settings.
    pub fn from_settings(
        settings: &ContentSettings,
        languages: Arc<dyn LanguageDirectory>,
        navigation: Arc<dyn ContentNavigation<C>>,
    ) -> Self {
        let variation = Arc::new(StaticVariationContextAccessor::from_settings(
            &settings.variation,
        ));
        Self::new(languages, variation, navigation)
            .with_default_fallback(settings.fallback.default.clone())
    }

    pub fn with_default_fallback(mut self, fallback: Fallback) -> Self {
        self.default_fallback = fallback;
        self
    }

    /// Policy for callers that do not choose one.
    pub fn default_fallback(&self) -> &Fallback {
        &self.default_fallback
    }

    pub(crate) fn contextualize(
        &self,
        variation: ContentVariation,
        content_id: Option<NodeId>,
        culture: Option<&str>,
        segment: Option<&str>,
    ) -> Variant {
        self.variation
            .contextualize(variation, content_id, culture, segment)
    }

    /// Run the fallback policy against a property handle.
    ///
    /// `Ancestors` is not supported at this level.
    pub fn try_get_property_value<P, T>(
        &self,
        property: &P,
        culture: Option<&str>,
        segment: Option<&str>,
        fallback: &Fallback,
        default_value: Option<T>,
    ) -> Result<Resolution<T>, FallbackError>
    where
        P: PublishedProperty,
        T: DeserializeOwned,
    {
        let alias = property.alias();
        let variant = self.contextualize(property.property_type().variation, None, culture, segment);
        let lookup = |culture: &str, segment: Option<&str>| {
            if property.has_value(Some(culture), segment) {
                property.value(Some(culture), segment)
            } else {
                None
            }
        };

        for &mode in fallback {
            trace!(alias, %mode, level = %FallbackLevel::Property, "trying fallback");
            let found = match mode {
                FallbackMode::None => continue,
                FallbackMode::DefaultValue => return Ok(Resolution::Found(default_value)),
                FallbackMode::Language => self.language_fallback(&variant, lookup),
                FallbackMode::DefaultLanguage => self.default_language_fallback(&variant, lookup),
                FallbackMode::Ancestors => {
                    return Err(unsupported(mode, FallbackLevel::Property));
                }
            };
            if let Some(value) = found {
                return Ok(Resolution::Found(convert(alias, value)?));
            }
        }

        Ok(Resolution::NotFound)
    }

    /// Run the fallback policy against an element property.
    ///
    /// An alias unknown to the element's type is a miss, whatever the policy.
    /// `Ancestors` is not supported at this level.
    pub fn try_get_element_value<E, T>(
        &self,
        element: &E,
        alias: &str,
        culture: Option<&str>,
        segment: Option<&str>,
        fallback: &Fallback,
        default_value: Option<T>,
    ) -> Result<Resolution<T>, FallbackError>
    where
        E: PublishedElement,
        T: DeserializeOwned,
    {
        let Some(property_type) = element.content_type().property_type(alias) else {
            trace!(alias, "no such property type on element");
            return Ok(Resolution::NotFound);
        };

        let variant = self.contextualize(property_type.variation, None, culture, segment);
        let lookup =
            |culture: &str, segment: Option<&str>| element.value(alias, Some(culture), segment);

        for &mode in fallback {
            trace!(alias, %mode, level = %FallbackLevel::Element, "trying fallback");
            let found = match mode {
                FallbackMode::None => continue,
                FallbackMode::DefaultValue => return Ok(Resolution::Found(default_value)),
                FallbackMode::Language => self.language_fallback(&variant, lookup),
                FallbackMode::DefaultLanguage => self.default_language_fallback(&variant, lookup),
                FallbackMode::Ancestors => {
                    return Err(unsupported(mode, FallbackLevel::Element));
                }
            };
            if let Some(value) = found {
                return Ok(Resolution::Found(convert(alias, value)?));
            }
        }

        Ok(Resolution::NotFound)
    }

    /// Run the fallback policy against a content node property.
    ///
    /// The node's own type need not define the alias: ancestors may, so
    /// `Ancestors` and `DefaultValue` still apply while `Language` is skipped.
    /// The result carries the first property met that had no value.
    pub fn try_get_content_value<T>(
        &self,
        content: &C,
        alias: &str,
        culture: Option<&str>,
        segment: Option<&str>,
        fallback: &Fallback,
        default_value: Option<T>,
    ) -> Result<ContentResolution<T, C::Property>, FallbackError>
    where
        T: DeserializeOwned,
    {
        let property_type = content.content_type().property_type(alias);
        let mut no_value_property = None;
        let variant = match property_type {
            Some(property_type) => {
                no_value_property = content.property(alias).map(|property| NoValueProperty {
                    owner: content.id(),
                    property,
                });
                self.contextualize(property_type.variation, Some(content.id()), culture, segment)
            }
            None => Variant {
                culture: culture.map(str::to_owned),
                segment: segment.map(str::to_owned),
            },
        };
        let lookup =
            |culture: &str, segment: Option<&str>| content.value(alias, Some(culture), segment);

        for &mode in fallback {
            trace!(alias, %mode, level = %FallbackLevel::Content, node = %content.id(), "trying fallback");
            let found = match mode {
                FallbackMode::None => continue,
                FallbackMode::DefaultValue => {
                    return Ok(ContentResolution {
                        resolution: Resolution::Found(default_value),
                        no_value_property,
                    });
                }
                FallbackMode::Language if property_type.is_none() => continue,
                FallbackMode::Language => self.language_fallback(&variant, lookup),
                FallbackMode::DefaultLanguage => self.default_language_fallback(&variant, lookup),
                FallbackMode::Ancestors => {
                    self.ancestors_fallback(content, alias, &mut no_value_property)
                }
            };
            if let Some(value) = found {
                return Ok(ContentResolution {
                    resolution: Resolution::Found(convert(alias, value)?),
                    no_value_property,
                });
            }
        }

        Ok(ContentResolution {
            resolution: Resolution::NotFound,
            no_value_property,
        })
    }

    /// Walk up the tree until an ancestor holds a value for the alias.
    ///
    /// The requested culture/segment do not carry over: each ancestor is
    /// read in the variation context's culture and its own node segment.
    fn ancestors_fallback(
        &self,
        content: &C,
        alias: &str,
        no_value_property: &mut Option<NoValueProperty<C::Property>>,
    ) -> Option<Value> {
        let mut current = self.navigation.parent(content);

        while let Some(node) = current {
            let property = node
                .content_type()
                .property_type(alias)
                .and_then(|property_type| {
                    let variant =
                        self.contextualize(property_type.variation, Some(node.id()), None, None);
                    node.property(alias).map(|property| (property, variant))
                });

            if let Some((property, variant)) = property {
                if property.has_value(variant.culture(), variant.segment()) {
                    trace!(alias, ancestor = %node.id(), "value found on ancestor");
                    return Some(
                        property
                            .value(variant.culture(), variant.segment())
                            .unwrap_or(Value::Null),
                    );
                }
                if no_value_property.is_none() {
                    *no_value_property = Some(NoValueProperty {
                        owner: node.id(),
                        property,
                    });
                }
            }

            current = self.navigation.parent(&node);
        }

        trace!(alias, "reached the root without a value");
        None
    }

    /// Follow the language fallback chain from the requested culture.
    ///
    /// Only fallback targets are marked visited, so a chain leading back to
    /// the requested culture reads it once before the cycle ends the walk.
    fn language_fallback<F>(&self, variant: &Variant, lookup: F) -> Option<Value>
    where
        F: Fn(&str, Option<&str>) -> Option<Value>,
    {
        let culture = variant.culture().filter(|c| !c.trim().is_empty())?;
        let mut language = self.languages.language_by_iso_code(culture)?;
        let mut visited = HashSet::new();

        loop {
            let next_iso_code = language.fallback_iso_code.take()?;
            if !visited.insert(next_iso_code.to_ascii_lowercase()) {
                debug!(culture, fallback = %next_iso_code, "language fallback cycle, giving up");
                return None;
            }

            let next = self.languages.language_by_iso_code(&next_iso_code)?;
            if let Some(value) = lookup(&next.iso_code, variant.segment()).filter(|v| !v.is_null()) {
                trace!(culture, fallback = %next.iso_code, "value found in fallback language");
                return Some(value);
            }

            language = next;
        }
    }

    /// Try the default language once, unless it is the requested culture.
    fn default_language_fallback<F>(&self, variant: &Variant, lookup: F) -> Option<Value>
    where
        F: Fn(&str, Option<&str>) -> Option<Value>,
    {
        let culture = variant.culture().filter(|c| !c.trim().is_empty())?;
        let default_culture = self.languages.default_language_iso_code()?;
        if cultures_match(culture, &default_culture) {
            return None;
        }
        lookup(&default_culture, variant.segment()).filter(|v| !v.is_null())
    }
}

fn unsupported(mode: FallbackMode, level: FallbackLevel) -> FallbackError {
    warn!(%mode, %level, "unsupported fallback mode");
    FallbackError::UnsupportedFallback { mode, level }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{InMemoryLanguageDirectory, MockContent, MockContentTree, MockNode, MockProperty};
    use crate::variation::VariationContext;
    use content_types::{ContentType, Language, PropertyType};
    use serde_json::json;

    fn languages() -> Arc<InMemoryLanguageDirectory> {
        Arc::new(
            InMemoryLanguageDirectory::new()
                .with(Language::new("en-US").as_default())
                .with(Language::new("da-DK").with_fallback("en-US"))
                .with(Language::new("nb-NO").with_fallback("da-DK")),
        )
    }

    fn resolver(tree: MockContentTree) -> PublishedValueFallback<MockContent> {
        PublishedValueFallback::new(
            languages(),
            Arc::new(StaticVariationContextAccessor::new(Some(VariationContext::new(
                Some("en-US".into()),
                None,
            )))),
            Arc::new(tree),
        )
    }

    fn title() -> MockProperty {
        MockProperty::new(PropertyType::by_culture("title"))
            .with_value(Some("en-US"), None, json!("Hello"))
    }

    #[test]
    fn property_language_chain() {
        let resolver = resolver(MockContentTree::new());
        let result: Resolution<String> = resolver
            .try_get_property_value(&title(), Some("nb-NO"), None, &Fallback::to_language(), None)
            .unwrap();
        assert_eq!(result, Resolution::Found(Some("Hello".into())));
    }

    #[test]
    fn property_ancestors_is_unsupported() {
        let resolver = resolver(MockContentTree::new());
        let result = resolver.try_get_property_value::<_, String>(
            &title(),
            Some("da-DK"),
            None,
            &Fallback::to_ancestors(),
            None,
        );
        assert!(matches!(
            result,
            Err(FallbackError::UnsupportedFallback {
                mode: FallbackMode::Ancestors,
                level: FallbackLevel::Property
            })
        ));
    }

    #[test]
    fn unsupported_mode_not_reached_when_earlier_mode_succeeds() {
        let resolver = resolver(MockContentTree::new());
        let fallback = Fallback::to_default_language().then(FallbackMode::Ancestors);
        let result: Resolution<String> = resolver
            .try_get_property_value(&title(), Some("da-DK"), None, &fallback, None)
            .unwrap();
        assert_eq!(result.into_value().as_deref(), Some("Hello"));
    }

    #[test]
    fn cycle_back_to_requested_culture_reads_it_once() {
        let languages = InMemoryLanguageDirectory::new()
            .with(Language::new("da-DK").with_fallback("nb-NO"))
            .with(Language::new("nb-NO").with_fallback("da-DK"));
        let resolver: PublishedValueFallback<MockContent> = PublishedValueFallback::new(
            Arc::new(languages),
            Arc::new(StaticVariationContextAccessor::default()),
            Arc::new(MockContentTree::new()),
        );

        let only_da = MockProperty::new(PropertyType::by_culture("title"))
            .with_value(Some("da-DK"), None, json!("DA"));
        let result: Resolution<String> = resolver
            .try_get_property_value(&only_da, Some("da-DK"), None, &Fallback::to_language(), None)
            .unwrap();
        assert_eq!(result, Resolution::Found(Some("DA".into())));

        let empty = MockProperty::new(PropertyType::by_culture("title"));
        let result: Resolution<String> = resolver
            .try_get_property_value(&empty, Some("da-DK"), None, &Fallback::to_language(), None)
            .unwrap();
        assert_eq!(result, Resolution::NotFound);
    }

    #[test]
    fn default_language_skips_self() {
        let resolver = resolver(MockContentTree::new());
        let property = MockProperty::new(PropertyType::by_culture("title"));
        let result: Resolution<String> = resolver
            .try_get_property_value(
                &property,
                Some("EN-us"),
                None,
                &Fallback::to_default_language(),
                None,
            )
            .unwrap();
        assert_eq!(result, Resolution::NotFound);
    }

    #[test]
    fn content_missing_alias_still_walks_ancestors() {
        let home_type = Arc::new(
            ContentType::new(
                "home",
                ContentVariation::Nothing,
                [PropertyType::invariant("siteName")],
            )
            .unwrap(),
        );
        let page_type =
            Arc::new(ContentType::new("page", ContentVariation::Nothing, []).unwrap());
        let mut tree = MockContentTree::new();
        tree.add_root(
            MockNode::new(1, home_type).with_property(
                MockProperty::new(PropertyType::invariant("siteName")).with_invariant(json!("Acme")),
            ),
        );
        let page = tree
            .add_child(NodeId(1), MockNode::new(2, page_type))
            .unwrap();

        let resolver = resolver(tree);
        let fallback = Fallback::to([FallbackMode::Language, FallbackMode::Ancestors]);
        let result = resolver
            .try_get_content_value::<String>(&page, "siteName", Some("da-DK"), None, &fallback, None)
            .unwrap();
        assert_eq!(result.into_value().as_deref(), Some("Acme"));
    }
}
