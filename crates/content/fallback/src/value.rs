//! Local-first value access: the property's own value, then the fallback
//! policy, then the property's own notion of "no value".

use content_types::{Fallback, NodeId};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FallbackError;
use crate::resolution::{convert, Resolution};
use crate::resolver::PublishedValueFallback;
use crate::traits::{PublishedContent, PublishedElement, PublishedProperty};

impl<C: PublishedContent> PublishedValueFallback<C> {
    /// Value of a property handle, falling back when it has none.
    pub fn property_value<P, T>(
        &self,
        property: &P,
        culture: Option<&str>,
        segment: Option<&str>,
        fallback: &Fallback,
        default_value: Option<T>,
    ) -> Result<Option<T>, FallbackError>
    where
        P: PublishedProperty,
        T: DeserializeOwned,
    {
        if let Some(local) = self.local_value(property, None, culture, segment) {
            return convert(property.alias(), local);
        }

        match self.try_get_property_value(property, culture, segment, fallback, default_value)? {
            Resolution::Found(value) => Ok(value),
            Resolution::NotFound => self.no_value(property, None, culture, segment),
        }
    }

    /// Value of an element property, falling back when it has none.
    pub fn element_value<E, T>(
        &self,
        element: &E,
        alias: &str,
        culture: Option<&str>,
        segment: Option<&str>,
        fallback: &Fallback,
        default_value: Option<T>,
    ) -> Result<Option<T>, FallbackError>
    where
        E: PublishedElement,
        T: DeserializeOwned,
    {
        let property = element.property(alias);
        if let Some(local) = property
            .as_ref()
            .and_then(|p| self.local_value(p, None, culture, segment))
        {
            return convert(alias, local);
        }

        match self.try_get_element_value(element, alias, culture, segment, fallback, default_value)? {
            Resolution::Found(value) => Ok(value),
            Resolution::NotFound => match property {
                Some(property) => self.no_value(&property, None, culture, segment),
                None => Ok(None),
            },
        }
    }

    /// Value of a content property, falling back when it has none.
    ///
    /// A local value short-circuits: the tree is not navigated.
    pub fn content_value<T>(
        &self,
        content: &C,
        alias: &str,
        culture: Option<&str>,
        segment: Option<&str>,
        fallback: &Fallback,
        default_value: Option<T>,
    ) -> Result<Option<T>, FallbackError>
    where
        T: DeserializeOwned,
    {
        if let Some(local) = content
            .property(alias)
            .and_then(|p| self.local_value(&p, Some(content), culture, segment))
        {
            return convert(alias, local);
        }

        let resolved =
            self.try_get_content_value(content, alias, culture, segment, fallback, default_value)?;
        match resolved.resolution {
            Resolution::Found(value) => Ok(value),
            Resolution::NotFound => match resolved.no_value_property {
                Some(unset) => self.no_value(&unset.property, Some(unset.owner), culture, segment),
                None => Ok(None),
            },
        }
    }

    fn local_value<P: PublishedProperty>(
        &self,
        property: &P,
        content: Option<&C>,
        culture: Option<&str>,
        segment: Option<&str>,
    ) -> Option<Value> {
        let variant = self.contextualize(
            property.property_type().variation,
            content.map(|c| c.id()),
            culture,
            segment,
        );
        if property.has_value(variant.culture(), variant.segment()) {
            Some(
                property
                    .value(variant.culture(), variant.segment())
                    .unwrap_or(Value::Null),
            )
        } else {
            None
        }
    }

    // The property's own representation of "no value", e.g. an empty list,
    // read with the segment of the node that owns it.
    fn no_value<P: PublishedProperty, T: DeserializeOwned>(
        &self,
        property: &P,
        owner: Option<NodeId>,
        culture: Option<&str>,
        segment: Option<&str>,
    ) -> Result<Option<T>, FallbackError> {
        let variant =
            self.contextualize(property.property_type().variation, owner, culture, segment);
        match property.value(variant.culture(), variant.segment()) {
            Some(value) => convert(property.alias(), value),
            None => Ok(None),
        }
    }
}
