use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;
use crate::variation::ContentVariation;

/// Metadata of one property on a content type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyType {
    pub alias: String,
    pub variation: ContentVariation,
}

impl PropertyType {
    pub fn new(alias: impl Into<String>, variation: ContentVariation) -> Self {
        Self {
            alias: alias.into(),
            variation,
        }
    }

    pub fn invariant(alias: impl Into<String>) -> Self {
        Self::new(alias, ContentVariation::Nothing)
    }

    pub fn by_culture(alias: impl Into<String>) -> Self {
        Self::new(alias, ContentVariation::Culture)
    }
}

/// A content (or element) type: the set of property types its nodes carry.
///
/// Property aliases are unique per content type and looked up exactly,
/// case included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    pub alias: String,
    pub variation: ContentVariation,
    property_types: BTreeMap<String, PropertyType>,
}

impl ContentType {
    /// Build a content type, rejecting duplicate property aliases.
    pub fn new(
        alias: impl Into<String>,
        variation: ContentVariation,
        property_types: impl IntoIterator<Item = PropertyType>,
    ) -> Result<Self, TypesError> {
        let mut content_type = Self {
            alias: alias.into(),
            variation,
            property_types: BTreeMap::new(),
        };
        for property_type in property_types {
            content_type.add_property_type(property_type)?;
        }
        Ok(content_type)
    }

    pub fn add_property_type(&mut self, property_type: PropertyType) -> Result<(), TypesError> {
        if self.property_types.contains_key(&property_type.alias) {
            return Err(TypesError::DuplicatePropertyAlias {
                content_type: self.alias.clone(),
                alias: property_type.alias,
            });
        }
        self.property_types
            .insert(property_type.alias.clone(), property_type);
        Ok(())
    }

    /// Property metadata lookup by exact alias.
    pub fn property_type(&self, alias: &str) -> Option<&PropertyType> {
        self.property_types.get(alias)
    }

    pub fn property_types(&self) -> impl Iterator<Item = &PropertyType> {
        self.property_types.values()
    }
}
