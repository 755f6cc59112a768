use content_types::NodeId;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FallbackError;

/// Outcome of running a fallback policy.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution<T> {
    /// A fallback mode produced the result. The default-value mode may
    /// produce `None` when the caller supplied no default.
    Found(Option<T>),
    /// Every mode was tried and none produced a value.
    NotFound,
}

impl<T> Resolution<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The resolved value; `None` both for a miss and for an absent default.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Found(value) => value,
            Self::NotFound => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Found(value) => Resolution::Found(value.map(f)),
            Self::NotFound => Resolution::NotFound,
        }
    }
}

/// A property that exists but holds no value, with the node it belongs to.
#[derive(Clone, Debug)]
pub struct NoValueProperty<P> {
    pub owner: NodeId,
    pub property: P,
}

/// Outcome of a content-level resolution.
#[derive(Clone, Debug)]
pub struct ContentResolution<T, P> {
    pub resolution: Resolution<T>,
    /// The first property met that exists but holds no value: the node's
    /// own property, else the first one found while walking ancestors.
    /// Reported whatever the outcome.
    pub no_value_property: Option<NoValueProperty<P>>,
}

impl<T, P> ContentResolution<T, P> {
    pub fn is_found(&self) -> bool {
        self.resolution.is_found()
    }

    pub fn into_value(self) -> Option<T> {
        self.resolution.into_value()
    }
}

/// Convert a raw property value; JSON `null` converts to `None`.
pub(crate) fn convert<T: DeserializeOwned>(
    alias: &str,
    value: Value,
) -> Result<Option<T>, FallbackError> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|source| FallbackError::Conversion {
            alias: alias.to_owned(),
            source,
        })
}
