use content_types::FallbackMode;
use thiserror::Error;

/// The level a value is resolved at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackLevel {
    Property,
    Element,
    Content,
}

impl std::fmt::Display for FallbackLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Property => "property",
            Self::Element => "element",
            Self::Content => "content",
        };
        f.write_str(name)
    }
}

/// Errors from value fallback resolution.
///
/// Not finding a value is not an error; these are configuration or data
/// defects the caller has to fix.
#[derive(Error, Debug)]
pub enum FallbackError {
    #[error("fallback mode '{mode}' (code {}) is not supported at {level} level", .mode.code())]
    UnsupportedFallback {
        mode: FallbackMode,
        level: FallbackLevel,
    },

    #[error("value of property '{alias}' could not be converted: {source}")]
    Conversion {
        alias: String,
        #[source]
        source: serde_json::Error,
    },
}
