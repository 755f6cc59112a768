//! Configuration for published content resolution

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TypesError;
use crate::fallback::Fallback;
use crate::ids::{system, NodeId};

/// Complete content settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    pub fallback: FallbackSettings,
    pub variation: VariationSettings,
    pub tree: TreeSettings,
}

/// Fallback policy used by callers that do not pass one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackSettings {
    pub default: Fallback,
}

/// Ambient culture and segment of a request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationSettings {
    pub culture: Option<String>,
    pub segment: Option<String>,
}

/// Reserved ids of the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    pub root_id: NodeId,
    pub content_recycle_bin_id: NodeId,
    pub media_recycle_bin_id: NodeId,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            root_id: system::ROOT,
            content_recycle_bin_id: system::RECYCLE_BIN_CONTENT,
            media_recycle_bin_id: system::RECYCLE_BIN_MEDIA,
        }
    }
}

impl ContentSettings {
    /// Load settings from a TOML file.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, TypesError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "loaded content settings");
        Ok(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, TypesError> {
        toml::from_str(contents).map_err(|e| TypesError::Config(e.to_string()))
    }
}
