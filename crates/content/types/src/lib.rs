//! Core type definitions for published content.
//!
//! This crate provides the shared data model used by the value fallback
//! resolver and the path permission checks. No resolution logic lives here,
//! only types, their invariants and configuration.

#![deny(unsafe_code)]

pub mod config;
pub mod content_type;
pub mod error;
pub mod fallback;
pub mod ids;
pub mod language;
pub mod path;
pub mod variation;

// Re-export primary types at crate root for ergonomic use.
pub use config::{ContentSettings, FallbackSettings, TreeSettings, VariationSettings};
pub use content_type::{ContentType, PropertyType};
pub use error::TypesError;
pub use fallback::{Fallback, FallbackMode};
pub use ids::{system, NodeId, NodeKey};
pub use language::{cultures_match, Language};
pub use path::ContentPath;
pub use variation::ContentVariation;
