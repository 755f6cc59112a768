//! # content-fallback
//!
//! Culture-, segment- and tree-aware resolution of published property
//! values.
//!
//! A value is looked up locally first. When the property has no value for
//! the requested variant, the caller's ordered [`Fallback`] policy is run:
//! the language fallback chain, the default language, the ancestors of the
//! node, or a caller-supplied default.
//!
//! ## Core Components
//!
//! - **PublishedValueFallback**: the resolver; collaborators are injected
//! - **ContextualizeVariation**: normalizes culture/segment per property
//!   variation and the request's [`VariationContext`]
//! - **traits**: the published model and the services the resolver reads
//! - **mocks**: in-memory implementations for tests and examples

#![deny(unsafe_code)]

pub mod error;
pub mod mocks;
pub mod resolution;
pub mod resolver;
pub mod traits;
pub mod value;
pub mod variation;

pub use content_types::{Fallback, FallbackMode};
pub use error::{FallbackError, FallbackLevel};
pub use resolution::{ContentResolution, NoValueProperty, Resolution};
pub use resolver::PublishedValueFallback;
pub use traits::{
    ContentNavigation, LanguageDirectory, PublishedContent, PublishedElement, PublishedProperty,
    VariationContextAccessor,
};
pub use variation::{
    ContextualizeVariation, StaticVariationContextAccessor, VariationContext, Variant,
};
