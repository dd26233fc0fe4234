//! In-memory contributor and media registries for SpudText.
//!
//! A [`RegistryConfig`] is loaded from YAML or JSON (or taken from
//! [`default_registry`]) and validated into a [`Registry`], whose two halves
//! implement the lookup traits the compiler consults.
#![deny(missing_docs)]

/// Built-in registry contents.
pub mod defaults;
/// Registry validation and loading errors.
pub mod error;
/// Validated registries.
pub mod store;
/// Serializable registry configuration.
pub mod types;

pub use defaults::default_registry;
pub use error::RegistryError;
pub use spudtext_core::Contributor;
pub use store::{ContributorRegistry, MediaRegistry, Registry};
pub use types::{MediaAsset, MediaAssetDefinition, RegistryConfig};
