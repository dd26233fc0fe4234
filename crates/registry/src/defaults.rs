//! The Spud Wiki's own contributors and media assets.
//!
//! Used when no registry file is given.

use spudtext_core::Contributor;

use crate::types::{MediaAssetDefinition, RegistryConfig};

/// Creates the built-in registry configuration.
///
/// # Example
///
/// ```
/// use spudtext_registry::default_registry;
///
/// let registry = default_registry().build().unwrap();
/// assert_eq!(registry.contributors.get("kawaiitron").unwrap().twitch(), "Kawaiitron_");
/// assert_eq!(registry.media.get("favicon.ico").unwrap().link(), "/spud-wiki/favicon.ico");
/// ```
pub fn default_registry() -> RegistryConfig {
    RegistryConfig {
        contributors: vec![
            Contributor::new("19_meg_91", "00e700"),
            Contributor::new("BlueStrategosJ", "359bff"),
            Contributor::new("Kawaiitron", "00e700").with_twitch("Kawaiitron_"),
            Contributor::new("Matty5957", "daa520"),
            Contributor::new("Spammer92", "92ff00").with_twitch("Spammer_92"),
            Contributor::new("waarisdetaart", "daa520"),
        ],
        media: vec![
            MediaAssetDefinition::new("favicon.ico", "Website icon.")
                .by("matty5957")
                .with_dst_path("favicon.ico"),
            MediaAssetDefinition::new("logo.png", "Website logo.").by("matty5957"),
        ],
    }
}
