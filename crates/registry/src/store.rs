//! Validated, case-insensitive lookup tables.

use std::collections::{BTreeMap, HashSet};

use spudtext_core::{Contributor, ContributorLookup, MediaLink, MediaLookup, Registries};

use crate::error::RegistryError;
use crate::types::{MediaAsset, RegistryConfig};

/// Contributors keyed by lower-cased username.
#[derive(Debug, Clone, Default)]
pub struct ContributorRegistry {
    entries: BTreeMap<String, Contributor>,
}

impl ContributorRegistry {
    /// Build the table, rejecting usernames that collide ignoring case.
    pub fn from_contributors(
        contributors: impl IntoIterator<Item = Contributor>,
    ) -> Result<Self, RegistryError> {
        let mut entries = BTreeMap::new();
        for contributor in contributors {
            let key = contributor.username.to_lowercase();
            if entries.contains_key(&key) {
                return Err(RegistryError::DuplicateContributor(key));
            }
            entries.insert(key, contributor);
        }
        Ok(Self { entries })
    }

    /// Contributor called `username`, ignoring case.
    pub fn get(&self, username: &str) -> Option<&Contributor> {
        self.entries.get(&username.to_lowercase())
    }

    /// Contributors in lower-cased username order.
    pub fn iter(&self) -> impl Iterator<Item = &Contributor> {
        self.entries.values()
    }

    /// Number of contributors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nobody is listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContributorLookup for ContributorRegistry {
    fn find_contributor(&self, username: &str) -> Option<Contributor> {
        self.get(username).cloned()
    }
}

/// Media assets keyed by lower-cased name.
#[derive(Debug, Clone, Default)]
pub struct MediaRegistry {
    entries: BTreeMap<String, MediaAsset>,
}

impl MediaRegistry {
    /// Build the table, rejecting duplicate names and shared destinations.
    pub fn from_assets(assets: impl IntoIterator<Item = MediaAsset>) -> Result<Self, RegistryError> {
        let mut entries = BTreeMap::new();
        let mut destinations = HashSet::new();
        for asset in assets {
            let key = asset.name.to_lowercase();
            if entries.contains_key(&key) {
                return Err(RegistryError::DuplicateAsset(asset.name));
            }
            if !destinations.insert(asset.dst_path.clone()) {
                return Err(RegistryError::DuplicateDestination {
                    path: asset.dst_path,
                    asset: asset.name,
                });
            }
            entries.insert(key, asset);
        }
        Ok(Self { entries })
    }

    /// Asset called `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&MediaAsset> {
        self.entries.get(&name.to_lowercase())
    }

    /// Assets in lower-cased name order.
    pub fn iter(&self) -> impl Iterator<Item = &MediaAsset> {
        self.entries.values()
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no asset is listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MediaLookup for MediaRegistry {
    fn find_media(&self, name: &str) -> Option<MediaLink> {
        self.get(name).map(|asset| MediaLink {
            name: asset.name.clone(),
            link: asset.link(),
            description: asset.description.clone(),
        })
    }
}

/// Both registries, validated against each other.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Contributor table
    pub contributors: ContributorRegistry,
    /// Media table
    pub media: MediaRegistry,
}

impl Registry {
    /// Validate `config`; every asset must credit listed contributors only.
    pub fn from_config(config: RegistryConfig) -> Result<Self, RegistryError> {
        let contributors = ContributorRegistry::from_contributors(config.contributors)?;
        let assets: Vec<MediaAsset> = config.media.into_iter().map(MediaAsset::from).collect();
        for asset in &assets {
            if let Some(username) = asset
                .contributors
                .iter()
                .find(|username| contributors.get(username).is_none())
            {
                return Err(RegistryError::UnknownAssetContributor {
                    asset: asset.name.clone(),
                    username: username.clone(),
                });
            }
        }
        let media = MediaRegistry::from_assets(assets)?;
        log::debug!(
            "Loaded {} contributors and {} media assets",
            contributors.len(),
            media.len()
        );
        Ok(Self {
            contributors,
            media,
        })
    }

    /// Borrow both tables in the shape `spudtext_core::parse` expects.
    pub fn registries(&self) -> Registries<'_> {
        Registries::new(&self.contributors, &self.media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaAssetDefinition;

    #[test]
    fn duplicate_usernames_collide_ignoring_case() {
        let err = ContributorRegistry::from_contributors([
            Contributor::new("Matty5957", "daa520"),
            Contributor::new("matty5957", "ffffff"),
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "contributor 'matty5957' is listed more than once");
    }

    #[test]
    fn shared_destination_is_rejected() {
        let err = MediaRegistry::from_assets([
            MediaAsset::from(MediaAssetDefinition::new("a.png", "A")),
            MediaAsset::from(MediaAssetDefinition::new("b.png", "B").with_dst_path("media/a.png")),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateDestination { ref asset, ref path }
                if asset == "b.png" && path == "media/a.png"
        ));
    }

    #[test]
    fn duplicate_asset_names_are_rejected() {
        let err = MediaRegistry::from_assets([
            MediaAsset::from(MediaAssetDefinition::new("a.png", "A")),
            MediaAsset::from(MediaAssetDefinition::new("A.PNG", "B").with_dst_path("other.png")),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateAsset(name) if name == "A.PNG"));
    }

    #[test]
    fn assets_must_credit_known_contributors() {
        let config = RegistryConfig {
            contributors: vec![Contributor::new("Matty5957", "daa520")],
            media: vec![MediaAssetDefinition::new("a.png", "A").by("nobody")],
        };
        let err = config.build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "media asset 'a.png' credits unknown contributor 'nobody'"
        );
    }

    #[test]
    fn lookups_resolve_through_the_core_traits() {
        let registry = RegistryConfig {
            contributors: vec![Contributor::new("Matty5957", "daa520")],
            media: vec![MediaAssetDefinition::new("logo.png", "Website logo.").by("matty5957")],
        }
        .build()
        .expect("valid");
        let registries = registry.registries();
        assert_eq!(
            registries
                .contributors
                .find_contributor("MATTY5957")
                .map(|c| c.color),
            Some("daa520".to_string())
        );
        let link = registries.media.find_media("Logo.PNG").expect("asset");
        assert_eq!(link.link, "/spud-wiki/media/logo.png");
        assert_eq!(link.description, "Website logo.");
    }
}
