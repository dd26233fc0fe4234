//! Registry configuration types.

use serde::{Deserialize, Serialize};
use spudtext_core::Contributor;

use crate::error::RegistryError;
use crate::store::Registry;

/// Contributors and media assets, as written in a configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Credited contributors.
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    /// Media assets pages may embed.
    #[serde(default)]
    pub media: Vec<MediaAssetDefinition>,
}

/// A media asset entry before defaults are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAssetDefinition {
    /// File name (e.g., "logo.png").
    pub name: String,
    /// Default caption when embedded.
    pub description: String,
    /// Usernames of the people who made the asset.
    #[serde(default)]
    pub contributors: Vec<String>,
    /// Source file; defaults to `./src/media/{name}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_path: Option<String>,
    /// Path under the build root; defaults to `media/{name}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_path: Option<String>,
}

/// A media asset with its paths resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// File name.
    pub name: String,
    /// Default caption.
    pub description: String,
    /// Credited usernames.
    pub contributors: Vec<String>,
    /// Source file.
    pub src_path: String,
    /// Path under the build root.
    pub dst_path: String,
}

impl MediaAsset {
    /// Public URL of the built asset.
    pub fn link(&self) -> String {
        format!("/spud-wiki/{}", self.dst_path)
    }

    /// Where the build writes the asset.
    pub fn build_path(&self) -> String {
        format!("./build/{}", self.dst_path)
    }
}

impl From<MediaAssetDefinition> for MediaAsset {
    fn from(definition: MediaAssetDefinition) -> Self {
        let src_path = definition
            .src_path
            .unwrap_or_else(|| format!("./src/media/{}", definition.name));
        let dst_path = definition
            .dst_path
            .unwrap_or_else(|| format!("media/{}", definition.name));
        Self {
            name: definition.name,
            description: definition.description,
            contributors: definition.contributors,
            src_path,
            dst_path,
        }
    }
}

impl MediaAssetDefinition {
    /// Asset at the default paths.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            contributors: Vec::new(),
            src_path: None,
            dst_path: None,
        }
    }

    /// Credit `username` for the asset.
    pub fn by(mut self, username: impl Into<String>) -> Self {
        self.contributors.push(username.into());
        self
    }

    /// Override the destination path.
    pub fn with_dst_path(mut self, dst_path: impl Into<String>) -> Self {
        self.dst_path = Some(dst_path.into());
        self
    }
}

impl RegistryConfig {
    /// Parse a YAML configuration.
    pub fn from_yaml_str(input: &str) -> Result<Self, RegistryError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Parse a JSON configuration.
    pub fn from_json_str(input: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Check if a contributor is listed, ignoring case.
    pub fn has_contributor(&self, username: &str) -> bool {
        self.contributors
            .iter()
            .any(|c| c.username.eq_ignore_ascii_case(username))
    }

    /// Validate the configuration into lookup tables.
    pub fn build(self) -> Result<Registry, RegistryError> {
        Registry::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_applies_path_defaults() {
        let config = RegistryConfig::from_yaml_str(
            r#"
contributors:
  - username: Kawaiitron
    color: "00e700"
    twitchUsername: Kawaiitron_
media:
  - name: spud.png
    description: A spud.
    contributors: [kawaiitron]
"#,
        )
        .expect("valid yaml");
        assert_eq!(config.contributors[0].twitch(), "Kawaiitron_");
        let asset = MediaAsset::from(config.media[0].clone());
        assert_eq!(asset.src_path, "./src/media/spud.png");
        assert_eq!(asset.dst_path, "media/spud.png");
        assert_eq!(asset.link(), "/spud-wiki/media/spud.png");
        assert_eq!(asset.build_path(), "./build/media/spud.png");
    }

    #[test]
    fn json_keeps_explicit_paths() {
        let config = RegistryConfig::from_json_str(
            r#"{"media":[{"name":"favicon.ico","description":"Icon.","dstPath":"favicon.ico"}]}"#,
        )
        .expect("valid json");
        assert!(config.contributors.is_empty());
        let asset = MediaAsset::from(config.media[0].clone());
        assert_eq!(asset.link(), "/spud-wiki/favicon.ico");
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(matches!(
            RegistryConfig::from_json_str("{"),
            Err(RegistryError::Json(_))
        ));
        assert!(matches!(
            RegistryConfig::from_yaml_str("contributors: 3"),
            Err(RegistryError::Yaml(_))
        ));
    }
}
