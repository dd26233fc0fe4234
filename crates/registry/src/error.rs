use thiserror::Error;

/// Failure to load or validate a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two contributors share a username, ignoring case.
    #[error("contributor '{0}' is listed more than once")]
    DuplicateContributor(String),
    /// Two media assets share a name, ignoring case.
    #[error("media asset '{0}' is listed more than once")]
    DuplicateAsset(String),
    /// Two media assets would be copied to the same place.
    #[error("media asset '{asset}' would be copied to '{path}', like another asset")]
    DuplicateDestination {
        /// Name of the second asset
        asset: String,
        /// Shared destination path
        path: String,
    },
    /// A media asset credits somebody missing from the contributor list.
    #[error("media asset '{asset}' credits unknown contributor '{username}'")]
    UnknownAssetContributor {
        /// Asset name
        asset: String,
        /// Unresolved username
        username: String,
    },
    /// Malformed YAML configuration.
    #[error("invalid YAML registry: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Malformed JSON configuration.
    #[error("invalid JSON registry: {0}")]
    Json(#[from] serde_json::Error),
}
