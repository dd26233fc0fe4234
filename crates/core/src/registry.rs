//! Read-only lookup services consulted while resolving a document.

use serde::{Deserialize, Serialize};

/// A credited contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    /// Display name, matched case-insensitively
    pub username: String,
    /// Credit colour as a hex triplet without `#`
    pub color: String,
    /// Twitch channel, when it differs from the username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch_username: Option<String>,
}

impl Contributor {
    /// Create a contributor whose Twitch channel matches the username.
    pub fn new(username: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            color: color.into(),
            twitch_username: None,
        }
    }

    /// Set the Twitch channel.
    pub fn with_twitch(mut self, twitch_username: impl Into<String>) -> Self {
        self.twitch_username = Some(twitch_username.into());
        self
    }

    /// Twitch channel name.
    pub fn twitch(&self) -> &str {
        self.twitch_username.as_deref().unwrap_or(&self.username)
    }

    /// Credit anchor linking to the contributor's channel, in `forced_color` if given.
    pub fn to_html(&self, forced_color: Option<&str>) -> String {
        let color = forced_color.unwrap_or(&self.color);
        format!(
            "<a target=\"_blank\" rel=\"noopener noreferrer\" class=\"tw-name\" href=\"https://www.twitch.tv/{}\" style=\"color:#{}\">{}</a>",
            html_escape::encode_double_quoted_attribute(self.twitch()),
            html_escape::encode_double_quoted_attribute(color),
            html_escape::encode_text(&self.username),
        )
    }
}

/// A media asset as seen by the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLink {
    /// Asset name
    pub name: String,
    /// Public URL of the asset
    pub link: String,
    /// Default caption
    pub description: String,
}

/// Contributor lookup by case-insensitive username.
pub trait ContributorLookup: Send + Sync {
    /// Find the contributor called `username`, ignoring case.
    fn find_contributor(&self, username: &str) -> Option<Contributor>;
}

/// Media lookup by case-insensitive asset name.
pub trait MediaLookup: Send + Sync {
    /// Find the asset called `name`, ignoring case.
    fn find_media(&self, name: &str) -> Option<MediaLink>;
}

impl ContributorLookup for [Contributor] {
    fn find_contributor(&self, username: &str) -> Option<Contributor> {
        self.iter()
            .find(|c| c.username.eq_ignore_ascii_case(username))
            .cloned()
    }
}

impl ContributorLookup for Vec<Contributor> {
    fn find_contributor(&self, username: &str) -> Option<Contributor> {
        self.as_slice().find_contributor(username)
    }
}

impl MediaLookup for [MediaLink] {
    fn find_media(&self, name: &str) -> Option<MediaLink> {
        self.iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .cloned()
    }
}

impl MediaLookup for Vec<MediaLink> {
    fn find_media(&self, name: &str) -> Option<MediaLink> {
        self.as_slice().find_media(name)
    }
}

/// Registry that knows nobody and nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRegistry;

impl ContributorLookup for EmptyRegistry {
    fn find_contributor(&self, _username: &str) -> Option<Contributor> {
        None
    }
}

impl MediaLookup for EmptyRegistry {
    fn find_media(&self, _name: &str) -> Option<MediaLink> {
        None
    }
}

static EMPTY: EmptyRegistry = EmptyRegistry;

/// The two registries a parse consults.
#[derive(Clone, Copy)]
pub struct Registries<'a> {
    /// Contributor lookup
    pub contributors: &'a dyn ContributorLookup,
    /// Media lookup
    pub media: &'a dyn MediaLookup,
}

impl<'a> Registries<'a> {
    /// Bundle two lookups.
    pub fn new(contributors: &'a dyn ContributorLookup, media: &'a dyn MediaLookup) -> Self {
        Self {
            contributors,
            media,
        }
    }
}

impl Registries<'static> {
    /// Registries that resolve nothing.
    pub fn empty() -> Self {
        Self::new(&EMPTY, &EMPTY)
    }
}

impl Default for Registries<'static> {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Registries<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registries").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contributor_lookup_ignores_case() {
        let list = vec![Contributor::new("Matty5957", "daa520")];
        assert!(list.find_contributor("matty5957").is_some());
        assert!(list.find_contributor("MATTY5957").is_some());
        assert!(list.find_contributor("matty").is_none());
    }

    #[test]
    fn media_lookup_ignores_case() {
        let list = vec![MediaLink {
            name: "logo.png".to_string(),
            link: "/spud-wiki/media/logo.png".to_string(),
            description: "Website logo.".to_string(),
        }];
        assert_eq!(
            list.find_media("LOGO.PNG").map(|m| m.link),
            Some("/spud-wiki/media/logo.png".to_string())
        );
        assert!(Registries::empty().media.find_media("logo.png").is_none());
    }

    #[test]
    fn credit_anchor() {
        let contributor = Contributor::new("Kawaiitron", "00e700").with_twitch("Kawaiitron_");
        insta::assert_snapshot!(contributor.to_html(None), @r#"<a target="_blank" rel="noopener noreferrer" class="tw-name" href="https://www.twitch.tv/Kawaiitron_" style="color:#00e700">Kawaiitron</a>"#);
        assert!(contributor.to_html(Some("f77")).contains("color:#f77"));
    }
}
