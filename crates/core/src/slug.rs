//! Heading ids.

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

/// Id used when a heading has no sluggable characters.
const FALLBACK: &str = "section";

/// Github-slugger compatible id generator; repeated slugs get `-1`, `-2`, ... suffixes.
#[derive(Debug, Default)]
pub struct Slugger {
    counts: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next unique slug for the given heading text.
    pub fn next_slug(&mut self, text: &str) -> String {
        let mut slug = slugify(text);
        if slug.is_empty() {
            slug.push_str(FALLBACK);
        }
        let seen = self.counts.entry(slug.clone()).or_insert(0);
        if *seen > 0 {
            slug = format!("{slug}-{seen}");
        }
        *seen += 1;
        slug
    }

    /// Reserves a slug so generated slugs never collide with it.
    pub fn reserve(&mut self, slug: &str) {
        *self.counts.entry(slug.to_string()).or_insert(0) += 1;
    }
}

/// Lowercase `text`, keep letters, digits, `-` and `_`, turn spaces into `-`.
///
/// Works per grapheme cluster, so a letter keeps its combining marks.
/// Hyphens are neither collapsed nor trimmed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        let Some(base) = grapheme.chars().next() else {
            continue;
        };
        if base == ' ' {
            slug.push('-');
        } else if base == '-' || base == '_' || base.is_alphanumeric() {
            slug.extend(grapheme.chars().flat_map(char::to_lowercase));
        }
    }
    slug
}
