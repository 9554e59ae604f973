//! Vault tag type as written in note front matter.

use std::fmt;

/// The tag that marks a note for export.
pub const BLOG_TAG: &str = "blog";

/// A tag attached to a document in its front matter.
///
/// Tags keep the spelling the author used, so `c++`, `node.js` and `Travel`
/// reach the exported front matter unchanged.
///
/// # Normalization
/// - Surrounding whitespace is trimmed
/// - A single leading `#` is dropped (`#blog` and `blog` are the same tag)
///
/// # Examples
///
/// ```
/// use hugo_export::domain::Tag;
///
/// let tag = Tag::new("#Travel").unwrap();
/// assert_eq!(tag.as_str(), "Travel");
/// assert!(Tag::new("#blog").unwrap().is_blog());
/// assert!(!Tag::new("Blog").unwrap().is_blog());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if the tag is empty, whitespace-only, or
    /// just `#`.
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let trimmed = s.trim();
        let normalized = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();

        if normalized.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        Ok(Self(normalized.to_string()))
    }

    /// Returns the tag value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the export marker tag, spelled exactly `blog`.
    pub fn is_blog(&self) -> bool {
        self.0 == BLOG_TAG
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}
