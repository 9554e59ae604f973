//! Typed view of a source document's front matter.

use serde::Deserialize;
use serde_yaml::Value;
use tracing::warn;

use crate::domain::Tag;

/// Front matter fields the exporter cares about.
///
/// Source notes carry arbitrary YAML. Only `title` and `tags` are read, and
/// they are validated once here so the rest of the pipeline never has to
/// inspect loose YAML values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    title: Option<String>,
    tags: Vec<Tag>,
}

/// Shape of the YAML as written by users.
#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default, alias = "tag")]
    tags: Option<RawTags>,
}

/// `tags: [a, b]`, `tags: a`, and `tags: "a, b"` are all accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTags {
    Many(Vec<Value>),
    One(Value),
}

impl DocumentMetadata {
    /// Creates metadata from already-validated values.
    pub fn new(title: Option<String>, tags: Vec<Tag>) -> Self {
        let title = title.filter(|t| !t.trim().is_empty());
        Self { title, tags }
    }

    /// Parses the YAML between the front matter delimiters.
    ///
    /// Tags that fail validation are dropped with a warning rather than
    /// rejecting the whole document.
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the text is not a valid YAML mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: Option<RawMetadata> = serde_yaml::from_str(yaml)?;
        let raw = raw.unwrap_or_default();

        let title = raw.title.as_ref().and_then(scalar_to_string);
        let tags = match raw.tags {
            None => Vec::new(),
            Some(RawTags::Many(values)) => values
                .iter()
                .filter_map(scalar_to_string)
                .filter_map(|s| parse_tag(&s))
                .collect(),
            Some(RawTags::One(value)) => scalar_to_string(&value)
                .map(|s| {
                    s.split([',', ' '])
                        .filter(|part| !part.trim().is_empty())
                        .filter_map(parse_tag)
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Self::new(title, tags))
    }

    /// Returns the explicit title, if the front matter set a non-empty one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the document's tags in source order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether the document is marked for export.
    pub fn is_blog(&self) -> bool {
        self.tags.iter().any(Tag::is_blog)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_tag(s: &str) -> Option<Tag> {
    match Tag::new(s) {
        Ok(tag) => Some(tag),
        Err(e) => {
            warn!("ignoring tag {:?}: {}", s, e);
            None
        }
    }
}
