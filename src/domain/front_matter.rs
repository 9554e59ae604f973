//! Hugo front matter for exported pages.

use chrono::{DateTime, TimeZone};
use std::fmt::{self, Display};

use crate::domain::Tag;

/// Timestamp layout Hugo reads: `2024-01-15T10:30:00+08:00`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Formats a timestamp in its own offset using [`DATE_FORMAT`].
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use hugo_export::domain::format_timestamp;
///
/// let tz = FixedOffset::east_opt(8 * 3600).unwrap();
/// let dt = tz.with_ymd_and_hms(2024, 1, 5, 9, 3, 7).unwrap();
/// assert_eq!(format_timestamp(&dt), "2024-01-05T09:03:07+08:00");
/// ```
pub fn format_timestamp<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format(DATE_FORMAT).to_string()
}

/// Header written at the top of every exported `index.md`.
///
/// Serialized by hand so the layout stays fixed: quoted title, unquoted
/// dates, a flow list of quoted tags, and no `tags` line when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    pub lastmod: String,
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Builds the header from source tags, leaving out the export marker.
    pub fn new(title: &str, date: String, lastmod: String, tags: &[Tag]) -> Self {
        Self {
            title: title.to_string(),
            date,
            lastmod,
            tags: tags
                .iter()
                .filter(|t| !t.is_blog())
                .map(|t| t.as_str().to_string())
                .collect(),
        }
    }
}

impl fmt::Display for FrontMatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---")?;
        writeln!(f, "title: \"{}\"", escape(&self.title))?;
        writeln!(f, "date: {}", self.date)?;
        writeln!(f, "lastmod: {}", self.lastmod)?;
        if !self.tags.is_empty() {
            let quoted: Vec<String> = self
                .tags
                .iter()
                .map(|t| format!("\"{}\"", escape(t)))
                .collect();
            writeln!(f, "tags: [{}]", quoted.join(", "))?;
        }
        writeln!(f, "---")?;
        writeln!(f)
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
