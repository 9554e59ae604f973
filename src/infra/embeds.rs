//! Embed scanning for note bodies.
//!
//! Finds `![[wiki]]` and `![alt](local/path)` embeds, skipping anything that
//! sits inside fenced code, indented code, or inline code spans.

use std::ops::Range;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use pulldown_cmark::{Event, Parser, Tag as MdTag};
use regex::Regex;

use crate::domain::{Embed, EmbedKind};

static WIKI_EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\[\]\n]+)\]\]").expect("valid wiki embed regex"));

static MARKDOWN_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[[^\]\n]*\]\(\s*(<[^>\n]+>|[^)\s]+)(?:\s+"[^"\n]*")?\s*\)"#)
        .expect("valid markdown embed regex")
});

/// Scans a body for embed references, in order of appearance.
///
/// # Examples
///
/// ```
/// use hugo_export::infra::scan_embeds;
///
/// let embeds = scan_embeds("See ![[photo.png|300]] and `![[not.png]]`");
/// assert_eq!(embeds.len(), 1);
/// assert_eq!(embeds[0].link(), "photo.png");
/// ```
pub fn scan_embeds(body: &str) -> Vec<Embed> {
    let code = code_regions(body);
    let in_code = |pos: usize| code.iter().any(|r| r.contains(&pos));

    let mut embeds: Vec<Embed> = Vec::new();

    for caps in WIKI_EMBED.captures_iter(body) {
        let Some(m) = caps.get(0) else { continue };
        if in_code(m.start()) {
            continue;
        }
        if let Some(embed) = caps
            .get(1)
            .and_then(|inner| wiki_embed(inner.as_str(), inner.start()))
        {
            embeds.push(embed);
        }
    }

    for caps in MARKDOWN_EMBED.captures_iter(body) {
        let Some(m) = caps.get(0) else { continue };
        if in_code(m.start()) {
            continue;
        }
        if let Some(embed) = caps
            .get(1)
            .and_then(|target| markdown_embed(target.as_str(), target.start()))
        {
            embeds.push(embed);
        }
    }

    embeds.sort_by_key(|e| e.link_range().start);
    embeds
}

/// `inner` is the text between `![[` and `]]`; `offset` is where it starts.
fn wiki_embed(inner: &str, offset: usize) -> Option<Embed> {
    let target_end = inner.find(['|', '#']).unwrap_or(inner.len());
    let raw = &inner[..target_end];
    let link = raw.trim();
    if link.is_empty() {
        return None;
    }
    let leading = raw.len() - raw.trim_start().len();
    let start = offset + leading;
    Some(Embed::new(EmbedKind::Wiki, link, start..start + link.len()))
}

/// `target` is the destination of a markdown image, possibly in `<...>`.
fn markdown_embed(target: &str, offset: usize) -> Option<Embed> {
    let (raw, start) = match target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        Some(inner) => (inner, offset + 1),
        None => (target, offset),
    };
    if raw.is_empty() || is_external(raw) {
        return None;
    }
    let link = percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    Some(Embed::new(EmbedKind::Markdown, link, start..start + raw.len()))
}

fn is_external(target: &str) -> bool {
    let lower = target.to_lowercase();
    lower.contains("://")
        || lower.starts_with("data:")
        || lower.starts_with("mailto:")
        || lower.starts_with('#')
}

/// Byte ranges of code blocks and inline code spans.
fn code_regions(body: &str) -> Vec<Range<usize>> {
    Parser::new(body)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(MdTag::CodeBlock(_)) | Event::Code(_) => Some(range),
            _ => None,
        })
        .collect()
}
