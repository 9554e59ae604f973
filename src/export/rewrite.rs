//! Embed link rewriting for exported pages.
//!
//! Only the recognized embed spans are touched. Text that merely looks like
//! a link (in prose or code) stays as written.

use std::collections::HashMap;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::domain::{Embed, EmbedKind};

/// Characters escaped in markdown link destinations. Non-ASCII is always
/// escaped; `/` is kept so the path stays readable.
const LINK_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'(')
    .add(b')')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Folder, relative to a page, that holds its copied attachments.
pub const IMAGES_DIR: &str = "images";

/// Output path for an embed: `images/<file name>`.
pub fn output_link(embed: &Embed) -> String {
    format!("{}/{}", IMAGES_DIR, embed.file_name())
}

/// Replaces each embed's link text with its mapped output path.
///
/// `targets` maps an embed link to its replacement. Embeds whose link is not
/// in the map are left unchanged. Markdown-style embeds get their target
/// percent-encoded, matching how their links were decoded when scanned.
///
/// `embeds` must be sorted by position and must not overlap, which is what
/// [`scan_embeds`](crate::infra::scan_embeds) returns.
pub fn rewrite_embeds(body: &str, embeds: &[Embed], targets: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(body.len());
    let mut last = 0;

    for embed in embeds {
        let range = embed.link_range();
        let Some(target) = targets.get(embed.link()) else {
            continue;
        };
        if range.start < last || range.end > body.len() {
            continue;
        }

        out.push_str(&body[last..range.start]);
        match embed.kind() {
            EmbedKind::Wiki => out.push_str(target),
            EmbedKind::Markdown => out.extend(utf8_percent_encode(target, LINK_ESCAPE)),
        }
        last = range.end;
    }

    out.push_str(&body[last..]);
    out
}
