//! Frontmatter splitting for source notes.

/// A note split into its raw YAML header and its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text between the delimiters, if the note has a header.
    pub yaml: Option<&'a str>,
    /// Everything after the header, with leading whitespace removed.
    /// The whole content when there is no header.
    pub body: &'a str,
}

/// Splits a note into frontmatter and body.
///
/// # Format
/// ```text
/// ---
/// title: Note Title
/// tags: [blog]
/// ---
/// Body content here...
/// ```
///
/// The opening `---` must be the very first line. The closing `---` must sit
/// on a line of its own. Content that does not match is all body. A UTF-8
/// BOM before the opening delimiter is ignored.
pub fn split(content: &str) -> Split<'_> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let no_header = Split {
        yaml: None,
        body: content,
    };

    let after_opening = if content.starts_with("---\r\n") {
        5
    } else if content.starts_with("---\n") {
        4
    } else {
        return no_header;
    };

    let yaml_and_rest = &content[after_opening..];
    let Some(closing_pos) = find_closing_delimiter(yaml_and_rest) else {
        return no_header;
    };

    let yaml = &yaml_and_rest[..closing_pos];
    let body = yaml_and_rest[closing_pos + 3..].trim_start();

    Split {
        yaml: Some(yaml),
        body,
    }
}

/// Finds the position of the closing `---` delimiter.
///
/// The closing delimiter must:
/// - Appear at the start of a line
/// - Be exactly `---` followed by newline or EOF
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    let bytes = content.as_bytes();

    while pos < bytes.len() {
        if content[pos..].starts_with("---") {
            let after = pos + 3;
            if after >= bytes.len()
                || bytes[after] == b'\n'
                || (bytes[after] == b'\r' && bytes.get(after + 1) == Some(&b'\n'))
            {
                return Some(pos);
            }
        }

        match content[pos..].find('\n') {
            Some(newline_offset) => pos += newline_offset + 1,
            None => break,
        }
    }

    None
}
