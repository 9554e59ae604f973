//! Builder for test notes with sensible defaults.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

/// Builder for vault notes.
///
/// Renders to a markdown file with a YAML header holding the title and
/// tags, when any are set.
#[derive(Debug, Clone)]
pub struct TestNote {
    name: String,
    title: Option<String>,
    tags: Vec<String>,
    folder: Option<String>,
    body: String,
}

impl TestNote {
    /// Creates a new note whose file is `<name>.md`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            tags: Vec::new(),
            folder: None,
            body: String::new(),
        }
    }

    /// Creates a note already tagged `blog`.
    pub fn post(name: impl Into<String>) -> Self {
        Self::new(name).tag("blog")
    }

    /// Sets an explicit title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Places the note in a vault sub-folder.
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Sets the body content.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the note name (file stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vault-relative path of the note file.
    pub fn relative_path(&self) -> String {
        match &self.folder {
            Some(folder) => format!("{}/{}.md", folder, self.name),
            None => format!("{}.md", self.name),
        }
    }

    /// Renders the file content.
    pub fn render(&self) -> String {
        let mut header = String::new();
        if let Some(title) = &self.title {
            header.push_str(&format!("title: \"{}\"\n", title.replace('"', "\\\"")));
        }
        if !self.tags.is_empty() {
            header.push_str(&format!("tags: [{}]\n", self.tags.join(", ")));
        }

        if header.is_empty() {
            self.body.clone()
        } else {
            format!("---\n{}---\n\n{}", header, self.body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_header_is_body() {
        assert_eq!(TestNote::new("a").body("text").render(), "text");
    }

    #[test]
    fn render_with_tags_and_title() {
        let note = TestNote::post("a").tag("travel").title("A \"b\"").body("x");
        assert_eq!(
            note.render(),
            "---\ntitle: \"A \\\"b\\\"\"\ntags: [blog, travel]\n---\n\nx"
        );
    }

    #[test]
    fn relative_path_includes_folder() {
        assert_eq!(TestNote::new("a").folder("posts").relative_path(), "posts/a.md");
    }
}
