//! Core types: Document, Attachment, Tag, Embed, front matter

mod document;
mod embed;
mod front_matter;
mod metadata;
mod tag;

pub use document::{Attachment, Document};
pub use embed::{Embed, EmbedKind};
pub use front_matter::{DATE_FORMAT, FrontMatter, format_timestamp};
pub use metadata::DocumentMetadata;
pub use tag::{BLOG_TAG, ParseTagError, Tag};
