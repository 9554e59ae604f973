//! File I/O, frontmatter parsing, embed scanning, vault index

mod embeds;
mod frontmatter;
mod fs;
mod vault;

pub use embeds::scan_embeds;
pub use frontmatter::{Split, split};
pub use fs::{
    FileTimes, FsError, ensure_dir, file_times, is_markdown, normalize_path, read_binary,
    read_text, remove_dir_if_exists, scan_vault, write_atomic,
};
pub use vault::{DocumentIndex, VaultIndex};
