//! Export of blog-tagged notes into a Hugo content directory.
//!
//! Each tagged note becomes a page bundle holding an `index.md` with Hugo
//! front matter and an `images/` folder with the files it embeds.

pub mod config;
mod exporter;
pub mod hooks;
mod report;
pub mod rewrite;

pub use config::{ConfigError, ExportConfig};
pub use exporter::{ExportError, Exporter, PAGE_FILE};
pub use hooks::{HookError, run_after_export};
pub use report::{DocumentResult, ExportReporter, ExportSummary, NoopReporter};
pub use rewrite::{IMAGES_DIR, output_link, rewrite_embeds};
