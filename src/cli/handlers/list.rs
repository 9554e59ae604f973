//! List command handler.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::ListArgs;
use crate::cli::config::Config;
use crate::cli::output::{DocumentListing, Output, OutputFormat};
use crate::domain::Tag;
use crate::export::{ExportConfig, Exporter};
use crate::infra::VaultIndex;

pub fn handle_list(args: &ListArgs, vault_dir: &Path, config: &Config) -> Result<()> {
    let export_config = ExportConfig::resolve(vault_dir, config.target_dir())?;
    let index = VaultIndex::open_excluding(vault_dir, Some(export_config.target_dir()))
        .with_context(|| format!("failed to open vault at {}", vault_dir.display()))?;

    let documents = Exporter::new(&index, export_config).select_documents();

    match args.format {
        OutputFormat::Human => {
            if documents.is_empty() {
                println!("No documents tagged 'blog' found.");
            } else {
                for doc in &documents {
                    println!("{:<40}  {}", doc.title(), doc.path().display());
                }
                println!();
                println!("{} document(s)", documents.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<DocumentListing> = documents
                .iter()
                .map(|d| DocumentListing {
                    name: d.name().to_string(),
                    title: d.title().to_string(),
                    path: d.path().to_string_lossy().to_string(),
                    tags: d
                        .metadata()
                        .tags()
                        .iter()
                        .filter(|t| !t.is_blog())
                        .map(Tag::to_string)
                        .collect(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Paths => {
            for doc in &documents {
                println!("{}", vault_dir.join(doc.path()).display());
            }
        }
    }

    Ok(())
}
