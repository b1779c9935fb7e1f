//! flowdocctl subcommands

pub mod activities;
pub mod completion;
pub mod describe;
pub mod fields;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader};

use flowdoc_core::WorkflowDocument;

/// Load a workflow export from a file path, or from stdin when the path is `-`
pub fn load_document(source: &str) -> Result<WorkflowDocument> {
    let document = if source == "-" {
        WorkflowDocument::from_reader(io::stdin().lock())
            .context("Failed to parse workflow export from stdin")?
    } else {
        let file = File::open(source)
            .with_context(|| format!("Failed to read workflow export: {}", source))?;
        WorkflowDocument::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse workflow export: {}", source))?
    };

    tracing::debug!(
        source,
        forms = document.forms().len(),
        activities = document.activities().len(),
        "Loaded workflow export"
    );
    Ok(document)
}
