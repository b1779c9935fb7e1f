//! Describe a workflow export in full

use anyhow::Result;

use flowdoc_core::Summarizer;

use super::load_document;
use crate::output::SummaryOutput;

pub fn execute(
    source: &str,
    description: Option<&str>,
    summarizer: &Summarizer,
    output: &SummaryOutput,
) -> Result<()> {
    let document = load_document(source)?;

    let mut summary = summarizer.summarize(&document);
    if let Some(description) = description {
        summary = summary.with_description(description);
    }

    println!("{}", output.render_summary(&summary)?);
    Ok(())
}
