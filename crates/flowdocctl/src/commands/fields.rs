//! List the field types used by a workflow export

use anyhow::Result;

use flowdoc_core::collect_field_types;

use super::load_document;
use crate::output::SummaryOutput;

pub fn execute(source: &str, output: &SummaryOutput) -> Result<()> {
    let document = load_document(source)?;
    let inventory = collect_field_types(document.forms());

    println!("{}", output.render_fields(&inventory)?);
    Ok(())
}
