//! List the activities of a workflow export with their roles

use anyhow::Result;

use flowdoc_core::{build_approval_graph, classify_activities, ActivityRole};

use super::load_document;
use crate::output::SummaryOutput;

pub fn execute(source: &str, role: Option<ActivityRole>, output: &SummaryOutput) -> Result<()> {
    let document = load_document(source)?;

    let graph = build_approval_graph(document.activities());
    let mut activities = classify_activities(document.activities(), &graph);
    if let Some(role) = role {
        activities.retain(|activity| activity.role == role);
    }

    println!("{}", output.render_activities(&activities)?);
    Ok(())
}
