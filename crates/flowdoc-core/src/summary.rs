//! Summary assembly
//!
//! Runs every stage of the engine over one document and collects the results
//! into a single record for presentation.

use serde::Serialize;
use tracing::info;

use crate::approval::ApprovalGraph;
use crate::classifier::{ActivityClassifier, ClassifiedActivity};
use crate::complexity::{ComplexityReason, ComplexityRules, ComplexityTier};
use crate::document::{MailTemplate, StartupMethod, WorkflowDocument};
use crate::error::FlowdocResult;
use crate::fields::FieldInventory;

pub const NAME_UNAVAILABLE: &str = "Name not available";
pub const DESCRIPTION_UNAVAILABLE: &str = "Description not available";
pub const NO_STARTUP_METHOD: &str = "No startup method specified";
pub const NO_AUXILIARY_USAGE: &str = "No additional information available";

/// Plain-language summary of one workflow document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSummary {
    pub name: String,
    pub description: String,
    pub startup: String,
    pub form_count: usize,
    /// Comma-joined field inventory, or "none"
    pub fields: String,
    /// Distinct field labels in sorted order
    pub field_types: Vec<String>,
    pub auxiliary_usage: String,
    pub activities: Vec<ClassifiedActivity>,
    pub complexity: ComplexityTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_reason: Option<ComplexityReason>,
    /// Forms whose field tree could not be decoded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_forms: Vec<usize>,
}

impl WorkflowSummary {
    /// Ordered "role: decorated name" lines
    pub fn activity_lines(&self) -> Vec<String> {
        self.activities.iter().map(ToString::to_string).collect()
    }

    /// Replace the description, e.g. with one written by the analyst
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Summary builder holding the complexity rules
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    rules: ComplexityRules,
}

impl Summarizer {
    pub fn new(rules: ComplexityRules) -> Self {
        Self { rules }
    }

    /// Summarize a parsed document
    pub fn summarize(&self, document: &WorkflowDocument) -> WorkflowSummary {
        let mut inventory = FieldInventory::new();
        let mut value_lists = Vec::new();

        for (index, form) in document.forms().iter().enumerate() {
            if let Some(payload) = inventory.add_form(index, form) {
                if let Some(name) = payload.value_list.filter(|name| !name.is_empty()) {
                    value_lists.push(name);
                }
            }
        }

        let activities = document.activities();
        let graph = ApprovalGraph::build(activities);
        let classified = ActivityClassifier::new(activities, &graph).classify_all(activities);

        let handler_names: Vec<&str> = activities
            .iter()
            .flat_map(|activity| &activity.data_handlers)
            .filter_map(|handler| handler.handler_name.as_deref())
            .collect();

        let fields = inventory.display();
        let (complexity, complexity_reason) =
            self.rules.evaluate(activities.len(), &fields, &handler_names);

        let summary = WorkflowSummary {
            name: document
                .name
                .clone()
                .unwrap_or_else(|| NAME_UNAVAILABLE.to_string()),
            description: document
                .description
                .clone()
                .unwrap_or_else(|| DESCRIPTION_UNAVAILABLE.to_string()),
            startup: startup_narrative(&document.startup.methods()),
            form_count: document.forms().len(),
            field_types: inventory.labels().map(String::from).collect(),
            fields,
            auxiliary_usage: auxiliary_usage(&value_lists, &document.mail_templates),
            activities: classified,
            complexity,
            complexity_reason,
            skipped_forms: inventory.skipped_forms().to_vec(),
        };

        info!(
            workflow = %summary.name,
            forms = summary.form_count,
            activities = summary.activities.len(),
            complexity = %summary.complexity,
            "Summarized workflow"
        );
        summary
    }

    /// Parse and summarize a JSON document
    pub fn summarize_json(&self, content: &str) -> FlowdocResult<WorkflowSummary> {
        let document = WorkflowDocument::from_json_str(content)?;
        Ok(self.summarize(&document))
    }
}

/// Summarize with the built-in complexity rules
pub fn summarize(document: &WorkflowDocument) -> WorkflowSummary {
    Summarizer::default().summarize(document)
}

/// Parse and summarize with the built-in complexity rules
pub fn summarize_json(content: &str) -> FlowdocResult<WorkflowSummary> {
    Summarizer::default().summarize_json(content)
}

/// Describe how a workflow can be started
///
/// `[]` -> "No startup method specified", `[a]` -> "A", `[a, b]` -> "A or b",
/// `[a, b, c]` -> "A, b or c".
pub fn startup_narrative(methods: &[StartupMethod]) -> String {
    let words: Vec<&str> = methods.iter().map(StartupMethod::word).collect();

    match words.as_slice() {
        [] => NO_STARTUP_METHOD.to_string(),
        [only] => capitalize(only),
        [init @ .., last] => format!("{} or {}", capitalize(&init.join(", ")), last),
    }
}

/// Describe value lists and message templates the workflow uses
pub fn auxiliary_usage(value_lists: &[String], mail_templates: &[MailTemplate]) -> String {
    let clauses: Vec<String> = value_lists
        .iter()
        .map(|name| format!("value list '{}'", name))
        .chain(
            mail_templates
                .iter()
                .filter_map(|template| template.name.as_deref())
                .filter(|name| !name.is_empty())
                .map(|name| format!("message template '{}'", name)),
        )
        .collect();

    if clauses.is_empty() {
        NO_AUXILIARY_USAGE.to_string()
    } else {
        format!("The solution uses {}", clauses.join(", "))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
