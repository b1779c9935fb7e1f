//! Output formatting for flowdocctl
//!
//! Renders a workflow summary as aligned terminal text, markdown (the layout
//! analysts paste into process documentation), JSON or YAML.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use flowdoc_core::{
    ActivityRole, ClassifiedActivity, ComplexityTier, FieldInventory, WorkflowSummary,
};

/// Output formats accepted by `-o/--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
    Yaml,
}

/// Summary formatter
pub struct SummaryOutput {
    format: OutputFormat,
    /// Whether to use colors (auto-detected from terminal)
    use_colors: bool,
}

impl SummaryOutput {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Colors stay off when stdout is not a terminal, whatever is requested
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = self.use_colors && enabled;
        self
    }

    /// Render the full summary
    pub fn render_summary(&self, summary: &WorkflowSummary) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.summary_text(summary)),
            OutputFormat::Markdown => Ok(summary_markdown(summary)),
            OutputFormat::Json => to_json(summary),
            OutputFormat::Yaml => to_yaml(summary),
        }
    }

    /// Render the field inventory only
    pub fn render_fields(&self, inventory: &FieldInventory) -> Result<String> {
        let labels: Vec<&str> = inventory.labels().collect();
        match self.format {
            OutputFormat::Text if labels.is_empty() => Ok(inventory.display()),
            OutputFormat::Text => Ok(labels.join("\n")),
            OutputFormat::Markdown => Ok(labels
                .iter()
                .map(|label| format!("- {}", label))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => to_json(&labels),
            OutputFormat::Yaml => to_yaml(&labels),
        }
    }

    /// Render the classified activities only
    pub fn render_activities(&self, activities: &[ClassifiedActivity]) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(activities
                .iter()
                .map(|activity| self.activity_text(activity, ""))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Markdown => Ok(activities
                .iter()
                .map(activity_markdown)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => to_json(activities),
            OutputFormat::Yaml => to_yaml(activities),
        }
    }

    fn summary_text(&self, summary: &WorkflowSummary) -> String {
        let complexity = match &summary.complexity_reason {
            Some(reason) => format!("{} ({})", self.tier(summary.complexity), reason),
            None => self.tier(summary.complexity),
        };

        let mut lines = vec![
            format!("{}         {}", self.label("Name:"), summary.name),
            format!("{}  {}", self.label("Description:"), summary.description),
            format!("{}      {}", self.label("Startup:"), summary.startup),
            format!("{}        {}", self.label("Forms:"), summary.form_count),
            format!("{}       {}", self.label("Fields:"), summary.fields),
            format!("{}        {}", self.label("Extra:"), summary.auxiliary_usage),
            format!("{}   {}", self.label("Complexity:"), complexity),
        ];

        if !summary.skipped_forms.is_empty() {
            let skipped: Vec<String> = summary
                .skipped_forms
                .iter()
                .map(|index| format!("#{}", index))
                .collect();
            lines.push(format!(
                "{}      {} (malformed field tree)",
                self.label("Skipped:"),
                skipped.join(", ")
            ));
        }

        lines.push(String::new());
        lines.push(self.label("Activities:"));
        if summary.activities.is_empty() {
            lines.push("  (none)".to_string());
        }
        for activity in &summary.activities {
            lines.push(self.activity_text(activity, "  - "));
        }

        lines.join("\n")
    }

    /// One activity, handler lines indented beneath it
    fn activity_text(&self, activity: &ClassifiedActivity, bullet: &str) -> String {
        let indent = " ".repeat(bullet.len() + 2);
        let mut lines = activity.name.lines();
        let first = lines.next().unwrap_or_default();

        let mut text = format!("{}{}: {}", bullet, self.role(activity.role), first);
        for line in lines {
            text.push('\n');
            text.push_str(&indent);
            text.push_str(line.trim_start_matches('\t'));
        }
        text
    }

    fn label(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn role(&self, role: ActivityRole) -> String {
        let label = role.label();
        if !self.use_colors {
            return label.to_string();
        }
        match role {
            ActivityRole::DataDelivery => label.magenta().to_string(),
            ActivityRole::Empty => label.dimmed().to_string(),
            ActivityRole::Approval => label.yellow().to_string(),
            ActivityRole::Fill => label.cyan().to_string(),
        }
    }

    fn tier(&self, tier: ComplexityTier) -> String {
        if !self.use_colors {
            return tier.to_string();
        }
        match tier {
            ComplexityTier::Simple => tier.to_string().green().to_string(),
            ComplexityTier::Advanced => tier.to_string().red().bold().to_string(),
        }
    }
}

fn summary_markdown(summary: &WorkflowSummary) -> String {
    let mut out = format!(
        "**Solution name**: {}\n\n\
         **Description:** {}\n\n\
         **Startup:** {}\n\n\
         **Number of forms:** {}\n\n\
         **Fields used:** {}\n\n\
         **Additional information:** {}\n\n\
         **Complexity:** {}\n\n\
         **Activities**\n\n",
        summary.name,
        summary.description,
        summary.startup,
        summary.form_count,
        summary.fields,
        summary.auxiliary_usage,
        summary.complexity,
    );

    let activities: Vec<String> = summary.activities.iter().map(activity_markdown).collect();
    out.push_str(&activities.join("\n"));
    out
}

fn activity_markdown(activity: &ClassifiedActivity) -> String {
    let mut lines = activity.name.lines();
    let first = lines.next().unwrap_or_default();

    let mut text = format!("- {}: {}", activity.role, first.trim());
    for line in lines {
        text.push_str("\n    ");
        text.push_str(line.trim());
    }
    text
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdoc_core::summarize_json;
    use pretty_assertions::assert_eq;

    const EXPORT: &str = r#"{
        "Name": "Purchase",
        "ProcesData": { "Aktiviteter": [
            { "Id": "a", "FriendlyName": "Order", "AktivitetBlanketVisning": [{}],
              "Betingelser": [{ "GodkenderAktivitetId": "b" }] },
            { "Id": "b", "FriendlyName": "Approve", "AktivitetBlanketVisning": [{}] },
            { "Id": "c", "FriendlyName": "Book",
              "AktivitetDatabehandler": [{ "DatabehandlerNavn": "Email", "Navn": "Finance" }] }
        ]}
    }"#;

    fn plain(format: OutputFormat) -> SummaryOutput {
        SummaryOutput::new(format).with_colors(false)
    }

    #[test]
    fn test_markdown_layout() {
        let summary = summarize_json(EXPORT).unwrap();
        let rendered = plain(OutputFormat::Markdown).render_summary(&summary).unwrap();

        assert!(rendered.starts_with("**Solution name**: Purchase\n\n"));
        assert!(rendered.contains("**Complexity:** Advanced\n\n"));
        assert!(rendered.ends_with(
            "**Activities**\n\n\
             - Fill: Order\n\
             - Approval: Approve (rejects to: Order)\n\
             - DataDelivery: Book\n    \
             - Email: Finance"
        ));
    }

    #[test]
    fn test_text_activities_indent_handler_lines() {
        let summary = summarize_json(EXPORT).unwrap();
        let rendered = plain(OutputFormat::Text)
            .render_activities(&summary.activities)
            .unwrap();

        assert_eq!(
            rendered,
            "Fill: Order\nApproval: Approve (rejects to: Order)\nDataDelivery: Book\n  - Email: Finance"
        );
    }

    #[test]
    fn test_text_summary_mentions_complexity_reason() {
        let summary = summarize_json(EXPORT).unwrap();
        let rendered = plain(OutputFormat::Text).render_summary(&summary).unwrap();

        assert!(rendered.contains("Complexity:   Advanced (3 activities (more than 2))"));
        assert!(rendered.contains("  - DataDelivery: Book\n      - Email: Finance"));
    }

    #[test]
    fn test_fields_formats() {
        let empty = FieldInventory::new();
        assert_eq!(plain(OutputFormat::Text).render_fields(&empty).unwrap(), "none");
        assert_eq!(plain(OutputFormat::Json).render_fields(&empty).unwrap(), "[]");

        let document = flowdoc_core::WorkflowDocument::from_json_str(
            r#"{"ProcesData":{"Blanketter":[{"Json":"{\"Root\":{\"Elements\":[{\"Typename\":\"ElementDate\"},{\"Typename\":\"ElementAPI\"}]}}"}]}}"#,
        )
        .unwrap();
        let inventory = flowdoc_core::collect_field_types(document.forms());
        assert_eq!(
            plain(OutputFormat::Text).render_fields(&inventory).unwrap(),
            "API field\nDate field"
        );
        assert_eq!(
            plain(OutputFormat::Markdown).render_fields(&inventory).unwrap(),
            "- API field\n- Date field"
        );
    }

    #[test]
    fn test_json_summary_is_parseable() {
        let summary = summarize_json(EXPORT).unwrap();
        let rendered = plain(OutputFormat::Json).render_summary(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["complexity"], "Advanced");
        assert_eq!(value["activities"][1]["role"], "Approval");
        assert_eq!(value["complexity_reason"]["rule"], "activity_count");
    }
}
