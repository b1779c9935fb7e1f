//! Complexity tier classification
//!
//! Three independent rules, checked in order; the first that fires makes a
//! workflow Advanced:
//! 1. more than `max_simple_activities` activities
//! 2. the field inventory text contains an advanced field label
//! 3. a data handler name equals an advanced handler name
//!
//! Rule 2 is a substring test against the joined inventory text, not a
//! membership test against individual labels.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FlowdocResult;

/// Field labels that mark a workflow as advanced
pub const ADVANCED_FIELDS: &[&str] = &[
    "API field",
    "CPR lookup",
    "CVR lookup",
    "GIS map",
    "Cadastre picker",
    "Booking element",
    "Comparison field",
    "Calculation field",
    "Payment field",
    "User posting list",
    "Hourly allowance",
];

/// Data handler names that mark a workflow as advanced
pub const ADVANCED_HANDLERS: &[&str] = &[
    "SbSys",
    "Acadre",
    "eDoc",
    "WorkZone",
    "F2",
    "Webservice",
    "REST",
    "SQL",
    "Digital Post",
];

/// Largest activity count a simple workflow may have
pub const MAX_SIMPLE_ACTIVITIES: usize = 2;

/// Two-tier complexity rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityTier {
    Simple,
    Advanced,
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "Simple"),
            Self::Advanced => write!(f, "Advanced"),
        }
    }
}

/// Which rule made a workflow advanced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum ComplexityReason {
    ActivityCount { count: usize, max_simple: usize },
    AdvancedField { label: String },
    AdvancedHandler { handler: String },
}

impl fmt::Display for ComplexityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActivityCount { count, max_simple } => {
                write!(f, "{} activities (more than {})", count, max_simple)
            }
            Self::AdvancedField { label } => write!(f, "uses advanced field '{}'", label),
            Self::AdvancedHandler { handler } => {
                write!(f, "delivers data through '{}'", handler)
            }
        }
    }
}

/// Keyword tables and thresholds for the classifier
///
/// Every field is optional in configuration; missing fields fall back to the
/// built-in tables.
///
/// Example:
/// ```yaml
/// max_simple_activities: 3
/// advanced_fields:
///   - GIS map
/// advanced_handlers:
///   - SbSys
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityRules {
    pub max_simple_activities: usize,
    pub advanced_fields: Vec<String>,
    pub advanced_handlers: Vec<String>,
}

impl Default for ComplexityRules {
    fn default() -> Self {
        Self {
            max_simple_activities: MAX_SIMPLE_ACTIVITIES,
            advanced_fields: ADVANCED_FIELDS.iter().map(|s| s.to_string()).collect(),
            advanced_handlers: ADVANCED_HANDLERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ComplexityRules {
    pub fn from_yaml_str(content: &str) -> FlowdocResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> FlowdocResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// First rule that classifies the workflow as advanced, if any
    pub fn assess<S: AsRef<str>>(
        &self,
        activity_count: usize,
        field_inventory: &str,
        handler_names: &[S],
    ) -> Option<ComplexityReason> {
        if activity_count > self.max_simple_activities {
            return Some(ComplexityReason::ActivityCount {
                count: activity_count,
                max_simple: self.max_simple_activities,
            });
        }

        if let Some(label) = self
            .advanced_fields
            .iter()
            .find(|label| field_inventory.contains(label.as_str()))
        {
            return Some(ComplexityReason::AdvancedField {
                label: label.clone(),
            });
        }

        handler_names
            .iter()
            .map(|name| name.as_ref())
            .find(|name| self.advanced_handlers.iter().any(|h| h.as_str() == *name))
            .map(|name| ComplexityReason::AdvancedHandler {
                handler: name.to_string(),
            })
    }

    /// Tier together with the rule that decided it
    pub fn evaluate<S: AsRef<str>>(
        &self,
        activity_count: usize,
        field_inventory: &str,
        handler_names: &[S],
    ) -> (ComplexityTier, Option<ComplexityReason>) {
        match self.assess(activity_count, field_inventory, handler_names) {
            Some(reason) => {
                debug!(%reason, "Workflow classified as advanced");
                (ComplexityTier::Advanced, Some(reason))
            }
            None => (ComplexityTier::Simple, None),
        }
    }

    /// Classify a workflow
    pub fn classify<S: AsRef<str>>(
        &self,
        activity_count: usize,
        field_inventory: &str,
        handler_names: &[S],
    ) -> ComplexityTier {
        self.evaluate(activity_count, field_inventory, handler_names).0
    }
}

/// Classify with the built-in rules
pub fn classify_complexity<S: AsRef<str>>(
    activity_count: usize,
    field_inventory: &str,
    handler_names: &[S],
) -> ComplexityTier {
    ComplexityRules::default().classify(activity_count, field_inventory, handler_names)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_HANDLERS: &[&str] = &[];

    #[test]
    fn test_small_plain_workflow_is_simple() {
        assert_eq!(
            classify_complexity(2, "Date field, Text field", &["Email"]),
            ComplexityTier::Simple
        );
        assert_eq!(classify_complexity(0, "none", NO_HANDLERS), ComplexityTier::Simple);
    }

    #[test]
    fn test_activity_count_rule() {
        let rules = ComplexityRules::default();
        assert_eq!(rules.classify(3, "none", NO_HANDLERS), ComplexityTier::Advanced);
        assert_eq!(
            rules.assess(3, "GIS map", &["SbSys"]),
            Some(ComplexityReason::ActivityCount {
                count: 3,
                max_simple: 2
            })
        );
    }

    #[test]
    fn test_evaluate_pairs_tier_with_reason() {
        let rules = ComplexityRules::default();
        assert_eq!(rules.evaluate(1, "Date field", NO_HANDLERS), (ComplexityTier::Simple, None));
        assert_eq!(
            rules.evaluate(1, "Date field", &["WorkZone"]),
            (
                ComplexityTier::Advanced,
                Some(ComplexityReason::AdvancedHandler {
                    handler: "WorkZone".to_string()
                })
            )
        );
    }

    #[test]
    fn test_advanced_field_is_substring_match() {
        let rules = ComplexityRules::default();
        assert_eq!(
            rules.assess(1, "Date field, GIS map", NO_HANDLERS),
            Some(ComplexityReason::AdvancedField {
                label: "GIS map".to_string()
            })
        );
        // substring of an unrelated label still fires
        assert_eq!(
            rules.classify(1, "Extended GIS map viewer", NO_HANDLERS),
            ComplexityTier::Advanced
        );
    }

    #[test]
    fn test_advanced_handler_is_exact_match() {
        let rules = ComplexityRules::default();
        assert_eq!(rules.classify(1, "none", &["SbSys"]), ComplexityTier::Advanced);
        assert_eq!(rules.classify(1, "none", &["sbsys"]), ComplexityTier::Simple);
        assert_eq!(rules.classify(1, "none", &["SbSys v2"]), ComplexityTier::Simple);
    }

    #[test]
    fn test_rules_from_yaml_fill_missing_fields() {
        let rules = ComplexityRules::from_yaml_str("max_simple_activities: 5\n").unwrap();
        assert_eq!(rules.max_simple_activities, 5);
        assert_eq!(rules.advanced_fields, ComplexityRules::default().advanced_fields);
        assert_eq!(rules.classify(4, "none", NO_HANDLERS), ComplexityTier::Simple);
    }

    #[test]
    fn test_rules_from_yaml_rejects_garbage() {
        assert!(ComplexityRules::from_yaml_str("max_simple_activities: lots").is_err());
    }

    #[test]
    fn test_rules_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        std::fs::write(&path, "advanced_handlers: [Custom]\n").unwrap();

        let rules = ComplexityRules::from_file(&path).unwrap();
        assert_eq!(rules.classify(1, "none", &["Custom"]), ComplexityTier::Advanced);
        assert_eq!(rules.classify(1, "none", &["SbSys"]), ComplexityTier::Simple);
    }
}
