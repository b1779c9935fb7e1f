//! Activity Classification - Assign each activity a behavioral role
//!
//! Roles are decided in a fixed order, first match wins:
//! - DataDelivery: the activity has data handlers
//! - Empty: no data handlers and no blanket view
//! - Approval: another activity names it as approver in an unapproved condition
//! - Fill: everything else
//!
//! The role then decides how the display name is decorated.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::approval::ApprovalGraph;
use crate::document::{Activity, DataHandler};

/// Name given to an unnamed-by-intent final empty activity
pub const END_NAME: &str = "End";

/// Behavioral role of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityRole {
    /// Hands form data to one or more external targets
    DataDelivery,
    /// Has neither data handlers nor a form view
    Empty,
    /// Approves work that can be rejected back to earlier activities
    Approval,
    /// A user fills in or reviews a form
    Fill,
}

impl ActivityRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DataDelivery => "DataDelivery",
            Self::Empty => "Empty",
            Self::Approval => "Approval",
            Self::Fill => "Fill",
        }
    }
}

impl fmt::Display for ActivityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ActivityRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "datadelivery" | "data-delivery" => Ok(Self::DataDelivery),
            "empty" => Ok(Self::Empty),
            "approval" => Ok(Self::Approval),
            "fill" => Ok(Self::Fill),
            _ => Err(format!("Unknown activity role: {}", s)),
        }
    }
}

/// One classified activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedActivity {
    /// Activity id, when the document carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: ActivityRole,
    /// Display name with role decorations applied
    pub name: String,
}

impl fmt::Display for ClassifiedActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.name)
    }
}

/// Where an activity sits in the document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    is_last: bool,
}

/// Classifies activities against a prebuilt approval graph
pub struct ActivityClassifier<'a> {
    graph: &'a ApprovalGraph,
    by_id: HashMap<&'a str, &'a Activity>,
}

impl<'a> ActivityClassifier<'a> {
    pub fn new(activities: &'a [Activity], graph: &'a ApprovalGraph) -> Self {
        // later duplicates win
        let by_id = activities
            .iter()
            .filter_map(|activity| activity.id.as_deref().map(|id| (id, activity)))
            .collect();

        Self { graph, by_id }
    }

    /// Classify all activities, preserving input order
    pub fn classify_all(&self, activities: &[Activity]) -> Vec<ClassifiedActivity> {
        let total = activities.len();
        activities
            .iter()
            .enumerate()
            .map(|(index, activity)| {
                let position = Position {
                    is_last: index + 1 == total,
                };
                self.classify_at(activity, position)
            })
            .collect()
    }

    fn classify_at(&self, activity: &Activity, position: Position) -> ClassifiedActivity {
        let role = self.role_for(activity);
        let name = self.decorate(activity, role, position);

        ClassifiedActivity {
            id: activity.id.clone(),
            role,
            name,
        }
    }

    /// Decide the role of an activity
    pub fn role_for(&self, activity: &Activity) -> ActivityRole {
        if activity.has_data_handlers() {
            ActivityRole::DataDelivery
        } else if !activity.has_blanket_view() {
            ActivityRole::Empty
        } else if activity
            .id
            .as_deref()
            .is_some_and(|id| self.graph.is_approver(id))
        {
            ActivityRole::Approval
        } else {
            ActivityRole::Fill
        }
    }

    fn decorate(&self, activity: &Activity, role: ActivityRole, position: Position) -> String {
        let base = activity.display_name();
        let unnamed = activity
            .friendly_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty());

        match (role, position.is_last) {
            (ActivityRole::Empty, true) if base.to_lowercase() == "none" => END_NAME.to_string(),
            (ActivityRole::Empty, true) if unnamed => format!("{} ({})", base, END_NAME),
            (ActivityRole::Empty, _) => base.to_string(),
            (ActivityRole::Fill, _) if activity.uses_signing() => {
                format!("{} (incl. signature)", base)
            }
            (ActivityRole::Fill, _) => base.to_string(),
            (ActivityRole::DataDelivery, _) => {
                format!("{}{}", base, delivery_lines(&activity.data_handlers))
            }
            (ActivityRole::Approval, _) => {
                format!("{}{}", base, self.rejection_suffix(activity))
            }
        }
    }

    /// " (rejects to: a, b)" using the undecorated names of the targets
    fn rejection_suffix(&self, activity: &Activity) -> String {
        let Some(id) = activity.id.as_deref() else {
            return String::new();
        };

        let names: Vec<&str> = self
            .graph
            .rejects_to(id)
            .iter()
            .filter_map(|target| self.by_id.get(target.as_str()))
            .map(|target| target.display_name())
            .collect();

        if names.is_empty() {
            String::new()
        } else {
            format!(" (rejects to: {})", names.join(", "))
        }
    }
}

fn delivery_lines(handlers: &[DataHandler]) -> String {
    let lines: Vec<String> = handlers.iter().filter_map(handler_line).collect();

    if lines.is_empty() {
        return "\n\t- no delivery information available".to_string();
    }
    lines.iter().map(|line| format!("\n{}", line)).collect()
}

fn handler_line(handler: &DataHandler) -> Option<String> {
    let handler_name = handler.handler_name.as_deref().unwrap_or_default();
    let target_name = handler.target_name.as_deref().unwrap_or_default();

    if handler_name.trim().is_empty() && target_name.trim().is_empty() {
        return None;
    }
    Some(format!("\t- {}: {}", handler_name, target_name))
}

/// Classify activities in document order
pub fn classify_activities(
    activities: &[Activity],
    graph: &ApprovalGraph,
) -> Vec<ClassifiedActivity> {
    ActivityClassifier::new(activities, graph).classify_all(activities)
}
