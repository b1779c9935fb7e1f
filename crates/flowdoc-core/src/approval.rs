//! Approval graph
//!
//! Maps an approving activity to the activities whose unapproved conditions
//! name it as approver, i.e. the activities it can reject back to.

use std::collections::HashMap;

use tracing::debug;

use crate::document::Activity;

/// Approver id -> activities that reject back to it
///
/// Each target list is duplicate-free and keeps first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalGraph {
    edges: HashMap<String, Vec<String>>,
}

impl ApprovalGraph {
    /// Build the graph in a single pass over all conditions
    ///
    /// Approved conditions never produce an edge. An activity without an id
    /// still makes its approver an approver, but cannot be recorded as a
    /// rejection target.
    pub fn build(activities: &[Activity]) -> Self {
        let mut graph = Self::default();

        for activity in activities {
            for condition in &activity.conditions {
                if condition.approved {
                    continue;
                }
                if let Some(approver_id) = condition.approver_activity_id.as_deref() {
                    graph.insert(approver_id, activity.id.as_deref());
                }
            }
        }

        debug!(approvers = graph.edges.len(), "Built approval graph");
        graph
    }

    fn insert(&mut self, approver_id: &str, activity_id: Option<&str>) {
        let targets = self.edges.entry(approver_id.to_string()).or_default();
        if let Some(activity_id) = activity_id {
            if !targets.iter().any(|id| id == activity_id) {
                targets.push(activity_id.to_string());
            }
        }
    }

    /// Whether some activity names this id as its approver
    pub fn is_approver(&self, activity_id: &str) -> bool {
        self.edges.contains_key(activity_id)
    }

    /// Activities that reject back to the given approver
    pub fn rejects_to(&self, approver_id: &str) -> &[String] {
        self.edges
            .get(approver_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of approving activities
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Build the approval graph for a set of activities
pub fn build_approval_graph(activities: &[Activity]) -> ApprovalGraph {
    ApprovalGraph::build(activities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Condition;

    fn activity(id: Option<&str>, conditions: Vec<(Option<&str>, bool)>) -> Activity {
        Activity {
            id: id.map(String::from),
            conditions: conditions
                .into_iter()
                .map(|(approver, approved)| Condition {
                    approver_activity_id: approver.map(String::from),
                    approved,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unapproved_condition_creates_edge() {
        let graph = build_approval_graph(&[
            activity(Some("x"), vec![(Some("y"), false)]),
            activity(Some("y"), vec![]),
        ]);
        assert!(graph.is_approver("y"));
        assert!(!graph.is_approver("x"));
        assert_eq!(graph.rejects_to("y"), &["x".to_string()]);
    }

    #[test]
    fn test_approved_condition_never_creates_edge() {
        let graph = build_approval_graph(&[
            activity(Some("x"), vec![(Some("y"), true)]),
            activity(Some("y"), vec![]),
        ]);
        assert!(graph.is_empty());
        assert!(graph.rejects_to("y").is_empty());
    }

    #[test]
    fn test_duplicate_edges_collapse_and_keep_order() {
        let graph = build_approval_graph(&[
            activity(Some("b"), vec![(Some("a"), false), (Some("a"), false)]),
            activity(Some("c"), vec![(Some("a"), false)]),
            activity(Some("b"), vec![(Some("a"), false)]),
        ]);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.rejects_to("a"), &["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_condition_without_approver_is_skipped() {
        let graph = build_approval_graph(&[activity(Some("b"), vec![(None, false)])]);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_activity_without_id_still_marks_approver() {
        let graph = build_approval_graph(&[
            activity(None, vec![(Some("a"), false)]),
            activity(Some("a"), vec![]),
        ]);
        assert!(graph.is_approver("a"));
        assert!(graph.rejects_to("a").is_empty());
    }
}
