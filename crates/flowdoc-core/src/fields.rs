//! Field inventory
//!
//! Collects the distinct field types used across all forms of a document.
//! Field trees are walked with an explicit stack in pre-order (node first,
//! then its children in document order). Structural wrappers are left out of
//! the inventory but their children are still visited.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

use crate::document::{FieldNode, Form, FormPayload};
use crate::vocabulary;

/// Deepest field tree level that is visited
pub const MAX_FIELD_DEPTH: usize = 64;

/// Inventory text when no field types were found
pub const NO_FIELDS: &str = "none";

/// Pre-order walk over a field forest
///
/// Yields each node with its depth (roots are depth 1). Children of nodes at
/// `max_depth` are not visited; [`FieldWalk::truncated`] reports whether that
/// happened.
pub struct FieldWalk<'a> {
    stack: Vec<(&'a FieldNode, usize)>,
    max_depth: usize,
    truncated: bool,
}

impl<'a> FieldWalk<'a> {
    pub fn new(roots: &'a [FieldNode]) -> Self {
        Self::with_max_depth(roots, MAX_FIELD_DEPTH)
    }

    pub fn with_max_depth(roots: &'a [FieldNode], max_depth: usize) -> Self {
        Self {
            stack: roots.iter().rev().map(|node| (node, 1)).collect(),
            max_depth,
            truncated: false,
        }
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl<'a> Iterator for FieldWalk<'a> {
    type Item = (&'a FieldNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;

        if !node.children.is_empty() {
            if depth >= self.max_depth {
                self.truncated = true;
            } else {
                self.stack
                    .extend(node.children.iter().rev().map(|child| (child, depth + 1)));
            }
        }

        Some((node, depth))
    }
}

/// Accumulated set of translated field labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInventory {
    labels: BTreeSet<String>,
    skipped_forms: Vec<usize>,
}

impl FieldInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one form's field tree
    ///
    /// A form whose payload cannot be decoded is logged, remembered in
    /// [`skipped_forms`](Self::skipped_forms) and otherwise ignored. The
    /// decoded payload is handed back so callers can read other form data
    /// without decoding twice.
    pub fn add_form(&mut self, index: usize, form: &Form) -> Option<FormPayload> {
        match form.parse_payload(index) {
            Ok(payload) => {
                self.add_tree(index, &payload.root.elements);
                Some(payload)
            }
            Err(err) => {
                warn!(form = index, error = %err, "Skipping form with malformed field tree");
                self.skipped_forms.push(index);
                None
            }
        }
    }

    /// Add every non-wrapper node of a field forest
    pub fn add_tree(&mut self, index: usize, roots: &[FieldNode]) {
        let mut walk = FieldWalk::new(roots);
        let mut visited = 0usize;

        for (node, _) in walk.by_ref() {
            visited += 1;
            let typename = node.typename();
            if vocabulary::is_excluded(typename) {
                continue;
            }
            let label = vocabulary::translate(typename);
            if !self.labels.contains(label) {
                self.labels.insert(label.to_string());
            }
        }

        if walk.truncated() {
            warn!(
                form = index,
                max_depth = MAX_FIELD_DEPTH,
                "Field tree nested too deep, deeper fields ignored"
            );
        }
        debug!(form = index, visited, "Walked field tree");
    }

    /// Distinct labels in lexicographic order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Indices of forms whose field tree could not be decoded
    pub fn skipped_forms(&self) -> &[usize] {
        &self.skipped_forms
    }

    /// Comma-joined labels, or [`NO_FIELDS`]
    pub fn display(&self) -> String {
        if self.labels.is_empty() {
            return NO_FIELDS.to_string();
        }
        self.labels().collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for FieldInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Collect the field inventory of all forms
pub fn collect_field_types(forms: &[Form]) -> FieldInventory {
    let mut inventory = FieldInventory::new();
    for (index, form) in forms.iter().enumerate() {
        inventory.add_form(index, form);
    }
    inventory
}
