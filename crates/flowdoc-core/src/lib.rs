// Flowdoc Core - Workflow interpretation engine
//
// Turns a workflow export (forms, activities, conditions, mail templates)
// into a plain-language summary: the field types in use, the role of every
// activity, and a complexity tier. All stages are pure transforms over one
// parsed document.

pub mod approval;
pub mod classifier;
pub mod complexity;
pub mod document;
pub mod error;
pub mod fields;
pub mod summary;
pub mod vocabulary;

// Re-export core types
pub use approval::{build_approval_graph, ApprovalGraph};
pub use classifier::{classify_activities, ActivityClassifier, ActivityRole, ClassifiedActivity};
pub use complexity::{classify_complexity, ComplexityReason, ComplexityRules, ComplexityTier};
pub use document::{
    Activity, ActivitySettings, Condition, DataHandler, FieldNode, FieldRoot, Form, FormPayload,
    MailTemplate, ProcessData, StartupMethod, StartupSettings, WorkflowDocument,
};
pub use error::{FlowdocError, FlowdocResult};
pub use fields::{collect_field_types, FieldInventory, FieldWalk};
pub use summary::{summarize, summarize_json, Summarizer, WorkflowSummary};
pub use vocabulary::translate;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
