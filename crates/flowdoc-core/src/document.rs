//! Workflow document model
//!
//! Read-only view over one workflow export. Every optional key is defaulted on
//! parse: missing or `null` arrays become empty, missing booleans become
//! `false`, and missing names stay `None` until a display placeholder is
//! applied. Only a document that is not valid JSON (or not an object at the
//! top level) fails to parse.
//!
//! Example:
//! ```json
//! {
//!   "Name": "Travel expenses",
//!   "ArbejdsgangSkabelonSettings": { "InternStart": true },
//!   "ProcesData": {
//!     "Blanketter": [{ "Json": "{\"Root\":{\"Elements\":[{\"Typename\":\"ElementDate\"}]}}" }],
//!     "Aktiviteter": [{ "Id": "a1", "FriendlyName": "Submit", "AktivitetBlanketVisning": [{}] }]
//!   },
//!   "MailTemplate": [{ "Navn": "Receipt" }]
//! }
//! ```

use std::io::Read;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{FlowdocError, FlowdocResult};

/// Display name used for activities without a friendly name
pub const UNNAMED_ACTIVITY: &str = "unnamed activity";

/// Typename used for field nodes that carry none
pub const UNKNOWN_TYPENAME: &str = "Unknown";

/// A complete workflow export
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkflowDocument {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "Description", default)]
    pub description: Option<String>,

    #[serde(rename = "ArbejdsgangSkabelonSettings", default, deserialize_with = "null_default")]
    pub startup: StartupSettings,

    #[serde(rename = "ProcesData", default, deserialize_with = "null_default")]
    pub process: ProcessData,

    #[serde(rename = "MailTemplate", default, deserialize_with = "null_default")]
    pub mail_templates: Vec<MailTemplate>,
}

impl WorkflowDocument {
    /// Parse a document from a JSON string
    pub fn from_json_str(content: &str) -> FlowdocResult<Self> {
        serde_json::from_str(content).map_err(FlowdocError::Parse)
    }

    /// Parse a document from any reader
    pub fn from_reader<R: Read>(reader: R) -> FlowdocResult<Self> {
        serde_json::from_reader(reader).map_err(FlowdocError::Parse)
    }

    pub fn forms(&self) -> &[Form] {
        &self.process.forms
    }

    pub fn activities(&self) -> &[Activity] {
        &self.process.activities
    }
}

/// Which ways a workflow can be started
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StartupSettings {
    #[serde(rename = "InternStart", default, deserialize_with = "null_default")]
    pub internal: bool,

    #[serde(rename = "EksternStart", default, deserialize_with = "null_default")]
    pub external: bool,

    #[serde(rename = "AnonymStart", default, deserialize_with = "null_default")]
    pub anonymous: bool,
}

impl StartupSettings {
    /// Enabled startup methods in fixed order: internal, external, anonymous
    pub fn methods(&self) -> Vec<StartupMethod> {
        [
            (self.internal, StartupMethod::Internal),
            (self.external, StartupMethod::External),
            (self.anonymous, StartupMethod::Anonymous),
        ]
        .into_iter()
        .filter_map(|(enabled, method)| enabled.then_some(method))
        .collect()
    }
}

/// A single startup method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartupMethod {
    Internal,
    External,
    Anonymous,
}

impl StartupMethod {
    /// Adverb used in the startup narrative
    pub fn word(&self) -> &'static str {
        match self {
            Self::Internal => "internally",
            Self::External => "externally",
            Self::Anonymous => "anonymously",
        }
    }
}

/// Forms and activities of the process
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessData {
    #[serde(rename = "Blanketter", default, deserialize_with = "null_default")]
    pub forms: Vec<Form>,

    #[serde(rename = "Aktiviteter", default, deserialize_with = "null_default")]
    pub activities: Vec<Activity>,
}

/// A form with its embedded field tree
///
/// The `Json` key normally holds the field tree as an encoded JSON string.
/// An inline object is accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Form {
    #[serde(rename = "Json", default)]
    pub payload: Option<Value>,
}

impl Form {
    /// Decode the embedded field tree
    ///
    /// `index` is the form's position in the document and is carried into the
    /// error so skipped forms can be reported.
    pub fn parse_payload(&self, index: usize) -> FlowdocResult<FormPayload> {
        let parsed = match &self.payload {
            None | Some(Value::Null) => return Ok(FormPayload::default()),
            Some(Value::String(raw)) if raw.trim().is_empty() => return Ok(FormPayload::default()),
            Some(Value::String(raw)) => serde_json::from_str(raw),
            Some(other) => FormPayload::deserialize(other),
        };

        parsed.map_err(|source| FlowdocError::FieldTree {
            form: index,
            source,
        })
    }
}

/// Decoded form payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormPayload {
    #[serde(rename = "Root", default, deserialize_with = "null_default")]
    pub root: FieldRoot,

    /// Name of the value list selected for this form
    #[serde(rename = "ValgtVaerdilisteNavn", default)]
    pub value_list: Option<String>,
}

/// Top of a form's field tree
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldRoot {
    #[serde(
        rename = "Elements",
        alias = "Children",
        default,
        deserialize_with = "null_default"
    )]
    pub elements: Vec<FieldNode>,
}

/// One field in a form's field tree
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldNode {
    #[serde(rename = "Typename", default)]
    pub typename: Option<String>,

    #[serde(
        rename = "Elements",
        alias = "Children",
        default,
        deserialize_with = "null_default"
    )]
    pub children: Vec<FieldNode>,
}

impl FieldNode {
    pub fn typename(&self) -> &str {
        self.typename.as_deref().unwrap_or(UNKNOWN_TYPENAME)
    }
}

/// One step of the process
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Activity {
    #[serde(rename = "Id", default, deserialize_with = "lenient_id")]
    pub id: Option<String>,

    #[serde(rename = "FriendlyName", default)]
    pub friendly_name: Option<String>,

    #[serde(rename = "AktivitetDatabehandler", default, deserialize_with = "null_default")]
    pub data_handlers: Vec<DataHandler>,

    #[serde(rename = "AktivitetBlanketVisning", default, deserialize_with = "null_default")]
    pub blanket_views: Vec<Value>,

    #[serde(rename = "Betingelser", default, deserialize_with = "null_default")]
    pub conditions: Vec<Condition>,

    #[serde(rename = "AktivitetSkabelonSettings", default, deserialize_with = "null_default")]
    pub settings: ActivitySettings,
}

impl Activity {
    /// Friendly name, or the placeholder when it is missing or blank
    pub fn display_name(&self) -> &str {
        self.friendly_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNNAMED_ACTIVITY)
    }

    pub fn has_data_handlers(&self) -> bool {
        !self.data_handlers.is_empty()
    }

    pub fn has_blanket_view(&self) -> bool {
        !self.blanket_views.is_empty()
    }

    pub fn uses_signing(&self) -> bool {
        self.settings.uses_signing
    }
}

/// Delivery of form data to an external target
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DataHandler {
    #[serde(rename = "DatabehandlerNavn", default)]
    pub handler_name: Option<String>,

    #[serde(rename = "Navn", default)]
    pub target_name: Option<String>,
}

/// Activity condition referencing an approving activity
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(rename = "GodkenderAktivitetId", default, deserialize_with = "lenient_id")]
    pub approver_activity_id: Option<String>,

    #[serde(rename = "Godkendt", default, deserialize_with = "null_default")]
    pub approved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivitySettings {
    #[serde(rename = "BenytSignering", default, deserialize_with = "null_default")]
    pub uses_signing: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MailTemplate {
    #[serde(rename = "Navn", default)]
    pub name: Option<String>,
}

/// Treat an explicit `null` like a missing key
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ids arrive as strings or numbers; anything else is no id
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_defaults_everything() {
        let doc = WorkflowDocument::from_json_str("{}").unwrap();
        assert!(doc.name.is_none());
        assert!(doc.description.is_none());
        assert!(doc.forms().is_empty());
        assert!(doc.activities().is_empty());
        assert!(doc.startup.methods().is_empty());
    }

    #[test]
    fn test_nulls_are_treated_as_missing() {
        let doc = WorkflowDocument::from_json_str(
            r#"{
                "Description": null,
                "ArbejdsgangSkabelonSettings": null,
                "ProcesData": { "Blanketter": null, "Aktiviteter": [
                    { "Id": 7, "AktivitetDatabehandler": null, "Betingelser": [
                        { "GodkenderAktivitetId": "x", "Godkendt": null }
                    ]}
                ]},
                "MailTemplate": null
            }"#,
        )
        .unwrap();

        let activity = &doc.activities()[0];
        assert_eq!(activity.id.as_deref(), Some("7"));
        assert!(!activity.has_data_handlers());
        assert!(!activity.conditions[0].approved);
        assert_eq!(activity.conditions[0].approver_activity_id.as_deref(), Some("x"));
    }

    #[test]
    fn test_top_level_garbage_is_parse_error() {
        let err = WorkflowDocument::from_json_str("not json").unwrap_err();
        assert!(matches!(err, FlowdocError::Parse(_)));

        let err = WorkflowDocument::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, FlowdocError::Parse(_)));
    }

    #[test]
    fn test_startup_methods_keep_fixed_order() {
        let settings = StartupSettings {
            internal: false,
            external: true,
            anonymous: true,
        };
        assert_eq!(
            settings.methods(),
            vec![StartupMethod::External, StartupMethod::Anonymous]
        );
    }

    #[test]
    fn test_form_payload_from_encoded_string() {
        let form = Form {
            payload: Some(json!(
                r#"{"Root":{"Elements":[{"Typename":"ElementDate","Children":[{"Typename":"ElementTime"}]}]},"ValgtVaerdilisteNavn":"Cities"}"#
            )),
        };
        let payload = form.parse_payload(0).unwrap();
        assert_eq!(payload.value_list.as_deref(), Some("Cities"));
        assert_eq!(payload.root.elements[0].typename(), "ElementDate");
        assert_eq!(payload.root.elements[0].children[0].typename(), "ElementTime");
    }

    #[test]
    fn test_form_payload_inline_object_and_missing() {
        let inline = Form {
            payload: Some(json!({ "Root": { "Elements": [{}] } })),
        };
        let payload = inline.parse_payload(0).unwrap();
        assert_eq!(payload.root.elements[0].typename(), UNKNOWN_TYPENAME);

        assert_eq!(Form::default().parse_payload(1).unwrap(), FormPayload::default());
    }

    #[test]
    fn test_form_payload_malformed_is_recoverable() {
        let form = Form {
            payload: Some(json!("{\"Root\": [")),
        };
        let err = form.parse_payload(3).unwrap_err();
        assert!(matches!(err, FlowdocError::FieldTree { form: 3, .. }));
    }

    #[test]
    fn test_display_name_placeholder() {
        let mut activity = Activity::default();
        assert_eq!(activity.display_name(), UNNAMED_ACTIVITY);

        activity.friendly_name = Some("  ".to_string());
        assert_eq!(activity.display_name(), UNNAMED_ACTIVITY);

        activity.friendly_name = Some("Review".to_string());
        assert_eq!(activity.display_name(), "Review");
    }
}
