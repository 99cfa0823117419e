//! Serializable stand-ins for the parts of a live DOM the heuristics read.
//!
//! The extension scrapes these from the page and posts them; every engine in
//! this service is a pure function over them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Input,
    Textarea,
    Select,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

/// One form control: its identifying strings plus current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    /// The `type` attribute of an `<input>` (`email`, `file`, `tel`, ...).
    pub input_type: String,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    /// Text of the `<label for=id>` or the enclosing `<label>`.
    pub label: String,
    pub value: String,
    pub options: Vec<SelectOption>,
}

impl FieldDescriptor {
    pub fn is_input_of_type(&self, input_type: &str) -> bool {
        self.kind == FieldKind::Input && self.input_type.eq_ignore_ascii_case(input_type)
    }

    /// Lowercased name, id, placeholder and label joined by spaces.
    pub fn identifier(&self) -> String {
        [
            self.name.as_str(),
            self.id.as_str(),
            self.placeholder.as_str(),
            self.label.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// A text-bearing element the job-details extractor may pick from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextElement {
    pub tag: String,
    pub classes: Vec<String>,
    /// Value of the `data-testid` attribute, if any.
    pub test_id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    /// Text content of every `button` and `input[type=submit]`.
    pub buttons: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    pub elements: Vec<TextElement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_joins_and_lowercases() {
        let field = FieldDescriptor {
            name: "Applicant_Email".to_string(),
            id: "email-1".to_string(),
            placeholder: "you@example.com".to_string(),
            label: "Email Address".to_string(),
            ..Default::default()
        };
        assert_eq!(
            field.identifier(),
            "applicant_email email-1 you@example.com email address"
        );
    }

    #[test]
    fn test_input_type_only_applies_to_inputs() {
        let textarea = FieldDescriptor {
            kind: FieldKind::Textarea,
            input_type: "email".to_string(),
            ..Default::default()
        };
        assert!(!textarea.is_input_of_type("email"));

        let input = FieldDescriptor {
            input_type: "EMAIL".to_string(),
            ..Default::default()
        };
        assert!(input.is_input_of_type("email"));
    }

    #[test]
    fn test_snapshot_deserializes_sparse_payload() {
        let json = r#"{
            "url": "https://boards.greenhouse.io/acme/jobs/1",
            "fields": [{"kind": "select", "name": "country", "options": [{"value": "us", "text": "United States"}]}]
        }"#;
        let page: PageSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(page.fields[0].kind, FieldKind::Select);
        assert_eq!(page.fields[0].options[0].text, "United States");
        assert!(page.buttons.is_empty());
    }
}
