//! Field schema types as delivered by the form server

use serde::{Deserialize, Serialize};

/// Input kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    /// Free text input
    Text,
    /// Whole number input
    Integer,
    /// Single selection from a list of options
    Choice,
}

/// Descriptor of one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Stable key, also used as the key of the submitted payload
    pub id: String,
    /// Display label, embedded in validation messages
    pub label: String,
    pub widget: Widget,
}

impl FieldSchema {
    pub fn new(id: &str, label: &str, widget: Widget) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            widget,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.widget, Widget::Choice)
    }
}

/// One selectable value of a choice field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod widget {
        use super::*;

        #[test]
        fn test_deserializes_lowercase_names() {
            let widgets: Vec<Widget> =
                serde_json::from_str(r#"["text", "integer", "choice"]"#).unwrap();
            assert_eq!(widgets, vec![Widget::Text, Widget::Integer, Widget::Choice]);
        }

        #[test]
        fn test_unknown_widget_is_rejected() {
            let result: Result<Widget, _> = serde_json::from_str(r#""checkbox""#);
            assert!(result.is_err());
        }
    }

    mod field_schema {
        use super::*;

        #[test]
        fn test_deserialize_schema_array() {
            let json = r#"[
                {"id": "name", "label": "Name", "widget": "text"},
                {"id": "age", "label": "Age", "widget": "integer"}
            ]"#;
            let fields: Vec<FieldSchema> = serde_json::from_str(json).unwrap();

            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0], FieldSchema::new("name", "Name", Widget::Text));
            assert_eq!(fields[1], FieldSchema::new("age", "Age", Widget::Integer));
        }

        #[test]
        fn test_missing_widget_is_rejected() {
            let json = r#"{"id": "name", "label": "Name"}"#;
            let result: Result<FieldSchema, _> = serde_json::from_str(json);
            assert!(result.is_err());
        }

        #[test]
        fn test_is_choice() {
            assert!(FieldSchema::new("color", "Color", Widget::Choice).is_choice());
            assert!(!FieldSchema::new("name", "Name", Widget::Text).is_choice());
        }
    }

    #[test]
    fn test_choice_option_deserialize() {
        let option: ChoiceOption =
            serde_json::from_str(r#"{"value": "en", "label": "English"}"#).unwrap();
        assert_eq!(option, ChoiceOption::new("en", "English"));
    }
}
