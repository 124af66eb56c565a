//! Field values and the per-session value store

use super::schema::{FieldSchema, Widget};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashMap;

/// Type-safe field values
///
/// Serialized untagged, so the submitted payload carries plain JSON strings
/// and numbers. While editing, integer fields hold the raw keystrokes as
/// `Text`; they become a `Number` only in the submitted payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Number),
    Text(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Empty strings count as "no value"
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// Get the text value (returns `None` for numbers)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    /// Numeric reading of the value, `None` if it is not a finite number
    pub fn as_f64(&self) -> Option<f64> {
        let number = match self {
            FieldValue::Number(n) => n.as_f64(),
            FieldValue::Text(raw) => raw.trim().parse::<f64>().ok(),
        };
        number.filter(|x| x.is_finite())
    }

    /// The value as a JSON whole number.
    ///
    /// Values beyond the 64-bit range are kept as whole floats.
    pub fn to_whole_number(&self) -> Option<Number> {
        if let FieldValue::Number(n) = self {
            if n.is_i64() || n.is_u64() {
                return Some(n.clone());
            }
        }
        if let Some(raw) = self.as_text() {
            let raw = raw.trim();
            if let Ok(n) = raw.parse::<i64>() {
                return Some(n.into());
            }
            if let Ok(n) = raw.parse::<u64>() {
                return Some(n.into());
            }
        }
        self.as_f64()
            .filter(|x| x.fract() == 0.0)
            .and_then(Number::from_f64)
    }

    /// Get the display value for rendering and editing
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// Current user-entered values keyed by field id
///
/// Serializes as the flat JSON object posted to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValueStore {
    values: HashMap<String, FieldValue>,
}

impl FieldValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    /// Insert or replace the value of a field
    pub fn upsert(&mut self, field_id: &str, value: FieldValue) {
        self.values.insert(field_id.to_string(), value);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field has a non-empty value
    pub fn is_filled(&self, field_id: &str) -> bool {
        self.values.get(field_id).is_some_and(|v| !v.is_empty())
    }

    /// Count of schema fields holding a non-empty value
    pub fn filled_count(&self, fields: &[FieldSchema]) -> usize {
        fields.iter().filter(|f| self.is_filled(&f.id)).count()
    }

    /// Copy of the store as sent to the server, with the raw input of
    /// integer fields converted to JSON numbers.
    pub fn to_payload(&self, fields: &[FieldSchema]) -> Self {
        let mut payload = self.clone();
        for field in fields.iter().filter(|f| f.widget == Widget::Integer) {
            if let Some(number) = self.get(&field.id).and_then(FieldValue::to_whole_number) {
                payload.upsert(&field.id, FieldValue::Number(number));
            }
        }
        payload
    }
}
