//! Client-side validation of the value store against the schema

use super::error::ValidationError;
use super::schema::{FieldSchema, Widget};
use super::value::{FieldValue, FieldValueStore};

/// Minimum trimmed length of text fields
pub const MIN_TEXT_LEN: usize = 2;

/// Validate every field in schema order and return the first failure.
pub fn validate(fields: &[FieldSchema], values: &FieldValueStore) -> Result<(), ValidationError> {
    fields
        .iter()
        .try_for_each(|field| validate_field(field, values.get(&field.id)))
}

/// Validate a single field value
pub fn validate_field(
    field: &FieldSchema,
    value: Option<&FieldValue>,
) -> Result<(), ValidationError> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            return Err(ValidationError::Required {
                field_id: field.id.clone(),
                label: field.label.clone(),
            })
        }
    };

    match field.widget {
        Widget::Integer => check_integer(field, value),
        Widget::Text => check_text(field, value),
        Widget::Choice => Ok(()),
    }
}

fn check_integer(field: &FieldSchema, value: &FieldValue) -> Result<(), ValidationError> {
    let number = value.as_f64();
    if number.is_some_and(|x| x < 0.0) {
        return Err(ValidationError::Negative {
            field_id: field.id.clone(),
            label: field.label.clone(),
        });
    }

    // Whole numbers of any magnitude are accepted
    match number {
        Some(x) if x.fract() == 0.0 => Ok(()),
        _ => Err(ValidationError::NotWholeNumber {
            field_id: field.id.clone(),
            label: field.label.clone(),
        }),
    }
}

fn check_text(field: &FieldSchema, value: &FieldValue) -> Result<(), ValidationError> {
    match value {
        FieldValue::Text(s) if s.trim().chars().count() < MIN_TEXT_LEN => {
            Err(ValidationError::TooShort {
                field_id: field.id.clone(),
                label: field.label.clone(),
                min: MIN_TEXT_LEN,
            })
        }
        _ => Ok(()),
    }
}
