//! Keystroke-level editing of field values

use crate::form::{ChoiceOption, FieldValue};

/// Append a character to the field's raw input.
///
/// Text and integer fields alike keep exactly what was typed; integers are
/// only interpreted by validation and the submitted payload.
pub fn push_char(current: Option<&FieldValue>, c: char) -> FieldValue {
    let mut raw = current.map(FieldValue::display_value).unwrap_or_default();
    raw.push(c);
    FieldValue::Text(raw)
}

/// Remove the last character of the field's raw input
pub fn pop_char(current: Option<&FieldValue>) -> FieldValue {
    let mut raw = current.map(FieldValue::display_value).unwrap_or_default();
    raw.pop();
    FieldValue::Text(raw)
}

/// Step through the options of a choice field.
///
/// The empty selection sits before the first option, so cycling past either
/// end clears the field.
pub fn cycle_choice(
    options: &[ChoiceOption],
    current: Option<&FieldValue>,
    forward: bool,
) -> FieldValue {
    let positions = options.len() + 1;
    let selected = current
        .and_then(FieldValue::as_text)
        .and_then(|value| options.iter().position(|o| o.value == value))
        .map_or(0, |i| i + 1);

    let next = if forward {
        (selected + 1) % positions
    } else {
        (selected + positions - 1) % positions
    };

    match next {
        0 => FieldValue::Text(String::new()),
        n => FieldValue::Text(options[n - 1].value.clone()),
    }
}

/// Label of the selected option, if the value matches one
pub fn selected_label<'a>(
    options: &'a [ChoiceOption],
    current: Option<&FieldValue>,
) -> Option<&'a str> {
    let value = current.and_then(FieldValue::as_text)?;
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.as_str())
}
