//! Option lists for choice fields
//!
//! A handful of well-known field ids carry a built-in option list. Every
//! other choice field asks the server, and falls back to synthesized options
//! when the server answers with nothing useful or not at all. Resolution
//! never fails: the caller always gets a non-empty list.

use super::schema::{ChoiceOption, FieldSchema};
use crate::client::FormBackend;
use std::sync::Arc;

/// Number of placeholders synthesized for an empty or malformed answer
pub const PLACEHOLDER_COUNT: usize = 3;

/// Number of fallbacks synthesized for a failed request
pub const FALLBACK_COUNT: usize = 2;

/// Resolves the selectable options of choice fields
#[derive(Clone)]
pub struct ChoiceResolver {
    backend: Arc<dyn FormBackend>,
}

impl ChoiceResolver {
    pub fn new(backend: Arc<dyn FormBackend>) -> Self {
        Self { backend }
    }

    /// Resolve the options of one field. Nothing is cached between calls.
    pub async fn resolve(&self, field: &FieldSchema) -> Vec<ChoiceOption> {
        if let Some(options) = static_choices(&field.id) {
            return options;
        }

        match self.backend.fetch_choices(&field.id).await {
            Ok(body) => match decode_options(body) {
                Some(options) => {
                    tracing::debug!("Resolved {} options for '{}'", options.len(), field.id);
                    options
                }
                None => {
                    tracing::warn!("Empty or malformed option list for '{}'", field.id);
                    placeholder_options(field)
                }
            },
            Err(err) => {
                tracing::warn!("Failed to fetch options for '{}': {err}", field.id);
                fallback_options(field)
            }
        }
    }
}

/// Built-in option lists keyed by field id
pub fn static_choices(field_id: &str) -> Option<Vec<ChoiceOption>> {
    let pairs: &[(&str, &str)] = match field_id {
        "category" => &[("tech", "Tech"), ("business", "Business"), ("health", "Health")],
        "language" => &[("en", "English"), ("hu", "Hungarian"), ("de", "German")],
        "color" => &[
            ("red", "Red"),
            ("blue", "Blue"),
            ("green", "Green"),
            ("yellow", "Yellow"),
            ("purple", "Purple"),
        ],
        "country" => &[
            ("hu", "Hungary"),
            ("at", "Austria"),
            ("de", "Germany"),
            ("sk", "Slovakia"),
        ],
        "status" => &[("off", "Offline"), ("on", "Online"), ("work", "Working")],
        _ => return None,
    };

    Some(
        pairs
            .iter()
            .map(|(value, label)| ChoiceOption::new(*value, *label))
            .collect(),
    )
}

/// A non-empty array of `{value, label}` objects, or nothing
fn decode_options(body: serde_json::Value) -> Option<Vec<ChoiceOption>> {
    serde_json::from_value::<Vec<ChoiceOption>>(body)
        .ok()
        .filter(|options| !options.is_empty())
}

/// Options substituted when the server answered with an empty or malformed list
pub fn placeholder_options(field: &FieldSchema) -> Vec<ChoiceOption> {
    (1..=PLACEHOLDER_COUNT)
        .map(|n| {
            ChoiceOption::new(
                format!("{}_{n}", field.id),
                format!("{} option {n}", field.label),
            )
        })
        .collect()
}

/// Options substituted when the request itself failed
pub fn fallback_options(field: &FieldSchema) -> Vec<ChoiceOption> {
    (1..=FALLBACK_COUNT)
        .map(|n| {
            ChoiceOption::new(
                format!("{}_fallback_{n}", field.id),
                format!("{} - Fallback {n}", field.label),
            )
        })
        .collect()
}
