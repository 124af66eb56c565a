//! Form session state
//!
//! `FormSession` is the explicit state object owned by the controller. All
//! transitions go through its methods; network results and timer expiries are
//! fed back in as plain values, so every transition can be exercised without
//! a runtime.

use super::error::{FormError, ValidationError};
use super::schema::{ChoiceOption, FieldSchema};
use super::validator;
use super::value::{FieldValue, FieldValueStore};
use crate::client::ClientError;
use std::collections::HashMap;

/// Lifecycle phase of a form session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionPhase {
    /// Waiting for the schema
    #[default]
    Loading,
    /// Accepting edits
    Ready,
    /// Submission request in flight
    Submitting,
    /// Server accepted the form; holds the echoed response until the reset
    Success { response: serde_json::Value },
}

/// Submission lifecycle as seen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// Resolution state of one choice field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceState {
    Loading,
    Ready(Vec<ChoiceOption>),
}

impl ChoiceState {
    /// Resolved options, empty while loading
    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            Self::Loading => &[],
            Self::Ready(options) => options,
        }
    }
}

/// Identifies one schema load; results for older loads are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaGeneration(u64);

/// Identifies one Success period; only the current ticket may reset it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTicket(u64);

/// Result of asking the session to submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed; the payload must be sent to the server
    Started(FieldValueStore),
    /// Validation failed; the error is now displayed
    Blocked(ValidationError),
    /// Submitting is not possible in the current phase
    Ignored,
}

/// State of one form session
#[derive(Debug, Default)]
pub struct FormSession {
    phase: SessionPhase,
    fields: Vec<FieldSchema>,
    values: FieldValueStore,
    choices: HashMap<String, ChoiceState>,
    error: Option<FormError>,
    generation: u64,
    reset_ticket: u64,
}

impl FormSession {
    /// A fresh session waiting for its first schema
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn values(&self) -> &FieldValueStore {
        &self.values
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    /// Error currently displayed, if any
    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn choices(&self, field_id: &str) -> Option<&ChoiceState> {
        self.choices.get(field_id)
    }

    pub fn generation(&self) -> SchemaGeneration {
        SchemaGeneration(self.generation)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.phase, SessionPhase::Success { .. })
    }

    /// Server response captured on success
    pub fn response(&self) -> Option<&serde_json::Value> {
        match &self.phase {
            SessionPhase::Success { response } => Some(response),
            _ => None,
        }
    }

    /// Whether the submit trigger is enabled
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, SessionPhase::Ready) && !self.fields.is_empty()
    }

    pub fn submission_state(&self) -> SubmissionState {
        match (&self.phase, &self.error) {
            (SessionPhase::Submitting, _) => SubmissionState::Submitting,
            (SessionPhase::Success { .. }, _) => SubmissionState::Success,
            (_, Some(err @ (FormError::Submission | FormError::Validation(_)))) => {
                SubmissionState::Error(err.to_string())
            }
            _ => SubmissionState::Idle,
        }
    }

    /// Number of fields holding a non-empty value
    pub fn filled_count(&self) -> usize {
        self.values.filled_count(&self.fields)
    }

    /// Fraction of fields holding a non-empty value, 0 without fields
    pub fn completion_ratio(&self) -> f64 {
        if self.fields.is_empty() {
            return 0.0;
        }
        self.filled_count() as f64 / self.fields.len() as f64
    }

    /// Drop everything and wait for a new schema.
    ///
    /// Refused while a submission is in flight.
    pub fn begin_reload(&mut self) -> Option<SchemaGeneration> {
        if matches!(self.phase, SessionPhase::Submitting) {
            return None;
        }
        self.generation += 1;
        self.phase = SessionPhase::Loading;
        self.fields.clear();
        self.values.clear();
        self.choices.clear();
        self.error = None;
        Some(self.generation())
    }

    /// Apply the outcome of a schema fetch.
    ///
    /// Returns the choice fields whose options must now be resolved.
    pub fn schema_loaded(
        &mut self,
        generation: SchemaGeneration,
        result: Result<Vec<FieldSchema>, ClientError>,
    ) -> Vec<FieldSchema> {
        if generation != self.generation() || !self.is_loading() {
            tracing::debug!("Ignoring stale schema response");
            return Vec::new();
        }

        self.phase = SessionPhase::Ready;
        self.values.clear();
        match result {
            Ok(fields) => {
                tracing::info!("Form loaded with {} fields", fields.len());
                self.choices = fields
                    .iter()
                    .filter(|f| f.is_choice())
                    .map(|f| (f.id.clone(), ChoiceState::Loading))
                    .collect();
                self.fields = fields;
                self.error = None;
                self.fields.iter().filter(|f| f.is_choice()).cloned().collect()
            }
            Err(err) => {
                tracing::warn!("Failed to load form schema: {err}");
                self.fields.clear();
                self.choices.clear();
                self.error = Some(FormError::SchemaLoad);
                Vec::new()
            }
        }
    }

    /// Store the resolved options of a choice field
    pub fn choices_resolved(
        &mut self,
        generation: SchemaGeneration,
        field_id: &str,
        options: Vec<ChoiceOption>,
    ) -> bool {
        if generation != self.generation() {
            tracing::debug!("Ignoring stale options for '{field_id}'");
            return false;
        }
        match self.choices.get_mut(field_id) {
            Some(state) => {
                *state = ChoiceState::Ready(options);
                true
            }
            None => false,
        }
    }

    /// Upsert the value of a known field.
    ///
    /// Clears the displayed error unless the session is showing a success.
    pub fn edit(&mut self, field_id: &str, value: FieldValue) -> bool {
        if self.field(field_id).is_none() {
            tracing::warn!("Ignoring edit of unknown field '{field_id}'");
            return false;
        }
        self.values.upsert(field_id, value);
        if !self.is_success() {
            self.error = None;
        }
        true
    }

    /// Validate and, if valid, enter Submitting.
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Ignored;
        }

        match validator::validate(&self.fields, &self.values) {
            Ok(()) => {
                self.phase = SessionPhase::Submitting;
                self.error = None;
                SubmitOutcome::Started(self.values.to_payload(&self.fields))
            }
            Err(err) => {
                tracing::debug!("Submission blocked: {err}");
                self.error = Some(FormError::Validation(err.clone()));
                SubmitOutcome::Blocked(err)
            }
        }
    }

    /// Apply the outcome of the submission request.
    ///
    /// On success returns the ticket the deferred reset must present.
    pub fn submission_finished(
        &mut self,
        result: Result<serde_json::Value, ClientError>,
    ) -> Option<ResetTicket> {
        if !matches!(self.phase, SessionPhase::Submitting) {
            tracing::debug!("Ignoring submission result outside of Submitting");
            return None;
        }

        match result {
            Ok(response) => {
                tracing::info!("Form submitted");
                self.reset_ticket += 1;
                self.phase = SessionPhase::Success { response };
                Some(ResetTicket(self.reset_ticket))
            }
            Err(err) => {
                tracing::warn!("Failed to submit form: {err}");
                // Values are kept so the user can retry
                self.phase = SessionPhase::Ready;
                self.error = Some(FormError::Submission);
                None
            }
        }
    }

    /// Leave Success after the reset delay, if the ticket is still current.
    pub fn reset_elapsed(&mut self, ticket: ResetTicket) -> bool {
        if !self.is_success() || ticket != ResetTicket(self.reset_ticket) {
            tracing::debug!("Ignoring stale reset");
            return false;
        }
        self.values.clear();
        self.phase = SessionPhase::Ready;
        true
    }
}
