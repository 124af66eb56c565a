//! Form session controller
//!
//! Drives a `FormSession` against a `FormBackend`. Every network operation
//! and the success reset timer run as spawned tasks that report back through
//! a channel of `FormEvent`s; the owner of the receiver applies them one at a
//! time with `handle_event`, so the session itself is never shared.

use super::choices::ChoiceResolver;
use super::schema::{ChoiceOption, FieldSchema};
use super::session::{FormSession, ResetTicket, SchemaGeneration, SubmitOutcome};
use super::value::FieldValue;
use crate::client::{ClientError, FormBackend};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// How long the success confirmation stays before the form resets
pub const RESET_DELAY: Duration = Duration::from_secs(5);

/// Completion of an asynchronous operation
#[derive(Debug)]
pub enum FormEvent {
    SchemaLoaded {
        generation: SchemaGeneration,
        result: Result<Vec<FieldSchema>, ClientError>,
    },
    ChoicesResolved {
        generation: SchemaGeneration,
        field_id: String,
        options: Vec<ChoiceOption>,
    },
    SubmissionFinished(Result<serde_json::Value, ClientError>),
    ResetElapsed(ResetTicket),
}

/// Owns the session and schedules the work it needs
pub struct FormController {
    session: FormSession,
    backend: Arc<dyn FormBackend>,
    resolver: ChoiceResolver,
    events: UnboundedSender<FormEvent>,
    /// Deferred reset of the current Success period
    pending_reset: Option<JoinHandle<()>>,
}

impl FormController {
    /// Create a controller and the receiver its events arrive on
    pub fn new(backend: Arc<dyn FormBackend>) -> (Self, UnboundedReceiver<FormEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let controller = Self {
            session: FormSession::new(),
            resolver: ChoiceResolver::new(Arc::clone(&backend)),
            backend,
            events,
            pending_reset: None,
        };
        (controller, rx)
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// Issue the initial schema fetch
    pub fn start(&mut self) {
        self.spawn_load(self.session.generation());
    }

    /// Discard the current form and fetch the schema again
    pub fn reload(&mut self) -> bool {
        match self.session.begin_reload() {
            Some(generation) => {
                self.cancel_pending_reset();
                self.spawn_load(generation);
                true
            }
            None => false,
        }
    }

    /// Update the value of a field
    pub fn edit(&mut self, field_id: &str, value: FieldValue) -> bool {
        self.session.edit(field_id, value)
    }

    /// Validate and, on success, send the form
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.session.begin_submit();
        if let SubmitOutcome::Started(payload) = &outcome {
            let backend = Arc::clone(&self.backend);
            let events = self.events.clone();
            let payload = payload.clone();
            tokio::spawn(async move {
                let result = backend.submit(&payload).await;
                // The receiver may be gone after shutdown
                let _ = events.send(FormEvent::SubmissionFinished(result));
            });
        }
        outcome
    }

    /// Apply a completed operation to the session
    pub fn handle_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::SchemaLoaded { generation, result } => {
                let pending = self.session.schema_loaded(generation, result);
                for field in pending {
                    self.spawn_choice_resolution(generation, field);
                }
            }
            FormEvent::ChoicesResolved {
                generation,
                field_id,
                options,
            } => {
                self.session.choices_resolved(generation, &field_id, options);
            }
            FormEvent::SubmissionFinished(result) => {
                if let Some(ticket) = self.session.submission_finished(result) {
                    self.schedule_reset(ticket);
                }
            }
            FormEvent::ResetElapsed(ticket) => {
                if self.session.reset_elapsed(ticket) {
                    self.pending_reset = None;
                }
            }
        }
    }

    fn spawn_load(&self, generation: SchemaGeneration) {
        tracing::debug!("Loading form schema");
        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = backend.fetch_schema().await;
            let _ = events.send(FormEvent::SchemaLoaded { generation, result });
        });
    }

    /// Each choice field resolves in its own task, in no particular order
    fn spawn_choice_resolution(&self, generation: SchemaGeneration, field: FieldSchema) {
        let resolver = self.resolver.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let options = resolver.resolve(&field).await;
            let _ = events.send(FormEvent::ChoicesResolved {
                generation,
                field_id: field.id,
                options,
            });
        });
    }

    fn schedule_reset(&mut self, ticket: ResetTicket) {
        self.cancel_pending_reset();
        let events = self.events.clone();
        self.pending_reset = Some(tokio::spawn(async move {
            tokio::time::sleep(RESET_DELAY).await;
            let _ = events.send(FormEvent::ResetElapsed(ticket));
        }));
    }

    fn cancel_pending_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
        }
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        self.cancel_pending_reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockFormBackend;
    use crate::form::{ChoiceState, FieldValueStore, SessionPhase, Widget};
    use serde_json::json;
    use tokio::time::Instant;

    fn schema() -> Vec<FieldSchema> {
        vec![
            FieldSchema::new("name", "Name", Widget::Text),
            FieldSchema::new("age", "Age", Widget::Integer),
        ]
    }

    fn controller_with(mock: MockFormBackend) -> (FormController, UnboundedReceiver<FormEvent>) {
        FormController::new(Arc::new(mock))
    }

    /// Receive the next event and apply it
    async fn pump(controller: &mut FormController, rx: &mut UnboundedReceiver<FormEvent>) {
        let event = rx.recv().await.expect("event channel closed");
        controller.handle_event(event);
    }

    mod loading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_start_loads_schema_into_ready() {
            let mut mock = MockFormBackend::new();
            mock.expect_fetch_schema().times(1).returning(|| Ok(schema()));
            let (mut controller, mut rx) = controller_with(mock);

            controller.start();
            assert!(controller.session().is_loading());
            pump(&mut controller, &mut rx).await;

            assert_eq!(controller.session().phase(), &SessionPhase::Ready);
            assert_eq!(controller.session().fields(), schema().as_slice());
        }

        #[tokio::test]
        async fn test_load_failure_surfaces_error_and_blocks_submit() {
            let mut mock = MockFormBackend::new();
            mock.expect_fetch_schema()
                .returning(|| Err(ClientError::Status(500)));
            mock.expect_submit().times(0);
            let (mut controller, mut rx) = controller_with(mock);

            controller.start();
            pump(&mut controller, &mut rx).await;

            assert!(controller.session().fields().is_empty());
            assert!(controller.session().error().is_some());
            assert_eq!(controller.submit(), SubmitOutcome::Ignored);
        }

        #[tokio::test]
        async fn test_choice_fields_resolve_independently() {
            let mut mock = MockFormBackend::new();
            mock.expect_fetch_schema().returning(|| {
                Ok(vec![
                    FieldSchema::new("color", "Color", Widget::Choice),
                    FieldSchema::new("size", "Size", Widget::Choice),
                ])
            });
            mock.expect_fetch_choices()
                .withf(|id| id == "size")
                .times(1)
                .returning(|_| Err(ClientError::Status(404)));
            let (mut controller, mut rx) = controller_with(mock);

            controller.start();
            pump(&mut controller, &mut rx).await;
            assert_eq!(
                controller.session().choices("color"),
                Some(&ChoiceState::Loading)
            );

            pump(&mut controller, &mut rx).await;
            pump(&mut controller, &mut rx).await;

            let color = controller.session().choices("color").unwrap().options();
            let size = controller.session().choices("size").unwrap().options();
            assert_eq!(color.len(), 5);
            assert_eq!(size.len(), 2);
            assert_eq!(size[0].value, "size_fallback_1");
        }

        #[tokio::test]
        async fn test_reload_fetches_schema_again() {
            let mut mock = MockFormBackend::new();
            mock.expect_fetch_schema().times(2).returning(|| Ok(schema()));
            let (mut controller, mut rx) = controller_with(mock);

            controller.start();
            pump(&mut controller, &mut rx).await;
            controller.edit("name", "Al".into());

            assert!(controller.reload());
            assert!(controller.session().values().is_empty());
            pump(&mut controller, &mut rx).await;
            assert_eq!(controller.session().phase(), &SessionPhase::Ready);
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        async fn loaded(mock: MockFormBackend) -> (FormController, UnboundedReceiver<FormEvent>) {
            let (mut controller, mut rx) = controller_with(mock);
            controller.start();
            pump(&mut controller, &mut rx).await;
            (controller, rx)
        }

        #[tokio::test(start_paused = true)]
        async fn test_successful_submission_resets_after_delay() {
            let mut mock = MockFormBackend::new();
            mock.expect_fetch_schema().returning(|| Ok(schema()));
            mock.expect_submit()
                .withf(|values: &FieldValueStore| {
                    serde_json::to_value(values).unwrap() == json!({"name": "Al", "age": 5})
                })
                .times(1)
                .returning(|_| Ok(json!({"id": 42, "status": "saved"})));
            let (mut controller, mut rx) = loaded(mock).await;

            controller.edit("name", "Al".into());
            controller.edit("age", "5".into());
            assert!(matches!(controller.submit(), SubmitOutcome::Started(_)));
            assert_eq!(controller.session().phase(), &SessionPhase::Submitting);

            pump(&mut controller, &mut rx).await;
            let succeeded_at = Instant::now();
            assert_eq!(
                controller.session().response(),
                Some(&json!({"id": 42, "status": "saved"}))
            );

            // Still showing the confirmation just before the delay runs out
            tokio::task::yield_now().await;
            tokio::time::advance(RESET_DELAY - Duration::from_millis(1)).await;
            assert!(rx.try_recv().is_err());
            assert!(controller.session().is_success());

            pump(&mut controller, &mut rx).await;
            assert!(succeeded_at.elapsed() >= RESET_DELAY);

            assert_eq!(controller.session().phase(), &SessionPhase::Ready);
            assert!(controller.session().values().is_empty());
            assert!(controller.session().response().is_none());
        }

        #[tokio::test]
        async fn test_invalid_form_never_reaches_server() {
            let mut mock = MockFormBackend::new();
            mock.expect_fetch_schema().returning(|| Ok(schema()));
            mock.expect_submit().times(0);
            let (mut controller, _rx) = loaded(mock).await;

            controller.edit("name", "A".into());
            controller.edit("age", 5.into());

            let outcome = controller.submit();
            assert!(matches!(outcome, SubmitOutcome::Blocked(_)));
            assert_eq!(controller.session().phase(), &SessionPhase::Ready);
            let message = controller.session().error().unwrap().to_string();
            assert!(message.contains("Name"));
        }

        #[tokio::test]
        async fn test_failed_submission_keeps_values_for_retry() {
            let mut mock = MockFormBackend::new();
            mock.expect_fetch_schema().returning(|| Ok(schema()));
            mock.expect_submit()
                .times(1)
                .returning(|_| Err(ClientError::Status(500)));
            let (mut controller, mut rx) = loaded(mock).await;

            controller.edit("name", "Al".into());
            controller.edit("age", 5.into());
            controller.submit();
            pump(&mut controller, &mut rx).await;

            assert_eq!(controller.session().phase(), &SessionPhase::Ready);
            assert_eq!(controller.session().values().len(), 2);
            assert!(controller.session().error().is_some());
        }

        #[tokio::test(start_paused = true)]
        async fn test_reload_during_success_cancels_reset() {
            let mut mock = MockFormBackend::new();
            mock.expect_fetch_schema().times(2).returning(|| Ok(schema()));
            mock.expect_submit().returning(|_| Ok(json!({})));
            let (mut controller, mut rx) = loaded(mock).await;

            controller.edit("name", "Al".into());
            controller.edit("age", 5.into());
            controller.submit();
            pump(&mut controller, &mut rx).await;
            assert!(controller.session().is_success());

            controller.reload();
            pump(&mut controller, &mut rx).await;
            controller.edit("name", "Bo".into());

            tokio::time::advance(RESET_DELAY * 2).await;
            assert!(rx.try_recv().is_err());
            assert_eq!(
                controller.session().value("name"),
                Some(&FieldValue::from("Bo"))
            );
        }
    }
}
