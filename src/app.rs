//! Application state and core logic

use crate::client::FormBackend;
use crate::form::{FormController, FormEvent, FormSession, SubmitOutcome, Widget};
use crate::state::{cycle_choice, pop_char, push_char, FormFocus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Main application struct
pub struct App {
    /// Form session controller
    controller: FormController,
    /// Completions of the controller's background work
    events: UnboundedReceiver<FormEvent>,
    /// Keyboard focus within the form
    pub focus: FormFocus,
    /// Server the form was loaded from, shown in the status bar
    pub server_url: String,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance and start loading the form
    pub fn new(backend: Arc<dyn FormBackend>, server_url: impl Into<String>) -> Self {
        let (mut controller, events) = FormController::new(backend);
        controller.start();

        Self {
            controller,
            events,
            focus: FormFocus::default(),
            server_url: server_url.into(),
            quit: false,
        }
    }

    pub fn session(&self) -> &FormSession {
        self.controller.session()
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply every completed background operation.
    /// Returns true if anything changed.
    pub fn drain_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            self.controller.handle_event(event);
            changed = true;
        }
        changed
    }

    fn field_count(&self) -> usize {
        self.session().fields().len()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(crate::platform::SHORTCUT_MODIFIER);

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Char('r') if ctrl => self.reload(),
            KeyCode::Char('s') if ctrl => self.submit(),
            _ if self.session().is_loading() || self.session().is_success() => {
                // No editing while loading or showing the confirmation
            }
            _ if ctrl => {}
            KeyCode::Tab | KeyCode::Down => self.focus.next(self.field_count()),
            KeyCode::BackTab | KeyCode::Up => self.focus.prev(self.field_count()),
            KeyCode::Enter if self.focus.is_submit(self.field_count()) => self.submit(),
            KeyCode::Enter => self.focus.next(self.field_count()),
            _ => self.handle_field_key(key),
        }
    }

    /// Edit the focused field
    fn handle_field_key(&mut self, key: KeyEvent) {
        let Some(index) = self.focus.field_index(self.field_count()) else {
            return;
        };
        let session = self.controller.session();
        let field = &session.fields()[index];
        let current = session.value(&field.id);

        let value = match (field.widget, key.code) {
            (Widget::Text | Widget::Integer, KeyCode::Char(c)) => push_char(current, c),
            (Widget::Text | Widget::Integer, KeyCode::Backspace) => pop_char(current),
            (Widget::Choice, KeyCode::Right | KeyCode::Char(' ')) => {
                let options = session.choices(&field.id).map(|c| c.options()).unwrap_or(&[]);
                cycle_choice(options, current, true)
            }
            (Widget::Choice, KeyCode::Left) => {
                let options = session.choices(&field.id).map(|c| c.options()).unwrap_or(&[]);
                cycle_choice(options, current, false)
            }
            (Widget::Choice, KeyCode::Backspace) => crate::form::FieldValue::default(),
            _ => return,
        };

        let field_id = field.id.clone();
        self.controller.edit(&field_id, value);
    }

    fn submit(&mut self) {
        match self.controller.submit() {
            SubmitOutcome::Started(_) => tracing::debug!("Submitting form"),
            SubmitOutcome::Blocked(err) => {
                // Jump to the offending field
                let count = self.field_count();
                if let Some(index) = self
                    .session()
                    .fields()
                    .iter()
                    .position(|f| f.id == err.field_id())
                {
                    self.focus.focus_field(index, count);
                }
            }
            SubmitOutcome::Ignored => {}
        }
    }

    fn reload(&mut self) {
        if self.controller.reload() {
            self.focus.reset();
        }
    }
}
