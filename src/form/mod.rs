//! Form domain layer
//!
//! Schema-driven form engine: field descriptors, the value store, validation,
//! choice resolution and the session lifecycle. Independent of the terminal
//! rendering in `ui`.

mod choices;
mod controller;
mod error;
mod schema;
mod session;
pub mod validator;
mod value;

pub use controller::{FormController, FormEvent};
pub use schema::{ChoiceOption, FieldSchema, Widget};
pub use session::{ChoiceState, FormSession, SessionPhase, SubmissionState, SubmitOutcome};
pub use value::{FieldValue, FieldValueStore};
