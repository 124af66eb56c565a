//! Reusable UI components

mod alert;
mod button;

pub use alert::{render_alert, AlertKind};
pub use button::{render_button, BUTTON_HEIGHT};
