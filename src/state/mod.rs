//! Application state module

mod focus;
mod input;

pub use focus::*;
pub use input::*;
