//! HTTP client module for talking to the form server

mod client;
mod error;
mod traits;

pub use client::HttpFormClient;
pub use error::ClientError;
pub use traits::FormBackend;

#[cfg(test)]
pub use traits::MockFormBackend;
