//! Layered error types for the networker crate.
//!
//! - [`NetworkError`] - The closed failure taxonomy reported to callers
//! - [`EncodingError`] - Parameter encoding failures (local to the builder)
//! - [`TransportError`] - Failures raised by a [`Transport`](crate::Transport)
//! - [`ConfigError`] - Request manager construction errors

mod config_error;
mod encoding_error;
mod network_error;
mod transport_error;

pub use config_error::ConfigError;
pub use encoding_error::EncodingError;
pub use network_error::NetworkError;
pub use transport_error::TransportError;
