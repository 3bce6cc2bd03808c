//! # gamepulse-transport
//!
//! Delivery layer for the GamePulse analytics SDK.
//!
//! - [`endpoint::Environment`] — predefined development/production
//!   collection endpoints
//! - [`transport::Transport`] — the async seam the dispatcher posts
//!   through; [`transport::HttpTransport`] is the reqwest-backed default
//! - [`dispatcher::Dispatcher`] — serializes event records and sends them
//!   fire-and-forget on the ambient tokio runtime
//!
//! Nothing in this crate surfaces delivery failures to the caller: a failed
//! send is logged at debug level and lost, by contract.

#![deny(unsafe_code)]

pub mod dispatcher;
pub mod endpoint;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use endpoint::Environment;
pub use transport::{HttpTransport, Transport, TransportError};
