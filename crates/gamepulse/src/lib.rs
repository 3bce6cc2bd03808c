//! # gamepulse
//!
//! Client-side analytics SDK for games: typed builders for predefined and
//! custom events, session and identity management, and asynchronous
//! best-effort delivery to the GamePulse collection endpoint.
//!
//! ## Usage
//!
//! ```no_run
//! use gamepulse::{Client, Environment, Identity};
//!
//! # fn main() -> gamepulse::Result<()> {
//! let client = Client::init("your-api-key", Environment::Development)
//!     .identity(Identity::builder().session_id("s1").user_id("u1").build()?)
//!     .create()?;
//!
//! client
//!     .gameplay_event("level_start")?
//!     .property("level", "3")
//!     .track();
//!
//! client.start_session();
//! # Ok(())
//! # }
//! ```
//!
//! ## Instance management
//!
//! [`Client::init`] returns an [`InitBuilder`]. `create()` registers the
//! built client as the process-wide instance — concurrent `create()` calls
//! collapse to a single winner and everyone gets the same `Arc` — and
//! [`client()`] retrieves it afterwards. Hosts that prefer dependency
//! injection call `build()` instead and pass the `Arc<Client>` around
//! themselves; the global handle is never touched on that path.
//!
//! ## Delivery contract
//!
//! Precondition violations (bad identity config, unknown event type, empty
//! API key, use before initialization) are returned as [`Error`]s. Past
//! that point everything is fire-and-forget: serialization and network
//! failures are logged via `tracing` at debug level and discarded, never
//! surfaced to the game.

#![deny(unsafe_code)]

pub mod builder;
pub mod client;
pub mod platform;

use std::sync::{Arc, RwLock};

pub use builder::EventBuilder;
pub use client::{Client, InitBuilder};
pub use platform::{PlatformInfo, StaticPlatform};

pub use gamepulse_core::{
    Classification, DeviceInfo, Error, EventCategory, EventPayload, EventRecord, Identity,
    IdentityBuilder, Platform, Result, taxonomy,
};
pub use gamepulse_transport::{Environment, HttpTransport, Transport};

/// Process-wide client instance.
///
/// `RwLock<Option<Arc<..>>>` rather than `OnceLock`: the check-and-create
/// step must be atomic (first `create()` wins, later ones observe the
/// existing instance), and tests need to clear it between cases.
static CLIENT: RwLock<Option<Arc<Client>>> = RwLock::new(None);

/// The process-wide client, if the SDK has been initialized.
pub fn client() -> Result<Arc<Client>> {
    CLIENT
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .as_ref()
        .map(Arc::clone)
        .ok_or(Error::NotInitialized)
}

/// Atomic check-and-create for the process-wide instance.
///
/// Holds the write lock across the check and the construction so at most
/// one client is ever built; losers of the race get the winner's instance.
/// The construction itself performs no I/O, so holding the lock is cheap.
pub(crate) fn get_or_init(
    build: impl FnOnce() -> Result<Arc<Client>>,
) -> Result<Arc<Client>> {
    let mut guard = CLIENT
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(existing) = guard.as_ref() {
        return Ok(Arc::clone(existing));
    }
    let client = build()?;
    *guard = Some(Arc::clone(&client));
    Ok(client)
}

/// Clear the process-wide instance (test-only).
#[cfg(test)]
pub(crate) fn reset() {
    let mut guard = CLIENT
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = None;
}
