//! # gamepulse-core
//!
//! Foundation types for the GamePulse analytics SDK.
//!
//! This crate provides the shared vocabulary the transport and façade
//! crates depend on:
//!
//! - **Taxonomy**: [`taxonomy::EventCategory`] — the closed set of
//!   predefined event categories and their valid event types
//! - **Identity**: [`identity::Identity`] — immutable session/user/anonymous
//!   identifier snapshot, replaced wholesale on session transitions
//! - **Device**: [`device::DeviceInfo`] and [`device::Platform`] — immutable
//!   device metadata captured once at initialization
//! - **Records**: [`record::EventRecord`] and its wire shape
//!   [`record::EventPayload`]
//! - **Errors**: [`errors::Error`] hierarchy via `thiserror`
//!
//! ## Crate Position
//!
//! Foundation crate. No I/O, no async. Depended on by `gamepulse-transport`
//! and the `gamepulse` façade.

#![deny(unsafe_code)]

pub mod device;
pub mod errors;
pub mod identity;
pub mod record;
pub mod taxonomy;

pub use device::{DeviceInfo, Platform};
pub use errors::{Error, Result};
pub use identity::{Identity, IdentityBuilder};
pub use record::{Classification, EventPayload, EventRecord};
pub use taxonomy::EventCategory;
