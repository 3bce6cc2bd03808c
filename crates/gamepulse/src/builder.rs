//! Fluent event builder.
//!
//! A builder is only obtainable from a client entry point, so its category
//! and type are already validated (or deliberately unchecked, for custom
//! events) by the time it exists. `track()` snapshots the client's current
//! identity and device info, assembles one record, and hands it to the
//! dispatcher without awaiting delivery.

use std::collections::BTreeMap;

use gamepulse_core::{Classification, DeviceInfo, EventRecord};
use gamepulse_transport::Dispatcher;

use crate::client::Client;

/// Accumulates one event and dispatches it.
///
/// Immutable chaining: each call takes and returns the builder by value.
#[derive(Debug)]
pub struct EventBuilder {
    dispatcher: Dispatcher,
    device: DeviceInfo,
    identity: crate::client::SharedIdentity,
    classification: Classification,
    category: String,
    event_type: String,
    properties: BTreeMap<String, String>,
}

impl EventBuilder {
    pub(crate) fn bound(
        client: &Client,
        classification: Classification,
        category: String,
        event_type: String,
    ) -> Self {
        Self {
            dispatcher: client.dispatcher().clone(),
            device: client.device_info().clone(),
            identity: client.identity_handle(),
            classification,
            category,
            event_type,
            properties: BTreeMap::new(),
        }
    }

    /// Replace the property set wholesale. Later calls overwrite earlier
    /// ones; there is no merging.
    #[must_use]
    pub fn properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    /// Add a single property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.properties.insert(key.into(), value.into());
        self
    }

    /// Assemble the record and dispatch it, fire-and-forget.
    ///
    /// Never fails: delivery problems are logged and discarded so
    /// instrumentation cannot crash the host.
    pub fn track(self) {
        let identity = self.identity.snapshot();
        let record = EventRecord::capture(
            self.classification,
            self.event_type,
            self.category,
            self.properties,
            (*identity).clone(),
            self.device,
        );
        self.dispatcher.dispatch(&record);
    }

    /// Alias for [`EventBuilder::track`].
    pub fn trigger(self) {
        self.track();
    }
}
