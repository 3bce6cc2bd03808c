//! Fire-and-forget event dispatch.
//!
//! [`Dispatcher::dispatch`] serializes a record and spawns the send on the
//! ambient tokio runtime, returning to the caller immediately. The internal
//! send path returns a `Result`; its error branch is deliberately discarded
//! at the spawn site with a debug log so instrumentation can never crash or
//! block the host game. No retry, no queue: a failed send is lost.

use std::sync::Arc;

use tracing::debug;

use gamepulse_core::EventRecord;

use crate::transport::Transport;

/// Hands assembled event records to the transport without awaiting them.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    collect_url: String,
    api_key: String,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("collect_url", &self.collect_url)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher bound to one endpoint and API key.
    pub fn new(
        transport: Arc<dyn Transport>,
        collect_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            collect_url: collect_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Send a record, best-effort. Returns immediately; completion is never
    /// observed by the caller. Outside a tokio runtime the record is
    /// dropped with a debug log.
    pub fn dispatch(&self, record: &EventRecord) {
        let Ok(body) = serde_json::to_value(record.to_payload()) else {
            // BTreeMap<String, String> payloads cannot actually fail here
            debug!("event payload serialization failed, dropping");
            return;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(
                event_type = %record.event_type,
                "no async runtime, dropping event"
            );
            return;
        };

        let transport = Arc::clone(&self.transport);
        let url = self.collect_url.clone();
        let api_key = self.api_key.clone();
        let event_type = record.event_type.clone();
        drop(handle.spawn(async move {
            if let Err(e) = transport.post_json(&url, &api_key, body).await {
                debug!(error = %e, event_type = %event_type, "event send failed");
            }
        }));
    }
}
