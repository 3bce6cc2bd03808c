//! Event records and their wire payloads.
//!
//! An [`EventRecord`] is the transient, per-call assembly of one event:
//! taxonomy fields, accumulated properties, and snapshots of the identity
//! and device info at capture time. It is converted to an [`EventPayload`]
//! (the exact JSON shape the collection endpoint expects) and discarded
//! after dispatch — records are never persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::device::DeviceInfo;
use crate::identity::Identity;

/// Whether an event came from the predefined taxonomy or is free-form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    /// Predefined, taxonomy-checked event.
    System,
    /// Free-form category/type, no taxonomy check.
    Custom,
}

impl Classification {
    /// Wire name of the classification.
    pub fn name(self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::Custom => "CUSTOM",
        }
    }
}

/// One assembled event, ready for dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    /// SYSTEM or CUSTOM.
    pub classification: Classification,
    /// Event type string, e.g. `level_start`.
    pub event_type: String,
    /// Category wire name, e.g. `gameplay`.
    pub category: String,
    /// Caller-supplied properties. Ordered so serialization is stable.
    pub properties: BTreeMap<String, String>,
    /// Identity snapshot at capture time.
    pub identity: Identity,
    /// Device metadata snapshot.
    pub device: DeviceInfo,
    /// Local IANA timezone identifier, e.g. `Europe/Berlin`.
    pub timezone: String,
    /// Capture instant.
    pub captured_at: DateTime<Utc>,
}

impl EventRecord {
    /// Assemble a record, stamping the current instant and local timezone.
    pub fn capture(
        classification: Classification,
        event_type: impl Into<String>,
        category: impl Into<String>,
        properties: BTreeMap<String, String>,
        identity: Identity,
        device: DeviceInfo,
    ) -> Self {
        Self {
            classification,
            event_type: event_type.into(),
            category: category.into(),
            properties,
            identity,
            device,
            timezone: local_timezone(),
            captured_at: Utc::now(),
        }
    }

    /// Flatten into the wire payload. Absent user/anonymous ids render as
    /// empty strings, matching the collection endpoint's schema.
    pub fn to_payload(&self) -> EventPayload {
        EventPayload {
            classification: self.classification,
            value: self.event_type.clone(),
            category: self.category.clone(),
            platform: self.device.platform.name().to_string(),
            os_version: self.device.os_version.clone(),
            device_model: self.device.device_model.clone(),
            device_manufacturer: self.device.device_manufacturer.clone(),
            app_version: self.device.app_version.clone(),
            screen_resolution: self.device.screen_resolution.clone(),
            user_id: self.identity.user_id.clone().unwrap_or_default(),
            anonymous_id: self.identity.anonymous_id.clone().unwrap_or_default(),
            session_id: self.identity.session_id.clone(),
            timezone: self.timezone.clone(),
            local_date_time: self
                .captured_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            properties: self.properties.clone(),
        }
    }
}

/// The flat JSON object posted to the collection endpoint.
///
/// Key names are fixed by the backend schema; this struct is the single
/// place they are spelled out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// `SYSTEM` or `CUSTOM`.
    #[serde(rename = "type")]
    pub classification: Classification,
    /// Event type string.
    pub value: String,
    /// Category wire name.
    pub category: String,
    /// Platform tag.
    pub platform: String,
    /// OS version.
    pub os_version: String,
    /// Device model.
    pub device_model: String,
    /// Device manufacturer.
    pub device_manufacturer: String,
    /// App version.
    pub app_version: String,
    /// Screen resolution.
    pub screen_resolution: String,
    /// User id, empty string when absent.
    pub user_id: String,
    /// Anonymous id, empty string when absent.
    pub anonymous_id: String,
    /// Session id.
    pub session_id: String,
    /// IANA timezone identifier.
    pub timezone: String,
    /// ISO-8601 capture instant.
    pub local_date_time: String,
    /// Flat string→string property map.
    pub properties: BTreeMap<String, String>,
}

/// Current local IANA timezone identifier, `Etc/UTC` if it cannot be
/// determined.
fn local_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "Etc/UTC".to_string())
}
