//! Collection endpoint configuration.

use serde::{Deserialize, Serialize};

/// Development collection endpoint.
const DEV_COLLECT_URL: &str = "https://client.dev.gamepulse.click/events/collect";

/// Production collection endpoint.
const PROD_COLLECT_URL: &str = "https://client.gamepulse.click/events/collect";

/// Deployment environment selecting the collection endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Events go to the development backend.
    Development,
    /// Events go to the production backend.
    Production,
}

impl Environment {
    /// The event collection URL for this environment.
    pub fn collect_url(self) -> &'static str {
        match self {
            Self::Development => DEV_COLLECT_URL,
            Self::Production => PROD_COLLECT_URL,
        }
    }
}
