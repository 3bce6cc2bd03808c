//! Device metadata attached to every event.
//!
//! Collected once at initialization by the host's platform provider and
//! never changed afterwards. When platform introspection fails, the client
//! falls back to [`DeviceInfo::fallback`].

use serde::{Deserialize, Serialize};

/// Target platform tag, constant per SDK build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    /// Android devices.
    Android,
    /// iOS / iPadOS devices.
    Ios,
    /// Desktop PC builds.
    Pc,
    /// PlayStation consoles.
    Ps,
    /// Xbox consoles.
    Xbox,
    /// Browser builds.
    Web,
    /// Unity runtime (platform not further resolved).
    Unity,
}

impl Platform {
    /// Wire name of the platform.
    pub fn name(self) -> &'static str {
        match self {
            Self::Android => "ANDROID",
            Self::Ios => "IOS",
            Self::Pc => "PC",
            Self::Ps => "PS",
            Self::Xbox => "XBOX",
            Self::Web => "WEB",
            Self::Unity => "UNITY",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable device metadata, set once at initialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// Target platform.
    pub platform: Platform,
    /// Operating system version string.
    pub os_version: String,
    /// Host application version.
    pub app_version: String,
    /// Device model name.
    pub device_model: String,
    /// Screen resolution, e.g. `1920x1080`.
    pub screen_resolution: String,
    /// Device manufacturer.
    pub device_manufacturer: String,
}

impl DeviceInfo {
    /// Defaults used when platform introspection fails: the platform tag is
    /// kept, every other field is `"unknown"` except a `"1.0.0"` app version.
    pub fn fallback(platform: Platform) -> Self {
        Self {
            platform,
            os_version: "unknown".to_string(),
            app_version: "1.0.0".to_string(),
            device_model: "unknown".to_string(),
            screen_resolution: "unknown".to_string(),
            device_manufacturer: "unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_wire_names_are_uppercase() {
        assert_eq!(Platform::Android.name(), "ANDROID");
        assert_eq!(Platform::Ios.name(), "IOS");
        assert_eq!(Platform::Web.name(), "WEB");
        let json = serde_json::to_string(&Platform::Unity).unwrap();
        assert_eq!(json, "\"UNITY\"");
    }

    #[test]
    fn fallback_keeps_platform_and_defaults_strings() {
        let info = DeviceInfo::fallback(Platform::Pc);
        assert_eq!(info.platform, Platform::Pc);
        assert_eq!(info.os_version, "unknown");
        assert_eq!(info.app_version, "1.0.0");
        assert_eq!(info.device_model, "unknown");
        assert_eq!(info.screen_resolution, "unknown");
        assert_eq!(info.device_manufacturer, "unknown");
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let info = DeviceInfo::fallback(Platform::Android);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["platform"], "ANDROID");
        assert_eq!(json["osVersion"], "unknown");
        assert_eq!(json["appVersion"], "1.0.0");
        assert!(json.get("os_version").is_none());
    }
}
