//! Platform metadata seam.
//!
//! Device introspection lives with the host (windowing, OS APIs), not in
//! this SDK. The host hands the client a [`PlatformInfo`] implementation;
//! if it errors, initialization falls back to [`DeviceInfo::fallback`]
//! rather than failing.

use gamepulse_core::DeviceInfo;

/// Error type for platform introspection. Host implementations surface
/// whatever their platform APIs produce.
pub type PlatformError = Box<dyn std::error::Error + Send + Sync>;

/// Supplies device metadata at initialization time.
pub trait PlatformInfo: Send + Sync {
    /// Collect device metadata. May fail; the client falls back to
    /// defaults.
    fn fetch(&self) -> Result<DeviceInfo, PlatformError>;
}

/// Trivial provider wrapping a fixed, pre-collected [`DeviceInfo`].
#[derive(Clone, Debug)]
pub struct StaticPlatform {
    info: DeviceInfo,
}

impl StaticPlatform {
    /// Wrap an already-known device description.
    pub fn new(info: DeviceInfo) -> Self {
        Self { info }
    }
}

impl PlatformInfo for StaticPlatform {
    fn fetch(&self) -> Result<DeviceInfo, PlatformError> {
        Ok(self.info.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamepulse_core::Platform;

    #[test]
    fn static_platform_returns_its_info() {
        let info = DeviceInfo {
            platform: Platform::Ios,
            os_version: "17.4".to_string(),
            app_version: "2.1.0".to_string(),
            device_model: "iPhone15,3".to_string(),
            screen_resolution: "2796x1290".to_string(),
            device_manufacturer: "Apple".to_string(),
        };
        let fetched = StaticPlatform::new(info.clone()).fetch().unwrap();
        assert_eq!(fetched, info);
    }
}
