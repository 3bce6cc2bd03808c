//! The SDK client: typed event entry points, session and identity
//! operations, initialization builder.
//!
//! A [`Client`] is constructed once through [`Client::init`]. The identity
//! it holds is replaced wholesale on session transitions — each swap is an
//! atomic `Arc` exchange behind an `RwLock`, so event builders running
//! concurrently snapshot either the old or the new identity, never a
//! partially-updated one.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use gamepulse_core::taxonomy::types::user;
use gamepulse_core::{
    Classification, DeviceInfo, Error, EventCategory, Identity, Platform, Result,
};
use gamepulse_transport::{Dispatcher, Environment, HttpTransport, Transport};

use crate::builder::EventBuilder;
use crate::platform::{PlatformInfo, StaticPlatform};

/// Shared, swappable identity reference.
///
/// Readers clone the inner `Arc` (a snapshot); writers replace it
/// wholesale. Individual [`Identity`] values are immutable.
#[derive(Clone, Debug)]
pub(crate) struct SharedIdentity(Arc<RwLock<Arc<Identity>>>);

impl SharedIdentity {
    fn new(identity: Identity) -> Self {
        Self(Arc::new(RwLock::new(Arc::new(identity))))
    }

    /// Snapshot the current identity.
    pub(crate) fn snapshot(&self) -> Arc<Identity> {
        Arc::clone(&self.0.read().unwrap_or_else(std::sync::PoisonError::into_inner))
    }

    /// Replace the identity wholesale.
    fn swap(&self, identity: Identity) {
        let mut guard = self
            .0
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Arc::new(identity);
    }
}

/// GamePulse analytics client.
///
/// Obtain one via [`Client::init`]; see the crate docs for the process-wide
/// handle. All methods are `&self` and safe to call from concurrent tasks.
pub struct Client {
    environment: Environment,
    device_info: DeviceInfo,
    dispatcher: Dispatcher,
    identity: SharedIdentity,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("environment", &self.environment)
            .field("device_info", &self.device_info)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Start initializing the SDK.
    ///
    /// The API key is checked when the builder's `create`/`build` runs.
    pub fn init(api_key: impl Into<String>, environment: Environment) -> InitBuilder {
        InitBuilder {
            api_key: api_key.into(),
            environment,
            identity: None,
            platform: Platform::Pc,
            platform_info: None,
            transport: None,
            collect_url: None,
        }
    }

    // ── Typed event entry points ─────────────────────────────────────────

    /// Builder for a `user` category event.
    pub fn user_event(&self, event_type: &str) -> Result<EventBuilder> {
        self.system_event(EventCategory::User, event_type)
    }

    /// Builder for a `gameplay` category event.
    pub fn gameplay_event(&self, event_type: &str) -> Result<EventBuilder> {
        self.system_event(EventCategory::Gameplay, event_type)
    }

    /// Builder for an `economy` category event.
    pub fn economy_event(&self, event_type: &str) -> Result<EventBuilder> {
        self.system_event(EventCategory::Economy, event_type)
    }

    /// Builder for a `progression` category event.
    pub fn progression_event(&self, event_type: &str) -> Result<EventBuilder> {
        self.system_event(EventCategory::Progression, event_type)
    }

    /// Builder for an `ad` category event.
    pub fn ad_event(&self, event_type: &str) -> Result<EventBuilder> {
        self.system_event(EventCategory::Ad, event_type)
    }

    /// Builder for an `iap` category event.
    pub fn iap_event(&self, event_type: &str) -> Result<EventBuilder> {
        self.system_event(EventCategory::Iap, event_type)
    }

    /// Builder for a free-form event. No taxonomy check; the record is
    /// classified `CUSTOM`.
    pub fn custom_event(
        &self,
        event_type: impl Into<String>,
        category: impl Into<String>,
    ) -> EventBuilder {
        EventBuilder::bound(self, Classification::Custom, category.into(), event_type.into())
    }

    /// Validate `event_type` against `category` and hand out a bound
    /// builder.
    fn system_event(&self, category: EventCategory, event_type: &str) -> Result<EventBuilder> {
        if !category.is_valid(event_type) {
            return Err(Error::InvalidArgument(format!(
                "invalid {category} event type: {event_type}"
            )));
        }
        Ok(EventBuilder::bound(
            self,
            Classification::System,
            category.name().to_string(),
            event_type.to_string(),
        ))
    }

    /// Builder for a predefined event whose type is known-valid (our own
    /// constants). Skips the membership check.
    fn lifecycle_event(&self, category: EventCategory, event_type: &'static str) -> EventBuilder {
        EventBuilder::bound(
            self,
            Classification::System,
            category.name().to_string(),
            event_type.to_string(),
        )
    }

    // ── Session and identity operations ──────────────────────────────────

    /// Rotate to a fresh session id (same user/anonymous ids) and emit one
    /// `user/session_start` event with empty properties.
    pub fn start_session(&self) {
        let next = self.identity.snapshot().with_new_session();
        debug!(session_id = %next.session_id, "session started");
        self.identity.swap(next);
        self.lifecycle_event(EventCategory::User, user::SESSION_START)
            .track();
    }

    /// Emit one `user/session_end` event for the current session. No-op if
    /// there is no session id to report.
    pub fn end_session(&self) {
        if self.identity.snapshot().session_id.is_empty() {
            return;
        }
        self.lifecycle_event(EventCategory::User, user::SESSION_END)
            .track();
    }

    /// Bind the identity to an authenticated user (fresh session id,
    /// anonymous id cleared) and emit one `user/user_login` event.
    pub fn login(&self, user_id: impl Into<String>) {
        let next = self.identity.snapshot().with_login(user_id);
        debug!(session_id = %next.session_id, "user logged in");
        self.identity.swap(next);
        self.lifecycle_event(EventCategory::User, user::USER_LOGIN)
            .track();
    }

    /// Drop the authenticated user (fresh session id, generated anonymous
    /// id) and emit one `user/user_logout` event.
    pub fn logout(&self) {
        let next = self.identity.snapshot().with_logout();
        debug!(session_id = %next.session_id, "user logged out");
        self.identity.swap(next);
        self.lifecycle_event(EventCategory::User, user::USER_LOGOUT)
            .track();
    }

    /// Replace the identity wholesale with a caller-built value.
    ///
    /// No re-validation: [`Identity`] construction already enforced the
    /// mandatory-field invariants.
    pub fn update_identity(&self, identity: Identity) {
        self.identity.swap(identity);
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Snapshot of the current identity.
    pub fn identity(&self) -> Arc<Identity> {
        self.identity.snapshot()
    }

    /// Device metadata captured at initialization.
    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    /// The environment this client reports to.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub(crate) fn identity_handle(&self) -> SharedIdentity {
        self.identity.clone()
    }

    pub(crate) fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Staged initialization of a [`Client`].
///
/// `build()` constructs a standalone client (dependency-injection path);
/// `create()` additionally registers it as the process-wide instance,
/// first caller wins.
pub struct InitBuilder {
    api_key: String,
    environment: Environment,
    identity: Option<Identity>,
    platform: Platform,
    platform_info: Option<Box<dyn PlatformInfo>>,
    transport: Option<Arc<dyn Transport>>,
    collect_url: Option<String>,
}

impl std::fmt::Debug for InitBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitBuilder")
            .field("environment", &self.environment)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl InitBuilder {
    /// Initial identity (session/user/anonymous ids). Required.
    #[must_use]
    pub fn identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Platform tag used when no device metadata can be collected.
    /// Defaults to [`Platform::Pc`].
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Host-provided device introspection. Errors fall back to
    /// [`DeviceInfo::fallback`].
    #[must_use]
    pub fn platform_info(mut self, provider: impl PlatformInfo + 'static) -> Self {
        self.platform_info = Some(Box::new(provider));
        self
    }

    /// Pre-collected device metadata, shorthand for a [`StaticPlatform`]
    /// provider.
    #[must_use]
    pub fn device_info(mut self, info: DeviceInfo) -> Self {
        self.platform = info.platform;
        self.platform_info = Some(Box::new(StaticPlatform::new(info)));
        self
    }

    /// Replace the HTTP transport (tests, self-hosted relays).
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Override the environment's collection URL (tests, self-hosted
    /// backends).
    #[must_use]
    pub fn collect_url(mut self, url: impl Into<String>) -> Self {
        self.collect_url = Some(url.into());
        self
    }

    /// Construct a standalone client without touching the process-wide
    /// handle.
    pub fn build(self) -> Result<Arc<Client>> {
        if self.api_key.is_empty() {
            return Err(Error::InvalidArgument("API key is required".to_string()));
        }
        let Some(identity) = self.identity else {
            return Err(Error::InvalidArgument(
                "identity config is required".to_string(),
            ));
        };

        let device_info = match self.platform_info {
            Some(provider) => provider.fetch().unwrap_or_else(|e| {
                warn!(error = %e, "device introspection failed, using defaults");
                DeviceInfo::fallback(self.platform)
            }),
            None => DeviceInfo::fallback(self.platform),
        };

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::new()));
        let collect_url = self
            .collect_url
            .unwrap_or_else(|| self.environment.collect_url().to_string());
        let dispatcher = Dispatcher::new(transport, collect_url, self.api_key);

        Ok(Arc::new(Client {
            environment: self.environment,
            device_info,
            dispatcher,
            identity: SharedIdentity::new(identity),
        }))
    }

    /// Construct the client and register it as the process-wide instance.
    ///
    /// The check-and-create step runs under mutual exclusion: the first
    /// caller's configuration wins, concurrent and later callers get the
    /// already-registered instance back unchanged.
    pub fn create(self) -> Result<Arc<Client>> {
        crate::get_or_init(|| self.build())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use gamepulse_transport::TransportError;

    use super::*;

    pub(crate) struct RecordingTransport {
        pub sent: Mutex<Vec<serde_json::Value>>,
    }

    impl RecordingTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        // `super::*` brings the crate's one-parameter `Result` alias into
        // scope, so the trait's two-parameter form must be spelled out.
        async fn post_json(
            &self,
            _url: &str,
            _api_key: &str,
            body: serde_json::Value,
        ) -> std::result::Result<(), TransportError> {
            self.sent.lock().unwrap().push(body);
            Ok(())
        }
    }

    fn test_client(transport: Arc<RecordingTransport>) -> Arc<Client> {
        Client::init("k", Environment::Development)
            .identity(Identity::new("s1", Some("u1".to_string()), None).unwrap())
            .transport(transport)
            .build()
            .unwrap()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = Client::init("", Environment::Development)
            .identity(Identity::new("s1", Some("u1".to_string()), None).unwrap())
            .build()
            .unwrap_err();
        assert_matches!(err, Error::InvalidArgument(_));
    }

    #[test]
    fn missing_identity_is_rejected() {
        let err = Client::init("k", Environment::Development)
            .build()
            .unwrap_err();
        assert_matches!(err, Error::InvalidArgument(_));
    }

    #[test]
    fn unknown_typed_event_is_rejected() {
        let client = test_client(RecordingTransport::new());
        let err = client.gameplay_event("purchase").unwrap_err();
        assert_matches!(err, Error::InvalidArgument(_));
    }

    #[test]
    fn typed_event_accepts_valid_type() {
        let client = test_client(RecordingTransport::new());
        assert!(client.gameplay_event("level_start").is_ok());
        assert!(client.iap_event("purchase").is_ok());
        assert!(client.ad_event("ad_rewarded").is_ok());
        assert!(client.economy_event("shop_viewed").is_ok());
        assert!(client.progression_event("quest_completed").is_ok());
        assert!(client.user_event("user_register").is_ok());
    }

    #[test]
    fn failed_platform_info_falls_back_to_defaults() {
        struct Broken;
        impl PlatformInfo for Broken {
            fn fetch(&self) -> std::result::Result<DeviceInfo, crate::platform::PlatformError> {
                Err("window system unavailable".into())
            }
        }

        let client = Client::init("k", Environment::Development)
            .identity(Identity::new("s1", Some("u1".to_string()), None).unwrap())
            .platform(Platform::Android)
            .platform_info(Broken)
            .build()
            .unwrap();
        assert_eq!(*client.device_info(), DeviceInfo::fallback(Platform::Android));
    }

    #[test]
    fn device_info_setter_wins_over_fallback() {
        let info = DeviceInfo {
            platform: Platform::Ios,
            os_version: "17.4".to_string(),
            app_version: "2.0.1".to_string(),
            device_model: "iPhone15,3".to_string(),
            screen_resolution: "2796x1290".to_string(),
            device_manufacturer: "Apple".to_string(),
        };
        let client = Client::init("k", Environment::Development)
            .identity(Identity::new("s1", Some("u1".to_string()), None).unwrap())
            .device_info(info.clone())
            .build()
            .unwrap();
        assert_eq!(*client.device_info(), info);
    }

    #[tokio::test]
    async fn start_session_rotates_id_and_emits_session_start() {
        let transport = RecordingTransport::new();
        let client = test_client(transport.clone());
        let before = client.identity();

        client.start_session();
        settle().await;

        let after = client.identity();
        assert_ne!(after.session_id, before.session_id);
        assert_eq!(after.user_id, before.user_id);
        assert_eq!(after.anonymous_id, before.anonymous_id);

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["category"], "user");
        assert_eq!(sent[0]["value"], "session_start");
        assert_eq!(sent[0]["sessionId"], after.session_id.as_str());
        assert!(sent[0]["properties"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn end_session_emits_session_end_for_current_session() {
        let transport = RecordingTransport::new();
        let client = test_client(transport.clone());

        client.end_session();
        settle().await;

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["value"], "session_end");
        assert_eq!(sent[0]["sessionId"], "s1");
    }

    #[tokio::test]
    async fn login_swaps_identity_and_emits_user_login() {
        let transport = RecordingTransport::new();
        let client = Client::init("k", Environment::Development)
            .identity(Identity::new("s1", None, Some("anon-1".to_string())).unwrap())
            .transport(transport.clone())
            .build()
            .unwrap();

        client.login("u42");
        settle().await;

        let identity = client.identity();
        assert_eq!(identity.user_id.as_deref(), Some("u42"));
        assert!(identity.anonymous_id.is_none());
        assert_ne!(identity.session_id, "s1");

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["value"], "user_login");
        assert_eq!(sent[0]["userId"], "u42");
        assert_eq!(sent[0]["anonymousId"], "");
    }

    #[tokio::test]
    async fn logout_swaps_identity_and_emits_user_logout() {
        let transport = RecordingTransport::new();
        let client = test_client(transport.clone());

        client.logout();
        settle().await;

        let identity = client.identity();
        assert!(identity.user_id.is_none());
        assert!(
            identity
                .anonymous_id
                .as_deref()
                .unwrap()
                .starts_with("anonymous_")
        );

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["value"], "user_logout");
        assert_eq!(sent[0]["userId"], "");
    }

    #[test]
    fn update_identity_replaces_wholesale() {
        let client = test_client(RecordingTransport::new());
        let next = Identity::new("s2", None, Some("anon-9".to_string())).unwrap();
        client.update_identity(next.clone());
        assert_eq!(*client.identity(), next);
    }

    #[tokio::test]
    async fn custom_event_bypasses_taxonomy() {
        let transport = RecordingTransport::new();
        let client = test_client(transport.clone());

        let mut props = BTreeMap::new();
        let _ = props.insert("guild".to_string(), "red".to_string());
        client
            .custom_event("raid_joined", "social")
            .properties(props)
            .track();
        settle().await;

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["type"], "CUSTOM");
        assert_eq!(sent[0]["category"], "social");
        assert_eq!(sent[0]["value"], "raid_joined");
        assert_eq!(sent[0]["properties"]["guild"], "red");
    }

    #[test]
    fn concurrent_readers_see_full_identity_snapshots() {
        let client = test_client(RecordingTransport::new());
        let pre = Identity::new("s1", Some("u1".to_string()), None).unwrap();
        let post = Identity::new("s2", None, Some("anon-2".to_string())).unwrap();

        std::thread::scope(|scope| {
            let reader_client = Arc::clone(&client);
            let reader_pre = pre.clone();
            let reader_post = post.clone();
            let reader = scope.spawn(move || {
                for _ in 0..1000 {
                    let snapshot = reader_client.identity();
                    assert!(
                        *snapshot == reader_pre || *snapshot == reader_post,
                        "observed a mixed identity: {snapshot:?}"
                    );
                }
            });
            for _ in 0..1000 {
                client.update_identity(post.clone());
                client.update_identity(pre.clone());
            }
            client.update_identity(post.clone());
            reader.join().unwrap();
        });
    }
}
