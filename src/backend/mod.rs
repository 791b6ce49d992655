//! Backend-as-a-service client: passwordless auth, table queries and
//! realtime change feeds.
//!
//! [`connect`] picks the live client when the project is configured (and the
//! `backend-http` feature is enabled) and the [`DisabledBackend`] otherwise,
//! so callers never branch on configuration themselves.

mod auth;
mod config;
mod disabled;
pub mod endpoints;
mod error;
mod realtime;
#[cfg(feature = "backend-http")]
mod realtime_socket;
#[cfg(feature = "backend-http")]
mod supabase;
mod table;

use tracing::{info, warn};

use crate::settings::SettingsStore;

pub use auth::{
    AuthChangeEvent, AuthListener, AuthListeners, AuthSubscription, OtpSignIn, OtpType, Session,
    User, VerifyOtp, session_from_redirect_url,
};
pub use config::{ANON_KEY_ENV_KEYS, AuthOptions, BackendConfig, URL_ENV_KEYS};
pub use disabled::DisabledBackend;
pub use error::{BackendError, BackendResult, NOT_CONFIGURED_MESSAGE};
pub use realtime::{
    ChangeEvent, ChangeKind, ChannelBuilder, ChannelSpec, ChannelSubscription,
    HEARTBEAT_INTERVAL_SECS, InertChannel, PostgresChangeBinding, decode_change_message,
    encode_heartbeat, encode_join_message, encode_leave_message,
};
#[cfg(feature = "backend-http")]
pub use realtime_socket::RealtimeSocket;
#[cfg(feature = "backend-http")]
pub use supabase::SupabaseClient;
pub use table::{Filter, FilterOp, SelectQuery, TableRef, TableRequest, UpsertQuery};

/// Operations the application needs from its backend.
pub trait BackendClient {
    fn is_configured(&self) -> bool;

    /// Current session, refreshed first when it is about to expire.
    fn get_session(&self) -> BackendResult<Option<Session>>;

    /// Registers `listener` for auth changes until the returned handle drops.
    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription;

    fn sign_in_with_otp(&self, request: &OtpSignIn) -> BackendResult<()>;

    fn verify_otp(&self, request: &VerifyOtp) -> BackendResult<Session>;

    fn sign_out(&self) -> BackendResult<()>;

    /// Runs a table request and returns the rows the server sent back.
    fn execute(&self, request: &TableRequest) -> BackendResult<Vec<serde_json::Value>>;

    fn subscribe(&self, spec: ChannelSpec) -> BackendResult<Box<dyn ChannelSubscription>>;

    fn remove_channel(&self, channel: Box<dyn ChannelSubscription>) -> BackendResult<()>;
}

impl dyn BackendClient + '_ {
    pub fn from(&self, table: &str) -> TableRef<'_> {
        TableRef::new(self, table)
    }

    pub fn channel(&self, topic: &str) -> ChannelBuilder<'_> {
        ChannelBuilder::new(self, topic)
    }
}

/// Builds the client for `config`, falling back to [`DisabledBackend`].
///
/// `session_store` holds the persisted session when session persistence is on.
pub fn connect(
    config: &BackendConfig,
    session_store: Option<Box<dyn SettingsStore>>,
) -> Box<dyn BackendClient> {
    if !config.is_configured() {
        info!("backend not configured, running without cloud sync");
        return Box::new(DisabledBackend::new());
    }
    live_client(config, session_store)
}

#[cfg(feature = "backend-http")]
fn live_client(
    config: &BackendConfig,
    session_store: Option<Box<dyn SettingsStore>>,
) -> Box<dyn BackendClient> {
    match SupabaseClient::new(config.clone()) {
        Ok(client) => match session_store {
            Some(store) => Box::new(client.with_session_store(store)),
            None => Box::new(client),
        },
        Err(err) => {
            warn!(error = %err, "backend client construction failed, using disabled backend");
            Box::new(DisabledBackend::new())
        }
    }
}

#[cfg(not(feature = "backend-http"))]
fn live_client(
    _config: &BackendConfig,
    _session_store: Option<Box<dyn SettingsStore>>,
) -> Box<dyn BackendClient> {
    warn!("backend configured but built without `backend-http`, using disabled backend");
    Box::new(DisabledBackend::new())
}
