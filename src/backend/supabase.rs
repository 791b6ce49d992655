use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::endpoints::{api_error, auth_url, rest_url, rows_from_body, session_storage_key};
use super::{
    AuthChangeEvent, AuthListener, AuthListeners, AuthSubscription, BackendClient, BackendConfig,
    BackendError, BackendResult, ChannelSpec, ChannelSubscription, OtpSignIn, RealtimeSocket,
    Session, TableRequest, VerifyOtp, session_from_redirect_url,
};
use crate::settings::SettingsStore;

/// Tokens expiring within this many seconds are refreshed before use.
const REFRESH_MARGIN_SECS: i64 = 60;

fn now_epoch_secs() -> i64 {
    Utc::now().timestamp()
}

/// Blocking client for a Supabase project (GoTrue auth, PostgREST tables,
/// realtime channels).
pub struct SupabaseClient {
    config: BackendConfig,
    http: Client,
    storage_key: String,
    session: RefCell<Option<Session>>,
    store: RefCell<Option<Box<dyn SettingsStore>>>,
    listeners: Rc<AuthListeners>,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        if !config.is_configured() {
            return Err(BackendError::NotConfigured);
        }
        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| BackendError::Http(e.to_string()))?;
        let storage_key = session_storage_key(config.base_url());
        debug!(url = config.base_url(), storage_key = %storage_key, "backend client created");
        Ok(Self {
            config,
            http,
            storage_key,
            session: RefCell::new(None),
            store: RefCell::new(None),
            listeners: AuthListeners::new(),
        })
    }

    /// Attaches the store used to persist the session and restores any
    /// session saved there.
    #[must_use]
    pub fn with_session_store(self, store: Box<dyn SettingsStore>) -> Self {
        if self.config.auth.persist_session {
            match store.get(&self.storage_key) {
                Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                    Ok(session) => {
                        debug!(storage_key = %self.storage_key, "session restored");
                        *self.session.borrow_mut() = Some(session);
                    }
                    Err(err) => warn!(error = %err, "ignoring unreadable persisted session"),
                },
                Ok(None) => {}
                Err(err) => warn!(error = %err, "failed to read persisted session"),
            }
        }
        *self.store.borrow_mut() = Some(store);
        self
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Installs the session carried by a sign-in redirect URL, if any.
    pub fn detect_session_in_url(&self, url: &str) -> BackendResult<Option<Session>> {
        if !self.config.auth.detect_session_in_url {
            return Ok(None);
        }
        let Some(session) = session_from_redirect_url(url, now_epoch_secs())? else {
            return Ok(None);
        };
        self.install_session(session.clone(), AuthChangeEvent::SignedIn)?;
        Ok(Some(session))
    }

    fn request(&self, method: Method, url: &str, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    fn send(request: RequestBuilder) -> BackendResult<Option<Value>> {
        let response = request
            .send()
            .map_err(|e| BackendError::Http(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| BackendError::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn bearer(&self) -> String {
        self.session
            .borrow()
            .as_ref()
            .map_or_else(|| self.config.anon_key.clone(), |s| s.access_token.clone())
    }

    fn decode_session(body: Option<Value>) -> BackendResult<Session> {
        let body = body.ok_or_else(|| BackendError::Decode("empty session response".to_owned()))?;
        let session: Session =
            serde_json::from_value(body).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(session.anchored_at(now_epoch_secs()))
    }

    fn persist(&self, session: Option<&Session>) -> BackendResult<()> {
        if !self.config.auth.persist_session {
            return Ok(());
        }
        let mut store = self.store.borrow_mut();
        let Some(store) = store.as_mut() else {
            return Ok(());
        };
        match session {
            Some(session) => {
                let raw = serde_json::to_string(session)
                    .map_err(|e| BackendError::Encode(e.to_string()))?;
                store.set(&self.storage_key, &raw)?;
            }
            None => store.remove(&self.storage_key)?,
        }
        Ok(())
    }

    fn install_session(&self, session: Session, event: AuthChangeEvent) -> BackendResult<()> {
        *self.session.borrow_mut() = Some(session.clone());
        self.persist(Some(&session))?;
        debug!(?event, "auth state changed");
        self.listeners.notify(event, Some(&session));
        Ok(())
    }

    fn clear_session(&self) -> BackendResult<()> {
        let had_session = self.session.borrow_mut().take().is_some();
        self.persist(None)?;
        if had_session {
            debug!(event = ?AuthChangeEvent::SignedOut, "auth state changed");
            self.listeners.notify(AuthChangeEvent::SignedOut, None);
        }
        Ok(())
    }

    fn refresh_session(&self, refresh_token: &str) -> BackendResult<Session> {
        let url = auth_url(self.config.base_url(), "token");
        let request = self
            .request(Method::POST, &url, &self.config.anon_key)
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));
        let session = Self::decode_session(Self::send(request)?)?;
        self.install_session(session.clone(), AuthChangeEvent::TokenRefreshed)?;
        Ok(session)
    }
}

impl BackendClient for SupabaseClient {
    fn is_configured(&self) -> bool {
        true
    }

    fn get_session(&self) -> BackendResult<Option<Session>> {
        let current = self.session.borrow().clone();
        let Some(session) = current else {
            return Ok(None);
        };
        if !self.config.auth.auto_refresh_token
            || !session.expires_within(now_epoch_secs(), REFRESH_MARGIN_SECS)
        {
            return Ok(Some(session));
        }
        match self.refresh_session(&session.refresh_token) {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(err) => {
                warn!(error = %err, "session refresh failed, signing out locally");
                self.clear_session()?;
                Err(err)
            }
        }
    }

    fn on_auth_state_change(&self, mut listener: AuthListener) -> AuthSubscription {
        let current = self.session.borrow().clone();
        listener(AuthChangeEvent::InitialSession, current.as_ref());
        self.listeners.subscribe(listener)
    }

    fn sign_in_with_otp(&self, request: &OtpSignIn) -> BackendResult<()> {
        let url = auth_url(self.config.base_url(), "otp");
        let mut builder = self.request(Method::POST, &url, &self.config.anon_key);
        if let Some(redirect_to) = &request.email_redirect_to {
            builder = builder.query(&[("redirect_to", redirect_to.as_str())]);
        }
        let builder = builder.json(&json!({
            "email": request.email,
            "create_user": request.should_create_user,
        }));
        Self::send(builder)?;
        debug!(email = %request.email, "one-time code requested");
        Ok(())
    }

    fn verify_otp(&self, request: &VerifyOtp) -> BackendResult<Session> {
        let url = auth_url(self.config.base_url(), "verify");
        let body = serde_json::to_value(request).map_err(|e| BackendError::Encode(e.to_string()))?;
        let builder = self
            .request(Method::POST, &url, &self.config.anon_key)
            .json(&body);
        let session = Self::decode_session(Self::send(builder)?)?;
        self.install_session(session.clone(), AuthChangeEvent::SignedIn)?;
        Ok(session)
    }

    fn sign_out(&self) -> BackendResult<()> {
        let access_token = self
            .session
            .borrow()
            .as_ref()
            .map(|session| session.access_token.clone());
        let remote = match access_token {
            Some(token) => {
                let url = auth_url(self.config.base_url(), "logout");
                match Self::send(self.request(Method::POST, &url, &token)) {
                    // Expired or already revoked sessions still sign out locally.
                    Err(BackendError::Api {
                        status: 401 | 403 | 404,
                        ..
                    }) => Ok(()),
                    other => other.map(|_| ()),
                }
            }
            None => Ok(()),
        };
        self.clear_session()?;
        remote
    }

    fn execute(&self, request: &TableRequest) -> BackendResult<Vec<Value>> {
        let url = rest_url(self.config.base_url(), request.table());
        let method = match request {
            TableRequest::Select { .. } => Method::GET,
            TableRequest::Insert { .. } | TableRequest::Upsert { .. } => Method::POST,
        };
        let mut builder = self
            .request(method, &url, &self.bearer())
            .query(&request.query_pairs());
        if let Some(prefer) = request.prefer_header() {
            builder = builder.header("Prefer", prefer);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        debug!(table = request.table(), "table request");
        Ok(rows_from_body(Self::send(builder)?))
    }

    fn subscribe(&self, spec: ChannelSpec) -> BackendResult<Box<dyn ChannelSubscription>> {
        let access_token = self
            .session
            .borrow()
            .as_ref()
            .map(|session| session.access_token.clone());
        let socket = RealtimeSocket::connect(
            self.config.base_url(),
            &self.config.anon_key,
            access_token.as_deref(),
            spec,
        )?;
        Ok(Box::new(socket))
    }

    fn remove_channel(&self, channel: Box<dyn ChannelSubscription>) -> BackendResult<()> {
        channel.close()
    }
}
