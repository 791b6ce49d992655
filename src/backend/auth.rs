use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use super::{BackendError, BackendResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Signed-in session as issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds at issue time.
    #[serde(default)]
    pub expires_in: i64,
    /// Absolute expiry in epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Session {
    /// Fills `expires_at` from `expires_in` when the server omitted it.
    #[must_use]
    pub fn anchored_at(mut self, now_epoch_secs: i64) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(now_epoch_secs.saturating_add(self.expires_in));
        }
        self
    }

    /// True when the token is expired or expires within `margin_secs`.
    /// Sessions without a known expiry never expire.
    #[must_use]
    pub fn expires_within(&self, now_epoch_secs: i64, margin_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now_epoch_secs.saturating_add(margin_secs))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Passwordless sign-in by e-mailed one-time code or magic link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpSignIn {
    pub email: String,
    pub should_create_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_redirect_to: Option<String>,
}

impl OtpSignIn {
    #[must_use]
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            should_create_user: true,
            email_redirect_to: None,
        }
    }

    #[must_use]
    pub fn with_redirect_to(mut self, url: impl Into<String>) -> Self {
        self.email_redirect_to = Some(url.into());
        self
    }

    #[must_use]
    pub fn without_sign_up(mut self) -> Self {
        self.should_create_user = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpType {
    Email,
    Magiclink,
    Signup,
    Recovery,
    Invite,
    EmailChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtp {
    pub email: String,
    pub token: String,
    #[serde(rename = "type")]
    pub otp_type: OtpType,
}

impl VerifyOtp {
    #[must_use]
    pub fn email(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
            otp_type: OtpType::Email,
        }
    }
}

pub type AuthListener = Box<dyn FnMut(AuthChangeEvent, Option<&Session>)>;

/// Auth-state listeners of one client.
///
/// Listeners may subscribe or unsubscribe from inside a notification; such
/// changes take effect after the current notification round.
#[derive(Default)]
pub struct AuthListeners {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, AuthListener)>>,
    removed_in_flight: RefCell<HashSet<u64>>,
}

impl AuthListeners {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn subscribe(self: &Rc<Self>, listener: AuthListener) -> AuthSubscription {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.listeners.borrow_mut().push((id, listener));
        AuthSubscription {
            id,
            registry: Rc::downgrade(self),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn notify(&self, event: AuthChangeEvent, session: Option<&Session>) {
        let mut current = std::mem::take(&mut *self.listeners.borrow_mut());
        for (_, listener) in &mut current {
            listener(event, session);
        }

        let removed = std::mem::take(&mut *self.removed_in_flight.borrow_mut());
        current.retain(|(id, _)| !removed.contains(id));
        let mut slot = self.listeners.borrow_mut();
        let added = std::mem::take(&mut *slot);
        current.extend(added);
        *slot = current;
    }

    fn unsubscribe(&self, id: u64) {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        if listeners.len() == before {
            // Not found: the listener is being notified right now.
            self.removed_in_flight.borrow_mut().insert(id);
        }
    }
}

/// Handle returned by `on_auth_state_change`; dropping it unsubscribes.
#[must_use = "dropping the subscription stops auth notifications"]
#[derive(Debug)]
pub struct AuthSubscription {
    id: u64,
    registry: Weak<AuthListeners>,
}

impl AuthSubscription {
    /// Subscription that is not attached to any listener list.
    pub fn detached() -> Self {
        Self {
            id: 0,
            registry: Weak::new(),
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.registry.strong_count() > 0 && self.id != 0
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unsubscribe(self.id);
        }
    }
}

/// Extracts a session from the fragment of a sign-in redirect URL
/// (`...#access_token=...&refresh_token=...&expires_in=3600`).
///
/// Returns `Ok(None)` when the URL carries no session and an error when the
/// redirect reports one.
pub fn session_from_redirect_url(url: &str, now_epoch_secs: i64) -> BackendResult<Option<Session>> {
    let Some((_, fragment)) = url.split_once('#') else {
        return Ok(None);
    };

    let mut access_token = None;
    let mut refresh_token = None;
    let mut token_type = None;
    let mut expires_in = 0_i64;
    let mut expires_at = None;
    let mut error_description = None;

    for pair in fragment.split('&').filter(|pair| !pair.is_empty()) {
        let (key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(&raw_value.replace('+', " "))
            .map_err(|e| BackendError::Decode(format!("invalid redirect fragment: {e}")))?
            .into_owned();
        match key {
            "access_token" => access_token = Some(value),
            "refresh_token" => refresh_token = Some(value),
            "token_type" => token_type = Some(value),
            "expires_in" => expires_in = value.parse().unwrap_or(0),
            "expires_at" => expires_at = value.parse().ok(),
            "error_description" => error_description = Some(value),
            _ => {}
        }
    }

    if let Some(message) = error_description {
        return Err(BackendError::Api {
            status: 400,
            message,
        });
    }

    let (Some(access_token), Some(refresh_token)) = (access_token, refresh_token) else {
        return Ok(None);
    };

    Ok(Some(
        Session {
            access_token,
            refresh_token,
            token_type: token_type.unwrap_or_else(default_token_type),
            expires_in,
            expires_at,
            user: None,
        }
        .anchored_at(now_epoch_secs),
    ))
}
