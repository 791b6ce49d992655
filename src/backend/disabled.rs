use tracing::debug;

use super::{
    AuthListener, AuthSubscription, BackendClient, BackendError, BackendResult, ChannelSpec,
    ChannelSubscription, InertChannel, OtpSignIn, Session, TableRequest, VerifyOtp,
};

/// Stand-in used when no backend is configured.
///
/// Reads report "no session", sign-out and channel teardown succeed,
/// subscriptions are inert, and everything else fails with
/// [`BackendError::NotConfigured`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisabledBackend;

impl DisabledBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BackendClient for DisabledBackend {
    fn is_configured(&self) -> bool {
        false
    }

    fn get_session(&self) -> BackendResult<Option<Session>> {
        Ok(None)
    }

    fn on_auth_state_change(&self, _listener: AuthListener) -> AuthSubscription {
        AuthSubscription::detached()
    }

    fn sign_in_with_otp(&self, _request: &OtpSignIn) -> BackendResult<()> {
        Err(BackendError::NotConfigured)
    }

    fn verify_otp(&self, _request: &VerifyOtp) -> BackendResult<Session> {
        Err(BackendError::NotConfigured)
    }

    fn sign_out(&self) -> BackendResult<()> {
        Ok(())
    }

    fn execute(&self, request: &TableRequest) -> BackendResult<Vec<serde_json::Value>> {
        debug!(table = request.table(), "table request without backend");
        Err(BackendError::NotConfigured)
    }

    fn subscribe(&self, spec: ChannelSpec) -> BackendResult<Box<dyn ChannelSubscription>> {
        Ok(Box::new(InertChannel::new(spec.topic)))
    }

    fn remove_channel(&self, channel: Box<dyn ChannelSubscription>) -> BackendResult<()> {
        channel.close()
    }
}
