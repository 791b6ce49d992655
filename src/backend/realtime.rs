//! Realtime change-feed channels.
//!
//! Messages follow the Phoenix channel JSON framing used by the realtime
//! service: `{topic, event, payload, ref}`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{BackendClient, BackendError, BackendResult};

/// Seconds between heartbeats on an open socket.
pub const HEARTBEAT_INTERVAL_SECS: u64 = 25;

const PHOENIX_TOPIC: &str = "phoenix";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    #[serde(rename = "*")]
    All,
    #[serde(rename = "INSERT")]
    Insert,
    #[serde(rename = "UPDATE")]
    Update,
    #[serde(rename = "DELETE")]
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresChangeBinding {
    pub event: ChangeKind,
    pub schema: String,
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl PostgresChangeBinding {
    /// Binding on a table of the `public` schema.
    #[must_use]
    pub fn new(event: ChangeKind, table: impl Into<String>) -> Self {
        Self {
            event,
            schema: "public".to_owned(),
            table: table.into(),
            filter: None,
        }
    }

    /// Server-side row filter such as `user_id=eq.42`.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub topic: String,
    pub bindings: Vec<PostgresChangeBinding>,
}

impl ChannelSpec {
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            bindings: Vec::new(),
        }
    }

    #[must_use]
    pub fn on(mut self, binding: PostgresChangeBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    #[must_use]
    pub fn wire_topic(&self) -> String {
        format!("realtime:{}", self.topic)
    }
}

/// One row change delivered on a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub schema: String,
    pub table: String,
    pub record: Option<Value>,
    pub old_record: Option<Value>,
    pub commit_timestamp: Option<String>,
}

/// Open channel subscription.
pub trait ChannelSubscription {
    fn topic(&self) -> &str;

    /// Next change event, or `None` when the last message carried no change
    /// or nothing arrived before the read timeout.
    fn poll(&mut self) -> BackendResult<Option<ChangeEvent>>;

    /// Leaves the channel and closes the connection.
    fn close(self: Box<Self>) -> BackendResult<()>;
}

/// Subscription that never delivers anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InertChannel {
    topic: String,
}

impl InertChannel {
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

impl ChannelSubscription for InertChannel {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn poll(&mut self) -> BackendResult<Option<ChangeEvent>> {
        Ok(None)
    }

    fn close(self: Box<Self>) -> BackendResult<()> {
        Ok(())
    }
}

/// Builder returned by `channel(topic)`.
pub struct ChannelBuilder<'a> {
    client: &'a dyn BackendClient,
    spec: ChannelSpec,
}

impl<'a> ChannelBuilder<'a> {
    pub(super) fn new(client: &'a dyn BackendClient, topic: impl Into<String>) -> Self {
        Self {
            client,
            spec: ChannelSpec::new(topic),
        }
    }

    #[must_use]
    pub fn on(mut self, binding: PostgresChangeBinding) -> Self {
        self.spec.bindings.push(binding);
        self
    }

    #[must_use]
    pub fn spec(&self) -> &ChannelSpec {
        &self.spec
    }

    pub fn subscribe(self) -> BackendResult<Box<dyn ChannelSubscription>> {
        self.client.subscribe(self.spec)
    }
}

#[must_use]
pub fn encode_join_message(spec: &ChannelSpec, access_token: Option<&str>, message_ref: u64) -> Value {
    let mut payload = json!({
        "config": {
            "broadcast": { "self": false },
            "presence": { "key": "" },
            "postgres_changes": spec.bindings,
        }
    });
    if let Some(token) = access_token {
        payload["access_token"] = Value::String(token.to_owned());
    }
    json!({
        "topic": spec.wire_topic(),
        "event": "phx_join",
        "payload": payload,
        "ref": message_ref.to_string(),
        "join_ref": message_ref.to_string(),
    })
}

#[must_use]
pub fn encode_leave_message(spec: &ChannelSpec, message_ref: u64) -> Value {
    json!({
        "topic": spec.wire_topic(),
        "event": "phx_leave",
        "payload": {},
        "ref": message_ref.to_string(),
    })
}

#[must_use]
pub fn encode_heartbeat(message_ref: u64) -> Value {
    json!({
        "topic": PHOENIX_TOPIC,
        "event": "heartbeat",
        "payload": {},
        "ref": message_ref.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    payload: Value,
}

/// Decodes one inbound socket message.
///
/// Row changes yield an event; replies, presence and heartbeats yield `None`;
/// an error reply or a channel error yields `Err`.
pub fn decode_change_message(text: &str) -> BackendResult<Option<ChangeEvent>> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| BackendError::Decode(format!("invalid realtime message: {e}")))?;

    match envelope.event.as_str() {
        "postgres_changes" => decode_change_payload(&envelope.payload).map(Some),
        "phx_reply" => {
            if envelope.payload.get("status").and_then(Value::as_str) == Some("error") {
                let reason = envelope
                    .payload
                    .pointer("/response/reason")
                    .and_then(Value::as_str)
                    .unwrap_or("join rejected");
                return Err(BackendError::Realtime(reason.to_owned()));
            }
            Ok(None)
        }
        "phx_error" => Err(BackendError::Realtime("channel error".to_owned())),
        _ => Ok(None),
    }
}

fn decode_change_payload(payload: &Value) -> BackendResult<ChangeEvent> {
    let data = payload.get("data").unwrap_or(payload);
    let kind_value = data
        .get("type")
        .or_else(|| data.get("eventType"))
        .cloned()
        .ok_or_else(|| BackendError::Decode("change without type".to_owned()))?;
    let kind: ChangeKind = serde_json::from_value(kind_value)
        .map_err(|e| BackendError::Decode(format!("unknown change type: {e}")))?;

    let text = |key: &str| data.get(key).and_then(Value::as_str).map(str::to_owned);
    let row = |key: &str| data.get(key).filter(|value| !value.is_null()).cloned();

    Ok(ChangeEvent {
        kind,
        schema: text("schema").unwrap_or_default(),
        table: text("table").unwrap_or_default(),
        record: row("record"),
        old_record: row("old_record"),
        commit_timestamp: text("commit_timestamp"),
    })
}
