use std::io::ErrorKind;
use std::net::TcpStream;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::endpoints::realtime_url;
use super::{
    BackendError, BackendResult, ChangeEvent, ChannelSpec, ChannelSubscription,
    HEARTBEAT_INTERVAL_SECS, decode_change_message, encode_heartbeat, encode_join_message,
    encode_leave_message,
};

/// Blocking websocket subscription to one realtime channel.
pub struct RealtimeSocket {
    spec: ChannelSpec,
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
    next_ref: u64,
    heartbeat_interval: Duration,
    last_heartbeat: Instant,
}

impl RealtimeSocket {
    /// Opens the socket and joins the channel described by `spec`.
    pub fn connect(
        base_url: &str,
        anon_key: &str,
        access_token: Option<&str>,
        spec: ChannelSpec,
    ) -> BackendResult<Self> {
        let url = realtime_url(base_url, anon_key)?;
        let (socket, _response) =
            tungstenite::connect(url.as_str()).map_err(|e| BackendError::Realtime(e.to_string()))?;
        let mut channel = Self {
            spec,
            socket,
            next_ref: 1,
            heartbeat_interval: Duration::from_secs(HEARTBEAT_INTERVAL_SECS),
            last_heartbeat: Instant::now(),
        };
        channel.apply_read_timeout()?;
        let message_ref = channel.take_ref();
        let join = encode_join_message(&channel.spec, access_token, message_ref);
        channel.send_json(&join)?;
        debug!(topic = %channel.spec.topic, "realtime channel joined");
        Ok(channel)
    }

    /// Changes the heartbeat cadence. Reads block for at most one interval,
    /// so an idle channel still sends its heartbeats from `poll`.
    pub fn set_heartbeat_interval(&mut self, interval: Duration) -> BackendResult<()> {
        self.heartbeat_interval = interval.max(Duration::from_millis(1));
        self.apply_read_timeout()
    }

    #[must_use]
    pub fn heartbeat_interval(&self) -> Duration {
        self.heartbeat_interval
    }

    fn apply_read_timeout(&self) -> BackendResult<()> {
        let tcp = match self.socket.get_ref() {
            MaybeTlsStream::Plain(tcp) => tcp,
            MaybeTlsStream::Rustls(tls) => &tls.sock,
            _ => return Ok(()),
        };
        tcp.set_read_timeout(Some(self.heartbeat_interval))
            .map_err(|e| BackendError::Realtime(e.to_string()))
    }

    fn take_ref(&mut self) -> u64 {
        let message_ref = self.next_ref;
        self.next_ref += 1;
        message_ref
    }

    fn send_json(&mut self, message: &Value) -> BackendResult<()> {
        self.socket
            .send(Message::Text(message.to_string()))
            .map_err(|e| BackendError::Realtime(e.to_string()))
    }

    fn heartbeat_if_due(&mut self) -> BackendResult<()> {
        if self.last_heartbeat.elapsed() < self.heartbeat_interval {
            return Ok(());
        }
        let message_ref = self.take_ref();
        self.send_json(&encode_heartbeat(message_ref))?;
        self.last_heartbeat = Instant::now();
        Ok(())
    }
}

impl ChannelSubscription for RealtimeSocket {
    fn topic(&self) -> &str {
        &self.spec.topic
    }

    fn poll(&mut self) -> BackendResult<Option<ChangeEvent>> {
        self.heartbeat_if_due()?;
        match self.socket.read() {
            Ok(Message::Text(text)) => decode_change_message(&text),
            Ok(Message::Close(_)) => Err(BackendError::Realtime(
                "channel closed by server".to_owned(),
            )),
            Ok(_) => Ok(None),
            Err(tungstenite::Error::Io(err))
                if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
            {
                self.heartbeat_if_due()?;
                Ok(None)
            }
            Err(err) => Err(BackendError::Realtime(err.to_string())),
        }
    }

    fn close(mut self: Box<Self>) -> BackendResult<()> {
        let message_ref = self.take_ref();
        let leave = encode_leave_message(&self.spec, message_ref);
        self.send_json(&leave)?;
        self.socket
            .close(None)
            .map_err(|e| BackendError::Realtime(e.to_string()))?;
        debug!(topic = %self.spec.topic, "realtime channel left");
        Ok(())
    }
}
