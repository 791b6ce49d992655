use serde_json::Value;

use super::{BackendError, BackendResult};

#[must_use]
pub fn auth_url(base_url: &str, path: &str) -> String {
    format!("{}/auth/v1/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[must_use]
pub fn rest_url(base_url: &str, table: &str) -> String {
    format!(
        "{}/rest/v1/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(table)
    )
}

/// Websocket endpoint of the realtime service.
pub fn realtime_url(base_url: &str, anon_key: &str) -> BackendResult<String> {
    let base = base_url.trim_end_matches('/');
    let socket_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        return Err(BackendError::Realtime(format!(
            "unsupported project url scheme: `{base_url}`"
        )));
    };
    Ok(format!(
        "{socket_base}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
        urlencoding::encode(anon_key)
    ))
}

/// Settings key under which the session is persisted:
/// `sb-{project-ref}-auth-token`, the ref being the first host label.
#[must_use]
pub fn session_storage_key(base_url: &str) -> String {
    let without_scheme = base_url
        .split_once("://")
        .map_or(base_url, |(_, rest)| rest);
    let host = without_scheme
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    let project_ref = host.split('.').next().unwrap_or_default();
    format!("sb-{project_ref}-auth-token")
}

/// Maps an unsuccessful response to [`BackendError::Api`], taking the message
/// from the JSON error body when there is one.
#[must_use]
pub fn api_error(status: u16, body: &str) -> BackendError {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["msg", "message", "error_description", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_owned))
    });
    let message = from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            format!("HTTP status {status}")
        } else {
            trimmed.to_owned()
        }
    });
    BackendError::Api { status, message }
}

/// Normalizes a response body to rows: arrays as-is, a single object as one
/// row, nothing as no rows.
#[must_use]
pub fn rows_from_body(body: Option<Value>) -> Vec<Value> {
    match body {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(rows)) => rows,
        Some(row) => vec![row],
    }
}
