//! HTTP client for the OpenCtrol desktop agent's REST API.
//!
//! The agent exposes one endpoint per remote-control service under
//! `/api/v1/remotecontrol/`, screen control directly under
//! `/api/v1/screen/`, and a status endpoint the bridge polls.  This module
//! maps each [`Command`] to its route and JSON body, and implements the
//! [`CommandDispatcher`] trait over it.
//!
//! # Retry policy
//!
//! Transient failures (transport errors and HTTP 5xx) are retried up to
//! three attempts with exponential backoff starting at 1 s and capped at
//! 10 s.  Client errors (4xx) indicate a request the agent will never
//! accept, so they fail immediately.  This retry lives below the
//! fire-and-forget dispatch boundary: the translator has already moved on,
//! and a command that exhausts its attempts is only logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use opencrol_core::{AgentStatus, Command};

use crate::application::CommandDispatcher;

/// Maximum delivery attempts per request.
const MAX_ATTEMPTS: u32 = 3;
/// Backoff before the second attempt; doubles per attempt thereafter.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
/// Ceiling on the per-attempt backoff.
const MAX_BACKOFF: Duration = Duration::from_secs(10);
/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for agent communication.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("agent returned HTTP {0}")]
    Status(u16),
    #[error("agent password contains characters not valid in a header")]
    InvalidPassword,
}

/// HTTP client bound to one agent instance.
///
/// Cheap to clone is not needed: the server wraps one instance in an `Arc`
/// and shares it across all sessions.  `reqwest::Client` pools connections
/// internally, so concurrent dispatches reuse sockets.
pub struct AgentClient {
    base_url: String,
    http: reqwest::Client,
}

impl AgentClient {
    /// Builds a client for the agent at `base_url` (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidPassword`] if the password cannot be
    /// encoded as a header value, or [`AgentError::Http`] if the underlying
    /// client fails to initialise.
    pub fn new(base_url: String, password: Option<&str>) -> Result<Self, AgentError> {
        let mut headers = HeaderMap::new();
        if let Some(password) = password {
            let value =
                HeaderValue::from_str(password).map_err(|_| AgentError::InvalidPassword)?;
            headers.insert("X-Password", value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("opencrol-bridge/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Fetches the agent's status report.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] after the retry budget is exhausted or on a
    /// non-retryable response.
    pub async fn status(&self) -> Result<AgentStatus, AgentError> {
        let url = format!("{}/api/v1/status", self.base_url);
        let mut attempt = 1;
        loop {
            let err = match self.http.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    return Ok(resp.json::<AgentStatus>().await?);
                }
                Ok(resp) => AgentError::Status(resp.status().as_u16()),
                Err(e) => AgentError::Http(e),
            };
            if attempt >= MAX_ATTEMPTS || !is_retryable(&err) {
                return Err(err);
            }
            let delay = backoff_delay(attempt);
            debug!("status fetch attempt {attempt} failed ({err}); retrying in {delay:?}");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// POSTs to an agent route with an optional JSON body, retrying
    /// transient failures.
    async fn post_with_retry(&self, path: &str, body: Option<&Value>) -> Result<(), AgentError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 1;
        loop {
            let mut request = self.http.post(&url);
            if let Some(body) = body {
                request = request.json(body);
            }
            let err = match request.send().await {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                Ok(resp) => AgentError::Status(resp.status().as_u16()),
                Err(e) => AgentError::Http(e),
            };
            if attempt >= MAX_ATTEMPTS || !is_retryable(&err) {
                return Err(err);
            }
            let delay = backoff_delay(attempt);
            warn!("POST {path} attempt {attempt} failed ({err}); retrying in {delay:?}");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[async_trait]
impl CommandDispatcher for AgentClient {
    async fn dispatch(&self, command: Command) -> Result<(), String> {
        let (path, body) = command_route(&command);
        self.post_with_retry(&path, body.as_ref())
            .await
            .map_err(|e| e.to_string())
    }
}

// ── Route table ───────────────────────────────────────────────────────────────

/// Maps a command to its agent endpoint and JSON body.
///
/// Pure so the whole table is testable without a server.
pub fn command_route(command: &Command) -> (String, Option<Value>) {
    const RC: &str = "/api/v1/remotecontrol";
    match command {
        Command::Click { button, x, y } => {
            let mut body = json!({ "button": button });
            if let (Some(x), Some(y)) = (x, y) {
                body["x"] = json!(x);
                body["y"] = json!(y);
            }
            (format!("{RC}/mouse/click"), Some(body))
        }
        Command::MoveMouse { x, y, relative } => (
            format!("{RC}/mouse/move"),
            Some(json!({ "x": x, "y": y, "relative": relative })),
        ),
        Command::Scroll { delta } => {
            (format!("{RC}/mouse/scroll"), Some(json!({ "delta": delta })))
        }
        Command::SendKey { keys } => {
            (format!("{RC}/keyboard/key"), Some(json!({ "keys": keys })))
        }
        Command::TypeText { text } => {
            (format!("{RC}/keyboard/type"), Some(json!({ "text": text })))
        }
        Command::SetVolume { volume } => (
            format!("{RC}/audio/volume"),
            Some(json!({ "volume": volume })),
        ),
        Command::SetAppVolume { process_id, volume } => (
            format!("{RC}/audio/app-volume"),
            Some(json!({ "process_id": process_id, "volume": volume })),
        ),
        Command::SetDefaultDevice { device_id } => (
            format!("{RC}/audio/device"),
            Some(json!({ "device_id": device_id })),
        ),
        Command::SetAppDevice {
            process_id,
            device_id,
        } => (
            format!("{RC}/audio/app-device"),
            Some(json!({ "process_id": process_id, "device_id": device_id })),
        ),
        // Screen control predates the remotecontrol service on the agent and
        // sits directly under /api/v1.
        Command::SelectMonitor { monitor_index } => {
            (format!("/api/v1/screen/monitor/{monitor_index}"), None)
        }
        Command::StartScreenCapture => ("/api/v1/screen/start".to_string(), None),
        Command::StopScreenCapture => ("/api/v1/screen/stop".to_string(), None),
        Command::Lock => (format!("{RC}/power/lock"), None),
    }
}

/// Whether a failure is worth another attempt.
///
/// Transport errors and 5xx responses are transient; 4xx means the agent
/// understood the request and refused it.
fn is_retryable(err: &AgentError) -> bool {
    match err {
        AgentError::Http(e) => {
            // A failure during body decode still carries the response
            // status; treat server-side ones as transient like the rest.
            match e.status() {
                Some(status) => status.is_server_error(),
                None => true,
            }
        }
        AgentError::Status(code) => StatusCode::from_u16(*code)
            .map(|s| s.is_server_error())
            .unwrap_or(false),
        AgentError::InvalidPassword => false,
    }
}

/// Backoff before retrying after the `attempt`-th failure (1-based):
/// 1 s, 2 s, 4 s, ... capped at [`MAX_BACKOFF`].
fn backoff_delay(attempt: u32) -> Duration {
    let exp = INITIAL_BACKOFF.saturating_mul(1u32 << (attempt - 1).min(16));
    exp.min(MAX_BACKOFF)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use opencrol_core::MouseButton;

    // ── Route table ───────────────────────────────────────────────────────────

    #[test]
    fn test_click_routes_to_mouse_click_with_button_and_coords() {
        let (path, body) = command_route(&Command::click_at(MouseButton::Left, 100, 200));
        assert_eq!(path, "/api/v1/remotecontrol/mouse/click");
        let body = body.unwrap();
        assert_eq!(body["button"], "left");
        assert_eq!(body["x"], 100);
        assert_eq!(body["y"], 200);
    }

    #[test]
    fn test_coordinate_free_click_omits_coords_from_body() {
        let (_, body) = command_route(&Command::click(MouseButton::Right));
        let body = body.unwrap();
        assert_eq!(body["button"], "right");
        assert!(body.get("x").is_none());
    }

    #[test]
    fn test_move_routes_with_relative_flag() {
        let (path, body) = command_route(&Command::move_relative(15, -6));
        assert_eq!(path, "/api/v1/remotecontrol/mouse/move");
        assert_eq!(body.unwrap(), json!({"x": 15, "y": -6, "relative": true}));
    }

    #[test]
    fn test_keyboard_routes() {
        let (path, body) = command_route(&Command::send_key("CTRL+C").unwrap());
        assert_eq!(path, "/api/v1/remotecontrol/keyboard/key");
        assert_eq!(body.unwrap(), json!({"keys": "CTRL+C"}));

        let (path, _) = command_route(&Command::type_text("hi").unwrap());
        assert_eq!(path, "/api/v1/remotecontrol/keyboard/type");
    }

    #[test]
    fn test_monitor_index_is_a_path_segment() {
        let (path, body) = command_route(&Command::SelectMonitor { monitor_index: 2 });
        assert_eq!(path, "/api/v1/screen/monitor/2");
        assert!(body.is_none());
    }

    #[test]
    fn test_screen_routes_live_outside_the_remotecontrol_prefix() {
        // The agent serves screen control directly under /api/v1; prefixing
        // these with /remotecontrol 404s.
        assert_eq!(
            command_route(&Command::StartScreenCapture).0,
            "/api/v1/screen/start"
        );
        assert_eq!(
            command_route(&Command::StopScreenCapture).0,
            "/api/v1/screen/stop"
        );
        assert_eq!(
            command_route(&Command::SelectMonitor { monitor_index: 0 }).0,
            "/api/v1/screen/monitor/0"
        );
    }

    #[test]
    fn test_unit_commands_route_without_bodies() {
        assert!(command_route(&Command::StartScreenCapture).1.is_none());
        assert!(command_route(&Command::StopScreenCapture).1.is_none());
        assert_eq!(command_route(&Command::Lock).0, "/api/v1/remotecontrol/power/lock");
    }

    // ── Retry policy ──────────────────────────────────────────────────────────

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(is_retryable(&AgentError::Status(500)));
        assert!(is_retryable(&AgentError::Status(503)));
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        assert!(!is_retryable(&AgentError::Status(400)));
        assert!(!is_retryable(&AgentError::Status(401)));
        assert!(!is_retryable(&AgentError::Status(404)));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
        assert_eq!(backoff_delay(4), Duration::from_secs(8));
        assert_eq!(backoff_delay(5), Duration::from_secs(10));
        assert_eq!(backoff_delay(12), Duration::from_secs(10));
    }

    // ── Client construction ───────────────────────────────────────────────────

    #[test]
    fn test_new_strips_trailing_slash_from_base_url() {
        let client = AgentClient::new("http://127.0.0.1:8711/".to_string(), None).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8711");
    }

    #[test]
    fn test_new_rejects_non_header_password() {
        let result = AgentClient::new("http://127.0.0.1:8711".to_string(), Some("bad\nvalue"));
        assert!(matches!(result, Err(AgentError::InvalidPassword)));
    }
}
