//! SteelSeries GameSense HTTP client.
//!
//! GameSense is a small JSON-over-HTTP server run by SteelSeries GG on localhost. An app
//! registers itself, binds an event to a screen handler, then pushes event values whose
//! `frame` carries the text for each line.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::blocking::Client;
use serde_json::{json, Map, Value};

use crate::core::config::GameSenseConfig;
use crate::core::display::{DisplaySink, Frame};
use crate::error::{MonitorError, Result};

pub struct GameSenseClient {
    client: Client,
    base_url: String,
    /// Game that event calls are issued under; the last registered one wins
    app_id: Mutex<String>,
    setup_timeout: Duration,
    frame_timeout: Duration,
    unbind_timeout: Duration,
}

impl GameSenseClient {
    pub fn new(base_url: impl Into<String>, config: &GameSenseConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| MonitorError::display(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            app_id: Mutex::new(config.app_id.clone()),
            setup_timeout: Duration::from_millis(config.setup_timeout_ms),
            frame_timeout: Duration::from_millis(config.frame_timeout_ms),
            unbind_timeout: Duration::from_millis(config.unbind_timeout_ms),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn app_id(&self) -> String {
        self.app_id.lock().clone()
    }

    fn post(&self, endpoint: &str, body: &Value, timeout: Duration) -> Result<()> {
        let url = format!("{}/{}", self.base_url, endpoint);

        self.client
            .post(&url)
            .json(body)
            .timeout(timeout)
            .send()?
            .error_for_status()?;

        Ok(())
    }
}

impl DisplaySink for GameSenseClient {
    fn register(&self, app_id: &str, display_name: &str) -> Result<()> {
        *self.app_id.lock() = app_id.to_string();
        self.post(
            "game_metadata",
            &json!({ "game": app_id, "game_display_name": display_name }),
            self.setup_timeout,
        )
    }

    fn bind(&self, event_id: &str, line_count: usize) -> Result<()> {
        self.post(
            "bind_game_event",
            &bind_body(&self.app_id(), event_id, line_count),
            self.setup_timeout,
        )
    }

    fn send_frame(&self, event_id: &str, frame: &Frame, duration_ms: Option<u64>) -> Result<()> {
        self.post(
            "game_event",
            &frame_body(&self.app_id(), event_id, frame, duration_ms),
            self.frame_timeout,
        )
    }

    fn unbind(&self, event_id: &str) -> Result<()> {
        self.post(
            "remove_game_event",
            &json!({ "game": self.app_id(), "event": event_id }),
            self.unbind_timeout,
        )
    }

    fn unregister(&self, app_id: &str) -> Result<()> {
        self.post("remove_game", &json!({ "game": app_id }), self.setup_timeout)
    }
}

/// Screen handler with one text line per frame key (`line1`, `line2`, ...)
fn bind_body(app_id: &str, event_id: &str, line_count: usize) -> Value {
    let lines: Vec<Value> = (1..=line_count)
        .map(|i| json!({ "has-text": true, "context-frame-key": format!("line{}", i) }))
        .collect();

    json!({
        "game": app_id,
        "event": event_id,
        "handlers": [{
            "device-type": "screened",
            "zone": "one",
            "mode": "screen",
            "datas": [{ "lines": lines }]
        }],
        "value_optional": true
    })
}

fn frame_body(app_id: &str, event_id: &str, frame: &Frame, duration_ms: Option<u64>) -> Value {
    let mut frame_map = Map::new();
    for (i, line) in frame.lines.iter().enumerate() {
        frame_map.insert(format!("line{}", i + 1), Value::String(line.clone()));
    }

    let mut data = Map::new();
    data.insert("frame".to_string(), Value::Object(frame_map));
    if let Some(duration) = duration_ms {
        data.insert("length-millis".to_string(), json!(duration));
    }

    json!({ "game": app_id, "event": event_id, "data": data })
}
