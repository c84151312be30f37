//! Mock Telegram API Server for testing
//!
//! Wiremock server standing in for the Bot API, with canned responses for
//! the two methods the messenger calls.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_TOKEN: &str = "12345:test_token";

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub message_id: i32,
    pub delay_ms: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            message_id: 123,
            delay_ms: None,
        }
    }
}

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

fn private_message(chat_id: i64, message_id: i32, edited: bool) -> Value {
    let mut message = json!({
        "message_id": message_id,
        "from": {
            "id": 12345,
            "is_bot": true,
            "first_name": "NailBuddy",
            "username": "nail_buddy_bot"
        },
        "chat": {
            "id": chat_id,
            "first_name": "Anna",
            "type": "private"
        },
        "date": 1792130400,
        "text": "ok"
    });
    if edited {
        message["edit_date"] = json!(1792130460);
    }
    message
}

fn response(config: &MockResponseConfig, result: Value, error: &str) -> ResponseTemplate {
    let (status, body) = if config.success {
        (200, json!({ "ok": true, "result": result }))
    } else {
        (400, json!({ "ok": false, "error_code": 400, "description": error }))
    };

    let mut template = ResponseTemplate::new(status).set_body_json(body);
    if let Some(delay) = config.delay_ms {
        template = template.set_delay(std::time::Duration::from_millis(delay));
    }
    template
}

/// Bot API method path, matched case-insensitively
fn endpoint(api_method: &str) -> String {
    format!(r"(?i)^/bot{}/{}$", TEST_TOKEN, api_method)
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Bot whose requests go to this server
    pub fn bot(&self) -> Bot {
        Bot::new(TEST_TOKEN).set_api_url(self.server.uri().parse().unwrap())
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, chat_id: i64, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path_regex(endpoint("sendMessage")))
            .respond_with(response(
                &config,
                private_message(chat_id, config.message_id, false),
                "Bad Request: chat not found",
            ))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for editMessageText endpoint
    pub async fn mock_edit_message_text(&self, chat_id: i64, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path_regex(endpoint("editMessageText")))
            .respond_with(response(
                &config,
                private_message(chat_id, config.message_id, true),
                "Bad Request: message to edit not found",
            ))
            .mount(&self.server)
            .await;
    }

    /// editMessageText answering the way Telegram does when nothing changed
    pub async fn mock_edit_not_modified(&self) {
        Mock::given(method("POST"))
            .and(path_regex(endpoint("editMessageText")))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: message is not modified: specified new message content and reply markup are exactly the same as a current content and reply markup of the message"
            })))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request made to a Bot API method
    pub async fn request_bodies(&self, api_method: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| {
                request
                    .url
                    .path()
                    .to_lowercase()
                    .ends_with(&format!("/{}", api_method.to_lowercase()))
            })
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}
