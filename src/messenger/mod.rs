//! Chat transport boundary
//!
//! Conversation flows talk to users only through [`Messenger`], so they can be
//! driven without Telegram in tests.

pub mod telegram;

use async_trait::async_trait;
use crate::utils::errors::Result;

pub use telegram::TelegramMessenger;

/// Button of an inline keyboard attached to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub data: String,
}

impl InlineButton {
    pub fn new(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: data.into(),
        }
    }
}

/// Button of a reply keyboard shown below the input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyButton {
    Text(String),
    /// Asks the client to share their phone number
    RequestContact(String),
}

impl ReplyButton {
    pub fn text(&self) -> &str {
        match self {
            ReplyButton::Text(text) | ReplyButton::RequestContact(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Markup {
    #[default]
    None,
    Inline(Vec<Vec<InlineButton>>),
    Reply {
        rows: Vec<Vec<ReplyButton>>,
        one_time: bool,
    },
    RemoveReply,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub markup: Markup,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::None,
        }
    }

    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    /// Callback data of every inline button, row by row
    pub fn callback_data(&self) -> Vec<&str> {
        match &self.markup {
            Markup::Inline(rows) => rows.iter().flatten().map(|b| b.data.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

/// A message that was sent and can be edited later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat_id: i64, message: OutgoingMessage) -> Result<MessageRef>;

    /// Replace text and inline keyboard of an earlier message
    async fn edit(&self, target: MessageRef, message: OutgoingMessage) -> Result<()>;
}
