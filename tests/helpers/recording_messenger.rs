//! In-process Messenger that records everything the bot sends
//!
//! Keeps the current text and keyboard of every message so tests can tap
//! buttons on whatever the user would see right now.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use NailBuddy::messenger::{Markup, MessageRef, Messenger, OutgoingMessage};
use NailBuddy::utils::errors::{BotError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Sent { chat_id: i64, message: OutgoingMessage },
    Edited { target: MessageRef, message: OutgoingMessage },
}

impl Delivery {
    pub fn chat_id(&self) -> i64 {
        match self {
            Delivery::Sent { chat_id, .. } => *chat_id,
            Delivery::Edited { target, .. } => target.chat_id,
        }
    }

    pub fn message(&self) -> &OutgoingMessage {
        match self {
            Delivery::Sent { message, .. } | Delivery::Edited { message, .. } => message,
        }
    }
}

#[derive(Default)]
pub struct RecordingMessenger {
    deliveries: Mutex<Vec<Delivery>>,
    /// Current content of every message by id
    messages: Mutex<BTreeMap<i32, (i64, OutgoingMessage)>>,
    failing_chats: Mutex<HashSet<i64>>,
    reject_unchanged: AtomicBool,
    next_id: AtomicI32,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI32::new(1),
            ..Self::default()
        }
    }

    /// Make every delivery to this chat fail
    pub fn fail_chat(&self, chat_id: i64) {
        self.failing_chats.lock().unwrap().insert(chat_id);
    }

    /// Fail edits that would leave a message exactly as it is, like the Bot API does
    pub fn reject_unchanged_edits(&self) {
        self.reject_unchanged.store(true, Ordering::SeqCst);
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.deliveries.lock().unwrap().clear();
    }

    /// Texts delivered to a chat, sends and edits alike, in order
    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.deliveries()
            .iter()
            .filter(|d| d.chat_id() == chat_id)
            .map(|d| d.message().text.clone())
            .collect()
    }

    pub fn last_to(&self, chat_id: i64) -> Option<Delivery> {
        self.deliveries().into_iter().rev().find(|d| d.chat_id() == chat_id)
    }

    pub fn last_text_to(&self, chat_id: i64) -> Option<String> {
        self.last_to(chat_id).map(|d| d.message().text.clone())
    }

    /// The newest message in the chat that currently carries an inline keyboard
    pub fn latest_keyboard(&self, chat_id: i64) -> Option<(MessageRef, OutgoingMessage)> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(_, (chat, message))| *chat == chat_id && matches!(message.markup, Markup::Inline(_)))
            .map(|(id, (chat, message))| {
                (
                    MessageRef {
                        chat_id: *chat,
                        message_id: *id,
                    },
                    message.clone(),
                )
            })
    }

    fn check(&self, chat_id: i64) -> Result<()> {
        if self.failing_chats.lock().unwrap().contains(&chat_id) {
            return Err(BotError::InvalidInput(format!("chat {} is unreachable", chat_id)));
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, chat_id: i64, message: OutgoingMessage) -> Result<MessageRef> {
        self.check(chat_id)?;

        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.messages.lock().unwrap().insert(message_id, (chat_id, message.clone()));
        self.deliveries.lock().unwrap().push(Delivery::Sent { chat_id, message });

        Ok(MessageRef { chat_id, message_id })
    }

    async fn edit(&self, target: MessageRef, message: OutgoingMessage) -> Result<()> {
        self.check(target.chat_id)?;

        // Edited messages keep only inline keyboards
        let mut stored = message.clone();
        if !matches!(stored.markup, Markup::Inline(_)) {
            stored.markup = Markup::None;
        }

        let mut messages = self.messages.lock().unwrap();
        if self.reject_unchanged.load(Ordering::SeqCst)
            && messages.get(&target.message_id) == Some(&(target.chat_id, stored.clone()))
        {
            return Err(BotError::InvalidInput(format!("message {} is not modified", target.message_id)));
        }

        messages.insert(target.message_id, (target.chat_id, stored));
        drop(messages);
        self.deliveries.lock().unwrap().push(Delivery::Edited { target, message });
        Ok(())
    }
}
