//! Telegram implementation of [`Messenger`]

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
    KeyboardRemove, MessageId,
};
use teloxide::{ApiError, RequestError};
use tracing::debug;
use super::{InlineButton, Markup, MessageRef, Messenger, OutgoingMessage, ReplyButton};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn inline_keyboard(rows: Vec<Vec<InlineButton>>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.into_iter().map(|row| {
        row.into_iter()
            .map(|button| InlineKeyboardButton::callback(button.text, button.data))
            .collect::<Vec<_>>()
    }))
}

fn reply_keyboard(rows: Vec<Vec<ReplyButton>>, one_time: bool) -> KeyboardMarkup {
    let keyboard = KeyboardMarkup::new(rows.into_iter().map(|row| {
        row.into_iter()
            .map(|button| match button {
                ReplyButton::Text(text) => KeyboardButton::new(text),
                ReplyButton::RequestContact(text) => KeyboardButton::new(text).request(ButtonRequest::Contact),
            })
            .collect::<Vec<_>>()
    }))
    .resize_keyboard();

    if one_time {
        keyboard.one_time_keyboard()
    } else {
        keyboard
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: i64, message: OutgoingMessage) -> Result<MessageRef> {
        let request = self.bot.send_message(ChatId(chat_id), message.text);
        let sent = match message.markup {
            Markup::None => request.await?,
            Markup::Inline(rows) => request.reply_markup(inline_keyboard(rows)).await?,
            Markup::Reply { rows, one_time } => request.reply_markup(reply_keyboard(rows, one_time)).await?,
            Markup::RemoveReply => request.reply_markup(KeyboardRemove::new()).await?,
        };

        debug!(chat_id = chat_id, message_id = sent.id.0, "Message sent");
        Ok(MessageRef {
            chat_id,
            message_id: sent.id.0,
        })
    }

    async fn edit(&self, target: MessageRef, message: OutgoingMessage) -> Result<()> {
        let request = self
            .bot
            .edit_message_text(ChatId(target.chat_id), MessageId(target.message_id), message.text);

        // Only inline keyboards can be attached to an edited message
        let result = match message.markup {
            Markup::Inline(rows) => request.reply_markup(inline_keyboard(rows)).await.map(|_| ()),
            _ => request.await.map(|_| ()),
        };

        match result {
            Ok(()) => debug!(chat_id = target.chat_id, message_id = target.message_id, "Message edited"),
            // Same text and keyboard as before, e.g. the same full day tapped twice
            Err(RequestError::Api(ApiError::MessageNotModified)) => {
                debug!(chat_id = target.chat_id, message_id = target.message_id, "Message already up to date")
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
