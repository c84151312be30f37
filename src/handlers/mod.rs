//! Bot handlers module
//!
//! Conversation flows driven by transport-neutral [`Inbound`] events:
//! - Command handlers for bot commands and the flows they start
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for text and shared contacts
//!
//! [`telegram`] converts teloxide updates into these events.

pub mod callbacks;
pub mod commands;
pub mod keyboards;
pub mod messages;
pub mod telegram;

pub use commands::Command;

use tracing::{debug, error, info, warn};
use crate::messenger::{Markup, MessageRef, OutgoingMessage};
use crate::state::{AppContext, ConversationContext};
use crate::texts;
use crate::utils::errors::{BotError, ErrorSeverity, Result};

/// Who sent an update and where to answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub user_id: i64,
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Sender {
    /// A private chat, where chat id equals user id
    pub fn private(user_id: i64) -> Self {
        Self {
            user_id,
            chat_id: user_id,
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Inbound {
    Command(Command),
    Text(String),
    /// Phone number from a shared contact
    Contact { phone: String },
    Callback {
        data: String,
        /// Message carrying the tapped keyboard, edited in place when known
        message: Option<MessageRef>,
    },
}

/// Route one inbound event to the flow that owns it
pub async fn dispatch(app: &AppContext, sender: &Sender, inbound: Inbound) {
    debug!(user_id = sender.user_id, inbound = ?inbound, "Dispatching update");

    let result = match inbound {
        Inbound::Command(command) => commands::handle_command(app, sender, command).await,
        Inbound::Text(text) => messages::handle_text(app, sender, &text).await,
        Inbound::Contact { phone } => messages::handle_contact(app, sender, &phone).await,
        Inbound::Callback { data, message } => callbacks::handle_callback_query(app, sender, &data, message).await,
    };

    if let Err(e) = result {
        present_error(app, sender, &e).await;
    }
}

/// Turn a failed flow step into one user-visible message and drop the flow
pub async fn present_error(app: &AppContext, sender: &Sender, error: &BotError) {
    let text = match error {
        BotError::PermissionDenied(reason) => {
            debug!(user_id = sender.user_id, reason = %reason, "Permission denied");
            texts::ACCESS_DENIED
        }
        _ => {
            match error.severity() {
                ErrorSeverity::Info | ErrorSeverity::Warning => {
                    warn!(user_id = sender.user_id, error = %error, recoverable = error.is_recoverable(),
                          "Flow step failed")
                }
                ErrorSeverity::Error | ErrorSeverity::Critical => {
                    error!(user_id = sender.user_id, error = %error, recoverable = error.is_recoverable(),
                           "Flow step failed")
                }
            }
            texts::GENERIC_ERROR
        }
    };

    app.state_storage.delete_context(sender.user_id).await;

    if let Err(e) = app.messenger.send(sender.chat_id, OutgoingMessage::text(text)).await {
        error!(user_id = sender.user_id, error = %e, "Failed to deliver error message");
    }
}

/// Send a new message to the sender's chat
pub(crate) async fn reply(app: &AppContext, sender: &Sender, text: impl Into<String>, markup: Markup) -> Result<()> {
    app.messenger
        .send(sender.chat_id, OutgoingMessage::text(text).with_markup(markup))
        .await?;
    Ok(())
}

/// Edit the message that carried the tapped keyboard, or send a new one
pub(crate) async fn replace(
    app: &AppContext,
    sender: &Sender,
    target: Option<MessageRef>,
    text: impl Into<String>,
    markup: Markup,
) -> Result<()> {
    let message = OutgoingMessage::text(text).with_markup(markup);
    match target {
        Some(target) => app.messenger.edit(target, message).await,
        None => app.messenger.send(sender.chat_id, message).await.map(|_| ()),
    }
}

pub(crate) async fn show_main_menu(app: &AppContext, sender: &Sender) -> Result<()> {
    reply(app, sender, texts::MAIN_MENU_PROMPT, keyboards::main_menu()).await
}

/// End the sender's current flow and forget its scratchpad
pub(crate) async fn finish_flow(app: &AppContext, context: &ConversationContext) {
    info!(summary = ?context.summary(), "Flow finished");
    app.state_storage.delete_context(context.user_id).await;
}

/// Read a scratchpad value every later step relies on
pub(crate) fn required<T: for<'de> serde::Deserialize<'de>>(context: &ConversationContext, key: &str) -> Result<T> {
    context
        .get_data::<T>(key)?
        .ok_or_else(|| BotError::InvalidInput(format!("Missing conversation data: {}", key)))
}
