//! teloxide entry points
//!
//! Converts Telegram updates into [`Inbound`] events for private chats and
//! hands them to [`dispatch`].

use std::sync::Arc;
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{MaybeInaccessibleMessage, User};
use tracing::{debug, warn};
use super::{dispatch, Command, Inbound, Sender};
use crate::messenger::MessageRef;
use crate::state::AppContext;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

/// Create the main update handler
pub fn schema() -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter(|msg: Message| msg.chat.is_private())
                .branch(dptree::entry().filter_command::<Command>().endpoint(handle_command))
                .branch(dptree::endpoint(handle_message)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

fn sender_from(user: &User, chat_id: i64) -> Sender {
    Sender {
        user_id: user.id.0 as i64,
        chat_id,
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
    }
}

async fn handle_command(msg: Message, cmd: Command, app: Arc<AppContext>) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    dispatch(&app, &sender_from(user, msg.chat.id.0), Inbound::Command(cmd)).await;
    Ok(())
}

async fn handle_message(msg: Message, app: Arc<AppContext>) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let inbound = if let Some(contact) = msg.contact() {
        Inbound::Contact {
            phone: contact.phone_number.clone(),
        }
    } else if let Some(text) = msg.text() {
        Inbound::Text(text.to_string())
    } else {
        debug!(user_id = user.id.0, "Ignoring message without text or contact");
        return Ok(());
    };

    dispatch(&app, &sender_from(user, msg.chat.id.0), inbound).await;
    Ok(())
}

async fn handle_callback(bot: Bot, query: CallbackQuery, app: Arc<AppContext>) -> HandlerResult {
    // Answer first so the client stops showing the loading state
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let Some(data) = query.data.clone() else {
        return Ok(());
    };

    let message = query.message.as_ref().map(|message: &MaybeInaccessibleMessage| MessageRef {
        chat_id: message.chat().id.0,
        message_id: message.id().0,
    });
    let chat_id = message.map_or(query.from.id.0 as i64, |m| m.chat_id);

    dispatch(&app, &sender_from(&query.from, chat_id), Inbound::Callback { data, message }).await;
    Ok(())
}
