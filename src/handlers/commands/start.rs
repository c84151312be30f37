//! Start command handler
//!
//! Handles the /start command and the client registration flow:
//! name, then phone (shared contact or typed by hand), then one row in the
//! clients sheet.

use tracing::{debug, info};
use crate::handlers::{finish_flow, keyboards, reply, required, show_main_menu, Sender};
use crate::messenger::Markup;
use crate::models::CreateClientRequest;
use crate::state::{flows, steps, AppContext, ConversationContext};
use crate::texts;
use crate::utils::errors::{BotError, Result};

/// Handle /start command - main menu for clients, registration for everyone else
pub async fn handle_start(app: &AppContext, sender: &Sender) -> Result<()> {
    debug!(user_id = sender.user_id, "Processing /start command");

    app.state_storage.delete_context(sender.user_id).await;

    if let Some(client) = app.services.client_service.find(sender.user_id).await? {
        debug!(user_id = sender.user_id, client_name = %client.client_name, "Returning client");
        return show_main_menu(app, sender).await;
    }

    info!(user_id = sender.user_id, "New user starting registration");

    let mut context = ConversationContext::new(sender.user_id);
    app.scenario_manager.start_scenario(&mut context, flows::REGISTRATION)?;
    context.set_data("username", &sender.username)?;
    context.set_data("first_name", &sender.first_name)?;
    context.set_data("last_name", &sender.last_name)?;
    app.state_storage.save_context(&context).await;

    let greeting = texts::greeting(sender.first_name.as_deref().unwrap_or_default());
    reply(app, sender, greeting, Markup::RemoveReply).await
}

/// Name step: any text is taken verbatim as the booking name
pub async fn handle_name_input(
    app: &AppContext,
    sender: &Sender,
    mut context: ConversationContext,
    text: &str,
) -> Result<()> {
    match app.scenario_manager.validate_input(&context, text) {
        Ok(()) => {}
        Err(BotError::InvalidInput(message)) => {
            debug!(user_id = sender.user_id, "Rejected client name");
            return reply(app, sender, message, Markup::None).await;
        }
        Err(e) => return Err(e),
    }

    context.set_data("client_name", text)?;
    app.scenario_manager.next_step(&mut context, steps::PHONE_CHOICE)?;
    app.state_storage.save_context(&context).await;

    reply(app, sender, texts::ASK_PHONE, keyboards::phone_choice()).await
}

/// Phone choice step: typed text means the client wants to enter the number by hand
pub async fn handle_phone_choice(app: &AppContext, sender: &Sender, mut context: ConversationContext) -> Result<()> {
    app.scenario_manager.next_step(&mut context, steps::PHONE_MANUAL)?;
    app.state_storage.save_context(&context).await;

    reply(app, sender, texts::ASK_PHONE_MANUAL, Markup::RemoveReply).await
}

/// Manual phone step: re-prompt until the number passes validation
pub async fn handle_phone_manual(
    app: &AppContext,
    sender: &Sender,
    context: ConversationContext,
    text: &str,
) -> Result<()> {
    match app.scenario_manager.validate_input(&context, text) {
        Ok(()) => complete_registration(app, sender, context, text).await,
        Err(BotError::InvalidInput(message)) => {
            debug!(user_id = sender.user_id, "Rejected phone number");
            reply(app, sender, message, Markup::None).await
        }
        Err(e) => Err(e),
    }
}

/// Shared contact: skips manual entry
pub async fn handle_contact(
    app: &AppContext,
    sender: &Sender,
    context: ConversationContext,
    phone: &str,
) -> Result<()> {
    complete_registration(app, sender, context, phone).await
}

async fn complete_registration(
    app: &AppContext,
    sender: &Sender,
    context: ConversationContext,
    phone: &str,
) -> Result<()> {
    let client_name: String = required(&context, "client_name")?;

    let request = CreateClientRequest {
        user_id: sender.user_id,
        client_name,
        phone: phone.to_string(),
        username: context.get_data::<Option<String>>("username")?.flatten(),
        first_name: context.get_data::<Option<String>>("first_name")?.flatten(),
        last_name: context.get_data::<Option<String>>("last_name")?.flatten(),
    };

    let client = app.services.client_service.register(request).await?;
    finish_flow(app, &context).await;

    reply(
        app,
        sender,
        texts::registration_complete(&client.client_name, &client.phone),
        Markup::None,
    )
    .await?;
    show_main_menu(app, sender).await
}
