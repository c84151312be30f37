//! Client appointment listing and cancellation flow

use tracing::{debug, warn};
use crate::handlers::{finish_flow, keyboards, replace, reply, Sender};
use crate::messenger::{Markup, MessageRef};
use crate::state::{flows, AppContext, ConversationContext};
use crate::texts;
use crate::utils::errors::Result;

/// "📋 Мои записи" and /bookings
pub async fn show_my_bookings(app: &AppContext, sender: &Sender) -> Result<()> {
    let appointments = app.services.booking_service.active_for_client(sender.user_id).await?;

    if appointments.is_empty() {
        return reply(app, sender, texts::NO_ACTIVE_BOOKINGS, Markup::None).await;
    }

    reply(app, sender, texts::my_bookings(&appointments), Markup::None).await
}

/// "❌ Отменить запись": list the caller's confirmed appointments as buttons
pub async fn start_cancellation(app: &AppContext, sender: &Sender) -> Result<()> {
    let appointments = app.services.booking_service.active_for_client(sender.user_id).await?;

    if appointments.iter().all(|appointment| appointment.id.is_none()) {
        debug!(user_id = sender.user_id, listed = appointments.len(), "Nothing to cancel");
        app.state_storage.delete_context(sender.user_id).await;
        return reply(app, sender, texts::NO_BOOKINGS_TO_CANCEL, Markup::None).await;
    }

    let mut context = ConversationContext::new(sender.user_id);
    app.scenario_manager.start_scenario(&mut context, flows::CANCELLATION)?;
    app.state_storage.save_context(&context).await;

    reply(app, sender, texts::CHOOSE_BOOKING_TO_CANCEL, keyboards::cancellable(&appointments)).await
}

/// A tapped `cancel:{id}` button; the flow ends whatever happens
pub async fn handle_cancel_selected(
    app: &AppContext,
    sender: &Sender,
    context: ConversationContext,
    target: Option<MessageRef>,
    appointment_id: &str,
) -> Result<()> {
    finish_flow(app, &context).await;

    let appointment = app
        .services
        .booking_service
        .cancel_for_client(sender.user_id, appointment_id)
        .await?;

    replace(app, sender, target, texts::BOOKING_CANCELLED, Markup::None).await?;

    if !app.services.notification_service.notify_cancellation(&appointment).await {
        warn!(user_id = sender.user_id, appointment_id = %appointment_id, "Master was not notified about the cancellation");
    }

    Ok(())
}
