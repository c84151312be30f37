//! Booking flow
//!
//! service → calendar day → free slot → confirmation. Every step after the
//! first edits the message carrying the inline keyboard.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};
use crate::handlers::{finish_flow, keyboards, replace, reply, required, show_main_menu, Sender};
use crate::messenger::{Markup, MessageRef};
use crate::models::CreateAppointmentRequest;
use crate::services::{BookingOutcome, CalendarMonth};
use crate::state::{flows, steps, AppContext, ConversationContext};
use crate::texts;
use crate::utils::errors::{BotError, Result};

/// Entry point from the menu button or /book
pub async fn start_booking(app: &AppContext, sender: &Sender) -> Result<()> {
    let Some(client) = app.services.client_service.find(sender.user_id).await? else {
        debug!(user_id = sender.user_id, "Unregistered user tried to book");
        app.state_storage.delete_context(sender.user_id).await;
        return reply(app, sender, texts::REGISTER_FIRST, Markup::None).await;
    };

    let services = app.services.booking_service.list_services().await?;

    let mut context = ConversationContext::new(sender.user_id);
    app.scenario_manager.start_scenario(&mut context, flows::BOOKING)?;
    context.set_data("client_name", &client.client_name)?;
    context.set_data("phone", &client.phone)?;
    // Service buttons carry positions into this list
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    context.set_data("services", &names)?;
    app.state_storage.save_context(&context).await;

    info!(user_id = sender.user_id, services = services.len(), "Booking started");
    reply(app, sender, texts::CHOOSE_SERVICE, keyboards::services(&services)).await
}

fn calendar_markup(app: &AppContext, offset: i32) -> Result<Markup> {
    CalendarMonth::build(app.clock.today(), offset)
        .map(|month| keyboards::calendar(&month))
        .ok_or_else(|| BotError::InvalidInput(format!("Calendar offset out of range: {}", offset)))
}

pub async fn handle_service_selected(
    app: &AppContext,
    sender: &Sender,
    mut context: ConversationContext,
    target: Option<MessageRef>,
    position: usize,
) -> Result<()> {
    let names: Vec<String> = required(&context, "services")?;
    let Some(service_name) = names.get(position) else {
        warn!(user_id = sender.user_id, position, "Service button outside the offered list");
        return Ok(());
    };

    context.set_data("service", service_name)?;
    context.set_data("offset", 0)?;
    app.scenario_manager.next_step(&mut context, steps::DATE_SELECTION)?;
    app.state_storage.save_context(&context).await;

    replace(app, sender, target, texts::CHOOSE_DATE, calendar_markup(app, 0)?).await
}

/// Month navigation keeps the flow on the date step
pub async fn handle_month_navigation(
    app: &AppContext,
    sender: &Sender,
    mut context: ConversationContext,
    target: Option<MessageRef>,
    offset: i32,
) -> Result<()> {
    let markup = calendar_markup(app, offset)?;
    context.set_data("offset", offset)?;
    app.state_storage.save_context(&context).await;

    replace(app, sender, target, texts::CHOOSE_DATE, markup).await
}

pub async fn handle_day_selected(
    app: &AppContext,
    sender: &Sender,
    mut context: ConversationContext,
    target: Option<MessageRef>,
    date: NaiveDate,
) -> Result<()> {
    if date < app.clock.today() {
        debug!(user_id = sender.user_id, date = %date, "Ignoring past day");
        return Ok(());
    }

    let slots = app.services.booking_service.available_slots(date).await?;
    if slots.is_empty() {
        let offset = context.get_i64("offset").unwrap_or(0) as i32;
        debug!(user_id = sender.user_id, date = %date, "No free slots");
        return replace(app, sender, target, texts::no_free_slots(date), calendar_markup(app, offset)?).await;
    }

    context.set_data("date", date)?;
    app.scenario_manager.next_step(&mut context, steps::TIME_SELECTION)?;
    app.state_storage.save_context(&context).await;

    replace(app, sender, target, texts::choose_time(date), keyboards::times(&slots)).await
}

pub async fn handle_time_selected(
    app: &AppContext,
    sender: &Sender,
    mut context: ConversationContext,
    target: Option<MessageRef>,
    time: NaiveTime,
) -> Result<()> {
    let client_name: String = required(&context, "client_name")?;
    let phone: String = required(&context, "phone")?;
    let service: String = required(&context, "service")?;
    let date: NaiveDate = required(&context, "date")?;

    context.set_data("time", time)?;
    app.scenario_manager.next_step(&mut context, steps::CONFIRMATION)?;
    app.state_storage.save_context(&context).await;

    let summary = texts::booking_summary(&client_name, &phone, &service, date, time);
    replace(app, sender, target, summary, keyboards::confirmation()).await
}

pub async fn handle_confirmation(
    app: &AppContext,
    sender: &Sender,
    mut context: ConversationContext,
    target: Option<MessageRef>,
    confirmed: bool,
) -> Result<()> {
    if !confirmed {
        finish_flow(app, &context).await;
        replace(app, sender, target, texts::BOOKING_DECLINED, Markup::None).await?;
        return show_main_menu(app, sender).await;
    }

    let request = CreateAppointmentRequest {
        client_user_id: sender.user_id,
        client_name: required(&context, "client_name")?,
        phone: required(&context, "phone")?,
        service_name: required(&context, "service")?,
        date: required(&context, "date")?,
        time: required(&context, "time")?,
    };
    let date = request.date;

    match app.services.booking_service.create(request).await? {
        BookingOutcome::Created(appointment) => {
            context.set_data("appointment_id", &appointment.id)?;
            finish_flow(app, &context).await;

            replace(app, sender, target, texts::BOOKING_CONFIRMED, Markup::None).await?;

            if !app.services.notification_service.notify_new_booking(&appointment).await {
                warn!(user_id = sender.user_id, appointment_id = ?appointment.id, "Master was not notified about the booking");
            }

            show_main_menu(app, sender).await
        }
        BookingOutcome::SlotTaken => {
            context.remove_data("time");
            let slots = app.services.booking_service.available_slots(date).await?;

            if slots.is_empty() {
                context.remove_data("date");
                app.scenario_manager.next_step(&mut context, steps::DATE_SELECTION)?;
                app.state_storage.save_context(&context).await;

                let offset = context.get_i64("offset").unwrap_or(0) as i32;
                return replace(app, sender, target, texts::no_free_slots(date), calendar_markup(app, offset)?).await;
            }

            app.scenario_manager.next_step(&mut context, steps::TIME_SELECTION)?;
            app.state_storage.save_context(&context).await;

            replace(app, sender, target, texts::SLOT_TAKEN, keyboards::times(&slots)).await
        }
    }
}
