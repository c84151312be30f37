//! Operator and client notifications
//!
//! Every delivery here is best-effort: failures are logged and reported to
//! the caller as `false`, never retried.

use std::sync::Arc;
use chrono::NaiveDate;
use crate::messenger::{Messenger, OutgoingMessage};
use crate::models::Appointment;
use crate::texts;
use crate::utils::logging::log_notification;

#[derive(Clone)]
pub struct NotificationService {
    messenger: Arc<dyn Messenger>,
    master_chat_id: Option<i64>,
}

impl NotificationService {
    pub fn new(messenger: Arc<dyn Messenger>, master_chat_id: Option<i64>) -> Self {
        Self {
            messenger,
            master_chat_id,
        }
    }

    async fn deliver(&self, chat_id: i64, kind: &str, text: String) -> bool {
        match self.messenger.send(chat_id, OutgoingMessage::text(text)).await {
            Ok(_) => {
                log_notification(chat_id, kind, None);
                true
            }
            Err(e) => {
                log_notification(chat_id, kind, Some(&e.to_string()));
                false
            }
        }
    }

    async fn notify_master(&self, kind: &str, text: String) -> bool {
        match self.master_chat_id {
            Some(chat_id) => self.deliver(chat_id, kind, text).await,
            None => false,
        }
    }

    pub async fn notify_new_booking(&self, appointment: &Appointment) -> bool {
        self.notify_master("new_booking", texts::master_new_booking(appointment)).await
    }

    pub async fn notify_cancellation(&self, appointment: &Appointment) -> bool {
        self.notify_master("cancellation", texts::master_cancellation(appointment)).await
    }

    /// Tomorrow's schedule for the operator; nothing is sent for an empty day
    pub async fn send_daily_summary(&self, date: NaiveDate, appointments: &[Appointment]) -> bool {
        if appointments.is_empty() {
            return false;
        }
        self.notify_master("daily_summary", texts::master_daily_summary(date, appointments)).await
    }

    pub async fn send_reminder(&self, appointment: &Appointment) -> bool {
        self.deliver(appointment.client_user_id, "reminder", texts::client_reminder(appointment)).await
    }
}
