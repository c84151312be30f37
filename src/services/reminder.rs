//! Daily reminder job
//!
//! Once a day at the configured wall clock time every client with a
//! confirmed appointment tomorrow gets a reminder, and the operator gets one
//! summary of tomorrow's schedule.

use std::sync::Arc;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use futures::future::join_all;
use tracing::{error, info, warn};
use super::notification::NotificationService;
use crate::database::DatabaseService;
use crate::utils::clock::Clock;
use crate::utils::errors::Result;

/// Outcome of one reminder run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReminderReport {
    pub reminded: usize,
    pub failed: usize,
    pub summary_sent: bool,
}

#[derive(Clone)]
pub struct ReminderService {
    database: DatabaseService,
    notifications: NotificationService,
}

impl ReminderService {
    pub fn new(database: DatabaseService, notifications: NotificationService) -> Self {
        Self {
            database,
            notifications,
        }
    }

    /// Remind clients about appointments on the day after `today`
    pub async fn run_once(&self, today: NaiveDate) -> Result<ReminderReport> {
        let tomorrow = today + Duration::days(1);
        let appointments = self.database.appointments.get_confirmed_on(tomorrow).await?;

        let delivered = join_all(
            appointments
                .iter()
                .map(|appointment| self.notifications.send_reminder(appointment)),
        )
        .await;

        let mut report = ReminderReport {
            reminded: delivered.iter().filter(|sent| **sent).count(),
            failed: delivered.iter().filter(|sent| !**sent).count(),
            summary_sent: false,
        };

        report.summary_sent = self.notifications.send_daily_summary(tomorrow, &appointments).await;

        info!(
            date = %tomorrow,
            appointments = appointments.len(),
            reminded = report.reminded,
            failed = report.failed,
            summary_sent = report.summary_sent,
            "Reminder run finished"
        );
        Ok(report)
    }
}

/// Next moment at `at` strictly after `now`
pub fn next_run_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let candidate = now.date().and_time(at);
    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}

/// Background task running [`ReminderService::run_once`] every day
pub struct ReminderScheduler {
    service: ReminderService,
    clock: Arc<dyn Clock>,
    run_at: NaiveTime,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(service: ReminderService, clock: Arc<dyn Clock>, run_at: NaiveTime) -> Self {
        Self {
            service,
            clock,
            run_at,
            handle: None,
        }
    }

    pub fn start(&mut self) {
        if self.handle.is_some() {
            warn!("Reminder scheduler is already running");
            return;
        }

        let service = self.service.clone();
        let clock = self.clock.clone();
        let run_at = self.run_at;

        let handle = tokio::spawn(async move {
            loop {
                let now = clock.now();
                let next = next_run_after(now, run_at);
                let wait = (next - now).to_std().unwrap_or_default();
                info!(next_run = %next, "Reminder job scheduled");
                tokio::time::sleep(wait).await;

                if let Err(e) = service.run_once(next.date()).await {
                    error!(error = %e, "Reminder run failed");
                }
            }
        });

        self.handle = Some(handle);
        info!(run_at = %run_at, "Started reminder scheduler");
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Stopped reminder scheduler");
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
