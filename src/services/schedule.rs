//! Read-only schedule views for the operator

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use chrono::NaiveDate;
use crate::database::DatabaseService;
use crate::models::{Appointment, AppointmentStatus};
use crate::utils::clock::Clock;
use crate::utils::errors::Result;

/// Salon-wide counters for the operator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalonStatistics {
    pub clients: usize,
    pub total_appointments: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    /// Confirmed appointments dated today or later
    pub upcoming: usize,
    pub top_service: Option<(String, usize)>,
}

#[derive(Clone)]
pub struct ScheduleService {
    database: DatabaseService,
    clock: Arc<dyn Clock>,
}

impl ScheduleService {
    pub fn new(database: DatabaseService, clock: Arc<dyn Clock>) -> Self {
        Self { database, clock }
    }

    /// Confirmed appointments of one day, sorted by time
    pub async fn on(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        self.database.appointments.get_confirmed_on(date).await
    }

    pub async fn today(&self) -> Result<Vec<Appointment>> {
        self.on(self.clock.today()).await
    }

    pub async fn tomorrow(&self) -> Result<Vec<Appointment>> {
        self.on(self.clock.tomorrow()).await
    }

    /// Confirmed appointments from today on, grouped by date ascending
    pub async fn upcoming_by_date(&self) -> Result<BTreeMap<NaiveDate, Vec<Appointment>>> {
        let today = self.clock.today();
        let mut days: BTreeMap<NaiveDate, Vec<Appointment>> = BTreeMap::new();

        for appointment in self.database.appointments.get_all().await? {
            if appointment.is_confirmed() && appointment.date >= today {
                days.entry(appointment.date).or_default().push(appointment);
            }
        }

        for appointments in days.values_mut() {
            appointments.sort_by_key(|a| a.time);
        }

        Ok(days)
    }

    pub async fn statistics(&self) -> Result<SalonStatistics> {
        let today = self.clock.today();
        let appointments = self.database.appointments.get_all().await?;
        let clients = self.database.clients.count().await?;

        let mut stats = SalonStatistics {
            clients,
            total_appointments: appointments.len(),
            ..SalonStatistics::default()
        };

        let mut per_service: HashMap<&str, usize> = HashMap::new();
        for appointment in &appointments {
            match appointment.status {
                AppointmentStatus::Confirmed => {
                    stats.confirmed += 1;
                    if appointment.date >= today {
                        stats.upcoming += 1;
                    }
                    *per_service.entry(appointment.service_name.as_str()).or_insert(0) += 1;
                }
                AppointmentStatus::Cancelled => stats.cancelled += 1,
            }
        }

        // Ties resolve to the alphabetically first name
        stats.top_service = per_service
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, count)| (name.to_string(), count));

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{InMemoryStore, Record, Sheet};
    use crate::utils::clock::FixedClock;

    fn row(service: &str, date: &str, time: &str, status: &str) -> Record {
        Record::from([
            ("id".to_string(), crate::utils::helpers::generate_uuid()),
            ("user_id".to_string(), "1".to_string()),
            ("service".to_string(), service.to_string()),
            ("date".to_string(), date.to_string()),
            ("time".to_string(), time.to_string()),
            ("status".to_string(), status.to_string()),
        ])
    }

    fn schedule() -> ScheduleService {
        let store = Arc::new(InMemoryStore::with_records([
            (
                Sheet::Appointments,
                vec![
                    row("Маникюр", "2026-10-15", "10:00", "confirmed"),
                    row("Педикюр", "2026-10-17", "12:00", "confirmed"),
                    row("Маникюр", "2026-10-16", "15:00", "confirmed"),
                    row("Маникюр", "2026-10-16", "09:00", "confirmed"),
                    row("Покрытие", "2026-10-17", "10:00", "cancelled"),
                ],
            ),
            (Sheet::Clients, vec![Record::from([("user_id".to_string(), "1".to_string())])]),
        ]));
        let now = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(8, 0, 0).unwrap();
        ScheduleService::new(DatabaseService::new(store), Arc::new(FixedClock(now)))
    }

    #[tokio::test]
    async fn test_upcoming_grouped_and_sorted() {
        let days = schedule().upcoming_by_date().await.unwrap();
        let dates: Vec<String> = days.keys().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2026-10-16", "2026-10-17"]);

        let first_day: Vec<String> = days.values().next().unwrap().iter().map(|a| a.time.to_string()).collect();
        assert_eq!(first_day, vec!["09:00:00", "15:00:00"]);
        assert_eq!(days.values().nth(1).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_statistics() {
        let stats = schedule().statistics().await.unwrap();
        assert_eq!(stats.clients, 1);
        assert_eq!(stats.total_appointments, 5);
        assert_eq!(stats.confirmed, 4);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.upcoming, 3);
        assert_eq!(stats.top_service, Some(("Маникюр".to_string(), 3)));
    }
}
