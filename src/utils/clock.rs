//! Wall clock abstraction
//!
//! "Today" drives the calendar, slot filtering, master listings and the
//! reminder job, so it is read through [`Clock`] instead of calling
//! `chrono::Local` directly.

use chrono::{Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};

pub trait Clock: Send + Sync {
    /// Current wall clock time in the salon's timezone
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn tomorrow(&self) -> NaiveDate {
        self.today() + Duration::days(1)
    }
}

/// Real time, either server local or a fixed UTC offset
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    pub fn new(utc_offset_minutes: Option<i32>) -> Self {
        Self {
            offset: utc_offset_minutes.and_then(|minutes| FixedOffset::east_opt(minutes * 60)),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// Clock frozen at a given moment
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_dates() {
        let now = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap().and_hms_opt(10, 0, 0).unwrap();
        let clock = FixedClock(now);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        assert_eq!(clock.tomorrow(), NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }

    #[test]
    fn test_system_clock_with_offset() {
        let utc_now = Utc::now().naive_utc();
        let shifted = SystemClock::new(Some(180)).now();
        let delta = shifted - utc_now;
        assert!((delta - Duration::minutes(180)).num_seconds().abs() < 5);
    }
}
