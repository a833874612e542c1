//! Clock port
//!
//! Every date-relative rule ("today", "yesterday", days left) reads the
//! current time through this trait so tests can pin it.

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current wall clock time in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real system clock implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a settable instant
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fieldpulse_core::{Clock, FixedClock};
///
/// let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 26).unwrap());
/// assert_eq!(clock.today().to_string(), "2024-03-26");
///
/// clock.advance_days(1);
/// assert_eq!(clock.today().to_string(), "2024-03-27");
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock frozen at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: RwLock::new(now) }
    }

    /// Clock set to 09:00 UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        let at = date.and_hms_opt(9, 0, 0).unwrap_or_default().and_utc();
        Self::new(at)
    }

    /// Move the clock to `now`
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write() = now;
    }

    /// Move the clock forward by whole days
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.write();
        *now += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
