use chrono::{DateTime, Local, NaiveDate, Utc};

/// Represents an entity responsible for providing dates across the
/// application. This allows tests to pin the calendar instead of depending on
/// the wall clock.
pub trait Clock: Sync + Send + 'static {
    fn now(&self) -> DateTime<Utc>;

    /// The local device's current calendar day. Day boundaries follow the
    /// device's wall clock, not UTC.
    fn today(&self) -> NaiveDate;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
