use chrono::{Local, NaiveDateTime};

/// Wall clock in the server's local time zone; sessions and report dates are
/// local calendar concepts.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
