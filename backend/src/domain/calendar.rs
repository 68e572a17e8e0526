use chrono::{Local, NaiveDate};

use super::models::Period;

/// Source of "today" for the current-month rules
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn current_period(&self) -> Period {
        Period::of_date(self.today())
    }
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Month;

    #[test]
    fn test_fixed_clock_period() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(clock.current_period(), Period::new(Month::December, 2024));
    }
}
