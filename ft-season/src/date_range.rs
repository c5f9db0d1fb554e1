use chrono::{NaiveDate, TimeDelta};
use std::mem::replace;

/// A date range iterator that yields each date from the start date
/// through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            // stepping past NaiveDate::MAX ends the range instead of overflowing
            let next = match self.0.checked_add_signed(TimeDelta::days(1)) {
                Some(next) => next,
                None => {
                    let last = self.0;
                    self.1 = NaiveDate::MIN;
                    self.0 = NaiveDate::MAX;
                    return Some(last);
                }
            };
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}
