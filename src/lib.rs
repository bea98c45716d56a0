//! Expansion of recurring calendar events into their concrete occurrences.
//!
//! ```
//! use chrono::TimeZone as _;
//! use chrono_tz::Tz;
//! use occurrences::{Event, Frequency, RecurrenceRule};
//!
//! let start = Tz::UTC.with_ymd_and_hms(2016, 6, 6, 6, 6, 6).unwrap();
//! let event = Event::new(start).with_rule(RecurrenceRule::new(Frequency::Daily).with_count(2));
//!
//! assert_eq!(event.occurrences().unwrap().len(), 2);
//! ```

mod calendar;
mod compound;
mod error;
mod event;
mod expander;
mod rrule;
mod set;
mod simple;
mod tz_date_iterator;

#[cfg(test)]
mod test_helpers;

pub use error::{Error, Result, UnsupportedShape};
pub use event::Event;
pub use expander::{
    occurrences, occurrences_before, Clock, Expander, FixedClock, Options, SystemClock,
};
pub use rrule::{End, Frequency, RecurrenceRule};
pub use simple::{expand_count, expand_until};
