use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;

use crate::Frequency;

/// Rule shapes the expander refuses to approximate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedShape {
    #[error("unsupported recurrence pattern: by_month_day = {0} (negative offsets)")]
    NegativeMonthDay(i32),

    #[error("complex rule pattern not supported yet: by_day combined with by_month_day")]
    ByDayWithByMonthDay,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    UnsupportedRuleShape(#[from] UnsupportedShape),

    #[error("recurrence rule has neither a count nor an until bound")]
    InvalidBound,

    #[error("recurrence interval must be positive")]
    InvalidInterval,

    #[error("date out of range shifting {start} by {amount} {frequency}")]
    DateOutOfRange {
        start: DateTime<Tz>,
        frequency: Frequency,
        amount: u32,
    },

    #[error("day {day} does not exist in the month of {anchor}")]
    NonexistentDay { day: u32, anchor: DateTime<Tz> },
}

pub type Result<T> = std::result::Result<T, Error>;
