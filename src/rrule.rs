use crate::{error::UnsupportedShape, Error, Result};
use chrono::{DateTime, Weekday};
use chrono_tz::Tz;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Secondly => "SECONDLY",
            Frequency::Minutely => "MINUTELY",
            Frequency::Hourly => "HOURLY",
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        };
        f.write_str(name)
    }
}

/// How a recurrence is bounded. Count and until are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum End {
    /// Total number of occurrences, the anchor included.
    Count(u32),
    /// Last instant an occurrence may start at (inclusive).
    Until(DateTime<Tz>),
    #[default]
    Never,
}

/// The single `by_*` dimension constraining a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Constraint<'a> {
    Weekdays(&'a [Weekday]),
    MonthDays(&'a [i32]),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: Option<u32>,
    end: End,
    by_day: Vec<Weekday>,
    by_month_day: Vec<i32>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        RecurrenceRule {
            frequency,
            interval: None,
            end: End::Never,
            by_day: Vec::new(),
            by_month_day: Vec::new(),
        }
    }

    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Bounds the rule by a count, replacing any until bound.
    pub fn with_count(mut self, count: u32) -> Self {
        self.end = End::Count(count);
        self
    }

    /// Bounds the rule by an until instant, replacing any count bound.
    pub fn with_until(mut self, until: DateTime<Tz>) -> Self {
        self.end = End::Until(until);
        self
    }

    pub fn with_by_day(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.by_day = days.into_iter().collect();
        self
    }

    pub fn with_by_month_day(mut self, days: impl IntoIterator<Item = i32>) -> Self {
        self.by_month_day = days.into_iter().collect();
        self
    }

    /// Copy of the rule with both `by_*` constraints cleared.
    pub(crate) fn unconstrained(&self) -> Self {
        RecurrenceRule {
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            ..self.clone()
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn interval(&self) -> u32 {
        self.interval.unwrap_or(1)
    }

    pub fn end(&self) -> End {
        self.end
    }

    pub fn by_day(&self) -> &[Weekday] {
        &self.by_day
    }

    pub fn by_month_day(&self) -> &[i32] {
        &self.by_month_day
    }

    /// Whether any `by_*` constraint is present. A single value counts.
    pub fn is_compound(&self) -> bool {
        !self.by_day.is_empty() || !self.by_month_day.is_empty()
    }

    /// Checks the rule can drive expansion and returns its `by_*` constraint, if any.
    pub(crate) fn constraint(&self) -> Result<Option<Constraint<'_>>> {
        if self.interval() == 0 {
            return Err(Error::InvalidInterval);
        }

        match (self.by_day.is_empty(), self.by_month_day.is_empty()) {
            (true, true) => Ok(None),
            (false, true) => Ok(Some(Constraint::Weekdays(&self.by_day))),
            (true, false) => match self.by_month_day.iter().find(|&&day| day < 0) {
                Some(&day) => Err(UnsupportedShape::NegativeMonthDay(day).into()),
                None => Ok(Some(Constraint::MonthDays(&self.by_month_day))),
            },
            (false, false) => Err(UnsupportedShape::ByDayWithByMonthDay.into()),
        }
    }
}
