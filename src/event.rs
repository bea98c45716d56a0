use crate::{Expander, RecurrenceRule, Result, SystemClock};
use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;

/// A calendar event, optionally recurring.
///
/// Events are values: the expander never mutates one, it derives new events
/// with [`Event::rescheduled`], [`Event::with_rule`] and [`Event::without_rule`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    start: DateTime<Tz>,
    end: Option<DateTime<Tz>>,
    rule: Option<RecurrenceRule>,
}

impl Event {
    pub fn new(start: DateTime<Tz>) -> Self {
        Event {
            start,
            end: None,
            rule: None,
        }
    }

    pub fn with_end(mut self, end: DateTime<Tz>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_rule(mut self, rule: RecurrenceRule) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn without_rule(mut self) -> Self {
        self.rule = None;
        self
    }

    /// Copy of the event moved to `start`, keeping its duration.
    pub fn rescheduled(&self, start: DateTime<Tz>) -> Self {
        Event {
            start,
            end: self.duration().map(|duration| start + duration),
            rule: self.rule.clone(),
        }
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Tz>> {
        self.end
    }

    pub fn rule(&self) -> Option<&RecurrenceRule> {
        self.rule.as_ref()
    }

    pub fn duration(&self) -> Option<TimeDelta> {
        self.end.map(|end| end - self.start)
    }

    pub fn is_recurring(&self) -> bool {
        self.rule.is_some()
    }

    /// Every occurrence of this event, bounded only by its rule.
    pub fn occurrences(&self) -> Result<Vec<Event>> {
        Expander::<SystemClock>::default().all(std::slice::from_ref(self))
    }

    /// Occurrences of this event starting at or before `horizon`.
    pub fn occurrences_before(&self, horizon: DateTime<Tz>) -> Result<Vec<Event>> {
        Expander::<SystemClock>::default()
            .occurrences_before(std::slice::from_ref(self), horizon)
    }
}
