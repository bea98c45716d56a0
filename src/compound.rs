//! Decomposition of rules constrained by `by_day` or `by_month_day`.
//!
//! A rule with N constrained values becomes N unconstrained sub-timelines,
//! one per value, each anchored on the first date matching its value. The
//! expander re-expands them and merges the results.

use crate::{
    calendar, rrule::Constraint, End, Error, Event, Frequency, RecurrenceRule, Result,
};
use chrono::{Datelike as _, Weekday};

/// Derived anchor events for `event`, whose `rule` is constrained by `constraint`.
///
/// When the anchor itself does not match any constrained value it is kept as
/// a single, non-recurring occurrence.
pub(crate) fn decompose(
    event: &Event,
    rule: &RecurrenceRule,
    constraint: Constraint<'_>,
) -> Result<Vec<Event>> {
    let mut derived = match constraint {
        Constraint::Weekdays(days) => by_day(event, rule, &distinct(days))?,
        Constraint::MonthDays(days) => by_month_day(event, rule, &distinct(days))?,
    };

    if let End::Until(until) = rule.end() {
        derived.retain(|e| !e.is_recurring() || e.start() <= until);
    }

    tracing::debug!(
        ?constraint,
        timelines = derived.iter().filter(|e| e.is_recurring()).count(),
        "decomposed compound rule"
    );
    Ok(derived)
}

fn by_day(event: &Event, rule: &RecurrenceRule, days: &[Weekday]) -> Result<Vec<Event>> {
    let base = base_rule(rule, days.len());
    let start = event.start();
    let weekday = start.weekday();

    let mut derived = Vec::with_capacity(days.len() + 1);
    for &day in days {
        let anchor = if day == weekday {
            event.clone()
        } else {
            let date = calendar::next_occurrence_of(day, start.date_naive()).ok_or(
                Error::DateOutOfRange {
                    start,
                    frequency: Frequency::Daily,
                    amount: 6,
                },
            )?;
            event.rescheduled(calendar::on_date(start, date))
        };
        derived.push(anchor.with_rule(base.clone()));
    }

    if !days.contains(&weekday) {
        derived.push(event.clone().without_rule());
    }
    Ok(derived)
}

fn by_month_day(event: &Event, rule: &RecurrenceRule, days: &[i32]) -> Result<Vec<Event>> {
    let base = base_rule(rule, days.len());
    let start = event.start();

    let mut derived = Vec::with_capacity(days.len() + 1);
    for &day in days {
        // negatives are rejected by `RecurrenceRule::constraint`
        let day = day.unsigned_abs();
        let anchor = event.rescheduled(calendar::with_day_of_month(start, day)?);
        derived.push(anchor.with_rule(base.clone()));
    }

    let own_day = start.day();
    if !days.iter().any(|&day| day.unsigned_abs() == own_day) {
        derived.push(event.clone().without_rule());
    }
    Ok(derived)
}

/// The rule each sub-timeline follows: unconstrained, with the count spread
/// over the timelines.
fn base_rule(rule: &RecurrenceRule, timelines: usize) -> RecurrenceRule {
    let base = rule.unconstrained();
    match rule.end() {
        End::Count(count) => base.with_count(count_per_timeline(count, timelines)),
        End::Until(_) | End::Never => base,
    }
}

/// Occurrences each sub-timeline contributes: its own anchor plus
/// `count / timelines - 1` shifts, with the division rounded up.
///
/// This only decides how much to over-generate. The expander truncates the
/// merged series to the exact count afterwards.
fn count_per_timeline(count: u32, timelines: usize) -> u32 {
    let timelines = u32::try_from(timelines).unwrap_or(u32::MAX).max(1);
    let shifts = count.div_ceil(timelines).saturating_sub(1);
    shifts + 1
}

fn distinct<T: PartialEq + Copy>(values: &[T]) -> Vec<T> {
    let mut distinct = Vec::with_capacity(values.len());
    for &value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    distinct
}
