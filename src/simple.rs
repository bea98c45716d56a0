//! Expansion of rules without `by_*` constraints by repeated interval shifts.

use crate::{
    tz_date_iterator::{Limit, TzDateIterator},
    Event, RecurrenceRule, Result,
};
use chrono::DateTime;
use chrono_tz::Tz;

/// Occurrences following `event` up to `until`, cut at `horizon`.
///
/// A shifted start equal to the bound is the last one returned. The anchor
/// itself is not part of the result.
pub fn expand_until(
    event: &Event,
    rule: &RecurrenceRule,
    until: DateTime<Tz>,
    horizon: DateTime<Tz>,
) -> Result<Vec<Event>> {
    let bound = until.min(horizon);
    shifted(event, rule, Limit::Until(bound))
}

/// The `count - 1` occurrences following `event`, fewer if they pass `horizon`.
///
/// The anchor is the first of `count` and is not part of the result.
pub fn expand_count(
    event: &Event,
    rule: &RecurrenceRule,
    count: u32,
    horizon: DateTime<Tz>,
) -> Result<Vec<Event>> {
    let limit = Limit::Count {
        remaining: count.saturating_sub(1),
        horizon,
    };
    shifted(event, rule, limit)
}

fn shifted(event: &Event, rule: &RecurrenceRule, limit: Limit) -> Result<Vec<Event>> {
    TzDateIterator::new(event.start(), rule.frequency(), rule.interval(), limit)
        .map(|start| start.map(|start| event.rescheduled(start)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_helpers::*, Frequency};

    fn daily() -> RecurrenceRule {
        RecurrenceRule::new(Frequency::Daily)
    }

    #[test]
    fn until_excludes_anchor() {
        let event = Event::new(june_sixth());
        let far = utc(2030, 1, 1, 0, 0, 0);

        let events = expand_until(&event, &daily(), june_sixth() + ONE_DAY * 2, far).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].start(), june_sixth() + ONE_DAY);
        assert_eq!(events[1].start(), june_sixth() + ONE_DAY * 2);
    }

    #[test]
    fn until_bounded_by_horizon() {
        let event = Event::new(june_sixth());
        let until = utc(2030, 1, 1, 0, 0, 0);

        let events = expand_until(&event, &daily(), until, june_sixth() + ONE_DAY * 5).unwrap();

        assert_eq!(events.len(), 5);
        assert_eq!(events.last().unwrap().start(), june_sixth() + ONE_DAY * 5);
    }

    #[test]
    fn until_largest_aligned_time() {
        let event = Event::new(june_sixth());
        let until = utc(2016, 7, 7, 7, 7, 7);

        let events = expand_until(&event, &daily(), until, utc(2030, 1, 1, 0, 0, 0)).unwrap();

        assert_eq!(events.len(), 31);
        assert_eq!(events.last().unwrap().start(), utc(2016, 7, 7, 6, 6, 6));
    }

    #[test]
    fn count_preserves_duration() {
        let event = Event::new(june_sixth()).with_end(june_sixth() + ONE_HOUR);
        let rule = daily().with_interval(2);

        let events = expand_count(&event, &rule, 3, utc(2030, 1, 1, 0, 0, 0)).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].start(), june_sixth() + ONE_DAY * 4);
        assert_eq!(events[1].end(), Some(june_sixth() + ONE_DAY * 4 + ONE_HOUR));
    }

    #[test]
    fn count_of_one_is_only_the_anchor() {
        let event = Event::new(june_sixth());
        let events = expand_count(&event, &daily(), 1, utc(2030, 1, 1, 0, 0, 0)).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn count_stops_at_horizon() {
        let event = Event::new(june_sixth());

        let events = expand_count(&event, &daily(), 100, june_sixth() + ONE_DAY * 3).unwrap();

        assert_eq!(events.len(), 3);
    }
}
