use crate::{
    compound, rrule::Constraint, set, simple, End, Error, Event, RecurrenceRule, Result,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Source of the default horizon.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Options<C> {
    pub clock: Option<C>,
}

/// Expands recurring events into their occurrences.
#[derive(Clone, Debug, Default)]
pub struct Expander<C = SystemClock> {
    clock: C,
}

/// How one event is expanded, resolved once from the fields it sets.
#[derive(Clone, Copy)]
enum Shape<'a> {
    Single,
    Count {
        rule: &'a RecurrenceRule,
        count: u32,
    },
    Until {
        rule: &'a RecurrenceRule,
        until: DateTime<Tz>,
    },
}

impl<'a> Shape<'a> {
    fn of(event: &'a Event) -> Result<Self> {
        let rule = match event.rule() {
            None => return Ok(Shape::Single),
            Some(rule) => rule,
        };

        match rule.end() {
            End::Count(count) => Ok(Shape::Count { rule, count }),
            End::Until(until) => Ok(Shape::Until { rule, until }),
            End::Never => Err(Error::InvalidBound),
        }
    }
}

impl<C: Clock + Default> Expander<C> {
    pub fn new(options: Options<C>) -> Self {
        Expander {
            clock: options.clock.unwrap_or_default(),
        }
    }
}

impl<C: Clock> Expander<C> {
    pub fn with_clock(clock: C) -> Self {
        Expander { clock }
    }

    /// The instant used as horizon when none is given.
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&Tz::UTC)
    }

    /// Every occurrence of `events`, bounded only by their own rules.
    pub fn all(&self, events: &[Event]) -> Result<Vec<Event>> {
        let unbounded = DateTime::<Utc>::MAX_UTC.with_timezone(&Tz::UTC);
        self.occurrences_before(events, unbounded)
    }

    /// Occurrences of `events` up to now.
    pub fn occurrences(&self, events: &[Event]) -> Result<Vec<Event>> {
        self.occurrences_before(events, self.now())
    }

    /// Occurrences of `events` starting at or before `horizon`, sorted by start.
    ///
    /// Non-recurring events pass through as a single occurrence.
    #[tracing::instrument(level = "debug", skip(self, events), fields(events = events.len()))]
    pub fn occurrences_before(
        &self,
        events: &[Event],
        horizon: DateTime<Tz>,
    ) -> Result<Vec<Event>> {
        let timelines = events
            .iter()
            .map(|event| self.timeline(event, horizon))
            .collect::<Result<Vec<_>>>()?;

        let occurrences = set::merge(timelines);
        tracing::debug!(occurrences = occurrences.len(), "expanded events");
        Ok(occurrences)
    }

    /// Occurrences of `events` starting within `[after, horizon]`, sorted by start.
    pub fn occurrences_between(
        &self,
        events: &[Event],
        after: DateTime<Tz>,
        horizon: DateTime<Tz>,
    ) -> Result<Vec<Event>> {
        let mut occurrences = self.occurrences_before(events, horizon)?;
        occurrences.retain(|e| e.start() >= after);
        Ok(occurrences)
    }

    /// Sorted occurrences of one event, its anchor included, none past `horizon`.
    fn timeline(&self, event: &Event, horizon: DateTime<Tz>) -> Result<Vec<Event>> {
        let shape = Shape::of(event)?;
        let rule = match shape {
            Shape::Single if event.start() > horizon => return Ok(Vec::new()),
            Shape::Single => return Ok(vec![event.clone()]),
            Shape::Until { rule, .. } | Shape::Count { rule, .. } => rule,
        };

        let mut timeline = match rule.constraint()? {
            // derived anchors may start before this one; they are filtered on their own
            Some(constraint) => self.decomposed(event, rule, constraint, horizon)?,
            None if event.start() > horizon => Vec::new(),
            None => {
                let mut timeline = vec![event.clone()];
                match shape {
                    Shape::Until { until, .. } => {
                        timeline.extend(simple::expand_until(event, rule, until, horizon)?)
                    }
                    Shape::Count { count, .. } => {
                        timeline.extend(simple::expand_count(event, rule, count, horizon)?)
                    }
                    Shape::Single => {}
                }
                timeline
            }
        };

        if let Shape::Count { count, .. } = shape {
            // decomposition over-generates; drop the latest ones
            timeline.truncate(usize::try_from(count).unwrap_or(usize::MAX));
        }
        Ok(timeline)
    }

    fn decomposed(
        &self,
        event: &Event,
        rule: &RecurrenceRule,
        constraint: Constraint<'_>,
        horizon: DateTime<Tz>,
    ) -> Result<Vec<Event>> {
        let derived = compound::decompose(event, rule, constraint)?;
        self.occurrences_before(&derived, horizon)
    }
}

/// Occurrences of `events` up to now.
pub fn occurrences(events: &[Event]) -> Result<Vec<Event>> {
    Expander::<SystemClock>::default().occurrences(events)
}

/// Occurrences of `events` starting at or before `horizon`, sorted by start.
pub fn occurrences_before(events: &[Event], horizon: DateTime<Tz>) -> Result<Vec<Event>> {
    Expander::<SystemClock>::default().occurrences_before(events, horizon)
}
