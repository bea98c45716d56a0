use crate::{calendar, Frequency, Result};
use chrono::DateTime;
use chrono_tz::Tz;

#[derive(Clone, Copy, Debug)]
pub enum Limit {
    /// Stop at the first start past this instant; a start equal to it is the last one.
    Until(DateTime<Tz>),
    /// Yield this many more starts, dropping any past `horizon`.
    Count {
        remaining: u32,
        horizon: DateTime<Tz>,
    },
}

/// Timezone aware iterator over the starts following an anchor.
///
/// Each start is the previous one shifted by one interval, so a monthly
/// series from the 31st follows chrono's clamping and drifts: Jan 31,
/// Feb 29, Mar 29.
pub struct TzDateIterator {
    cursor: DateTime<Tz>,
    frequency: Frequency,
    interval: u32,
    limit: Limit,
    done: bool,
}

impl TzDateIterator {
    pub fn new(anchor: DateTime<Tz>, frequency: Frequency, interval: u32, limit: Limit) -> Self {
        TzDateIterator {
            cursor: anchor,
            frequency,
            interval,
            limit,
            done: false,
        }
    }
}

impl Iterator for TzDateIterator {
    type Item = Result<DateTime<Tz>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Limit::Count { remaining: 0, .. } = self.limit {
            return None;
        }

        let next = match calendar::shift(self.cursor, self.frequency, self.interval) {
            Ok(next) => next,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        self.cursor = next;

        match self.limit {
            Limit::Until(until) if next < until => Some(Ok(next)),
            Limit::Until(until) if next == until => {
                self.done = true;
                Some(Ok(next))
            }
            Limit::Count { horizon, .. } if next > horizon => {
                self.done = true;
                None
            }
            Limit::Count {
                ref mut remaining, ..
            } => {
                *remaining -= 1;
                Some(Ok(next))
            }
            Limit::Until(_) => {
                self.done = true;
                None
            }
        }
    }
}
