//! Calendar arithmetic on zoned timestamps.
//!
//! Day, week, month and year shifts move the local wall time and are then
//! resolved back into the zone, so a daily event at 23:00 stays at 23:00
//! across a DST change. Sub-day shifts are plain durations.

use crate::{Error, Frequency, Result};
use chrono::{
    offset::LocalResult, DateTime, Datelike as _, Days, Months, NaiveDate, NaiveDateTime,
    Offset as _, TimeDelta, TimeZone as _, Weekday,
};
use chrono_tz::Tz;

/// `start` moved forward by `amount` units of `frequency`.
pub(crate) fn shift(
    start: DateTime<Tz>,
    frequency: Frequency,
    amount: u32,
) -> Result<DateTime<Tz>> {
    let out_of_range = || Error::DateOutOfRange {
        start,
        frequency,
        amount,
    };
    let local = start.naive_local();
    let amount64 = i64::from(amount);

    let shifted = match frequency {
        Frequency::Secondly => TimeDelta::try_seconds(amount64)
            .and_then(|delta| start.checked_add_signed(delta)),
        Frequency::Minutely => TimeDelta::try_minutes(amount64)
            .and_then(|delta| start.checked_add_signed(delta)),
        Frequency::Hourly => TimeDelta::try_hours(amount64)
            .and_then(|delta| start.checked_add_signed(delta)),
        Frequency::Daily => local
            .checked_add_days(Days::new(u64::from(amount)))
            .map(|naive| localize(start, naive)),
        Frequency::Weekly => local
            .checked_add_days(Days::new(7 * u64::from(amount)))
            .map(|naive| localize(start, naive)),
        Frequency::Monthly => local
            .checked_add_months(Months::new(amount))
            .map(|naive| localize(start, naive)),
        Frequency::Yearly => amount
            .checked_mul(12)
            .and_then(|months| local.checked_add_months(Months::new(months)))
            .map(|naive| localize(start, naive)),
    };

    shifted.ok_or_else(out_of_range)
}

/// First date on or after `date` falling on `weekday`.
pub(crate) fn next_occurrence_of(weekday: Weekday, date: NaiveDate) -> Option<NaiveDate> {
    let mut date = date;
    while date.weekday() != weekday {
        date = date.succ_opt()?;
    }
    Some(date)
}

/// `start` with its local date replaced by `date`, same wall time.
pub(crate) fn on_date(start: DateTime<Tz>, date: NaiveDate) -> DateTime<Tz> {
    localize(start, date.and_time(start.naive_local().time()))
}

/// `start` with its local day of month replaced by `day`.
pub(crate) fn with_day_of_month(start: DateTime<Tz>, day: u32) -> Result<DateTime<Tz>> {
    start
        .naive_local()
        .with_day(day)
        .map(|naive| localize(start, naive))
        .ok_or(Error::NonexistentDay { day, anchor: start })
}

/// Resolves a local wall time in the zone of `reference`.
///
/// Ambiguous times take the earlier instant. Times skipped by a DST gap keep
/// the UTC offset of `reference`.
fn localize(reference: DateTime<Tz>, naive: NaiveDateTime) -> DateTime<Tz> {
    let tz = reference.timezone();
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let offset = reference.offset().fix().local_minus_utc();
            let offset = TimeDelta::seconds(i64::from(offset));
            tz.from_utc_datetime(&(naive - offset))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use chrono::TimeZone as _;
    use chrono_tz::US::Eastern;

    #[test]
    fn sub_day_shifts() {
        let start = utc(2016, 6, 6, 6, 6, 6);

        assert_eq!(shift(start, Frequency::Secondly, 30).unwrap(), utc(2016, 6, 6, 6, 6, 36));
        assert_eq!(shift(start, Frequency::Minutely, 60).unwrap(), utc(2016, 6, 6, 7, 6, 6));
        assert_eq!(shift(start, Frequency::Hourly, 18).unwrap(), utc(2016, 6, 7, 0, 6, 6));
    }

    #[test]
    fn calendar_shifts() {
        let start = utc(2016, 6, 6, 6, 6, 6);

        assert_eq!(shift(start, Frequency::Daily, 25).unwrap(), utc(2016, 7, 1, 6, 6, 6));
        assert_eq!(shift(start, Frequency::Weekly, 2).unwrap(), utc(2016, 6, 20, 6, 6, 6));
        assert_eq!(shift(start, Frequency::Monthly, 7).unwrap(), utc(2017, 1, 6, 6, 6, 6));
        assert_eq!(shift(start, Frequency::Yearly, 1).unwrap(), utc(2017, 6, 6, 6, 6, 6));
    }

    #[test]
    fn month_end_clamps() {
        let start = utc(2016, 1, 31, 9, 0, 0);

        assert_eq!(shift(start, Frequency::Monthly, 1).unwrap(), utc(2016, 2, 29, 9, 0, 0));
        assert_eq!(shift(start, Frequency::Monthly, 2).unwrap(), utc(2016, 3, 31, 9, 0, 0));
    }

    #[test]
    fn daily_across_dst_end() {
        let last_day_of_dst = Eastern.with_ymd_and_hms(2019, 11, 2, 23, 0, 0).unwrap();

        let next = shift(last_day_of_dst, Frequency::Daily, 1).unwrap();

        assert_eq!(next, Eastern.with_ymd_and_hms(2019, 11, 3, 23, 0, 0).unwrap());
        // 25 hours
        assert_eq!(next - last_day_of_dst, TimeDelta::hours(25));
    }

    #[test]
    fn hourly_across_dst_end_is_absolute() {
        let before = Eastern.with_ymd_and_hms(2019, 11, 3, 0, 30, 0).unwrap();
        let next = shift(before, Frequency::Hourly, 2).unwrap();
        assert_eq!(next - before, TimeDelta::hours(2));
    }

    #[test]
    fn daily_into_dst_gap_keeps_offset() {
        // 02:30 does not exist on 2019-03-10 in US/Eastern
        let start = Eastern.with_ymd_and_hms(2019, 3, 9, 2, 30, 0).unwrap();

        let next = shift(start, Frequency::Daily, 1).unwrap();

        assert_eq!(next - start, TimeDelta::hours(24));
    }

    #[test]
    fn next_weekday_is_inclusive() {
        // a thursday
        let date = NaiveDate::from_ymd_opt(2015, 12, 24).unwrap();

        assert_eq!(next_occurrence_of(Weekday::Thu, date), Some(date));
        assert_eq!(
            next_occurrence_of(Weekday::Mon, date),
            NaiveDate::from_ymd_opt(2015, 12, 28)
        );
        assert_eq!(
            next_occurrence_of(Weekday::Wed, date),
            NaiveDate::from_ymd_opt(2015, 12, 30)
        );
    }

    #[test]
    fn on_date_keeps_wall_time() {
        let start = Eastern.with_ymd_and_hms(2019, 11, 1, 9, 0, 0).unwrap();
        let moved = on_date(start, NaiveDate::from_ymd_opt(2019, 11, 4).unwrap());
        assert_eq!(moved, Eastern.with_ymd_and_hms(2019, 11, 4, 9, 0, 0).unwrap());
    }

    #[test]
    fn day_of_month() {
        let start = utc(2016, 6, 6, 6, 6, 6);

        assert_eq!(with_day_of_month(start, 8).unwrap(), utc(2016, 6, 8, 6, 6, 6));
        assert_eq!(
            with_day_of_month(start, 31),
            Err(Error::NonexistentDay {
                day: 31,
                anchor: start
            })
        );
    }
}
