use chrono::{DateTime, TimeDelta, TimeZone as _};
use chrono_tz::Tz;

pub const ONE_HOUR: TimeDelta = TimeDelta::hours(1);
pub const ONE_DAY: TimeDelta = TimeDelta::days(1);
pub const ONE_WEEK: TimeDelta = TimeDelta::weeks(1);

pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Tz> {
    Tz::UTC
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// 2016-06-06T06:06:06Z, a monday
pub fn june_sixth() -> DateTime<Tz> {
    utc(2016, 6, 6, 6, 6, 6)
}
