use chrono::{DateTime, Duration, Local, TimeZone, Utc};

/// Midnight of the calendar day containing `now`, in `now`'s time zone.
///
/// On a day where midnight does not exist (DST jump), the earliest valid
/// instant of that day is used; if none can be resolved, `now` itself.
pub fn start_of_day_in<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let date = now.date_naive();

    date.and_hms_opt(0, 0, 0)
        .and_then(|midnight| tz.from_local_datetime(&midnight).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc))
}

/// Midnight of the local calendar day containing `instant`.
pub fn start_of_local_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day_in(&instant.with_timezone(&Local))
}

/// Half-open `[start, end)` window of the local day containing `instant`.
pub fn local_day_window(instant: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_local_day(instant);
    let next_day = instant.with_timezone(&Local) + Duration::days(1);
    let end = start_of_day_in(&next_day);
    (start, end)
}
