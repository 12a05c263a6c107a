use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// Derive inclusive `date_from`/`date_to` bounds from the `dateRange` and
/// `customDate` query parameters.
///
/// - `today`: start of the current UTC day to start of the next day.
/// - `week`: now minus 7 days to now.
/// - `month`: first of the current month (UTC midnight) to now.
/// - `custom`: `customDate` (`YYYY-MM-DD`) as a day, plus 24 hours.
///
/// Absent or unrecognized values disable date filtering, as does `custom`
/// without a parseable `customDate`.
pub fn resolve_range(
    date_range: Option<&str>,
    custom_date: Option<&str>,
    now: DateTime<Utc>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    match date_range {
        Some("today") => {
            let start = start_of_day(now.date_naive());
            (Some(start), Some(start + Duration::days(1)))
        }
        Some("week") => (Some(now - Duration::days(7)), Some(now)),
        Some("month") => {
            let first = now.date_naive().with_day(1).unwrap_or_else(|| now.date_naive());
            (Some(start_of_day(first)), Some(now))
        }
        Some("custom") => {
            match custom_date.and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()) {
                Some(day) => {
                    let start = start_of_day(day);
                    (Some(start), Some(start + Duration::days(1)))
                }
                None => (None, None),
            }
        }
        _ => (None, None),
    }
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}
