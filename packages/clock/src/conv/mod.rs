//! Conversions between clock timestamps and calendar dates.
use chrono::{DateTime, Utc};
use swarm_tracker_primitives::DurationSinceUnixEpoch;

/// It converts a timestamp to a `DateTime::<Utc>`.
///
/// Returns `None` when the timestamp does not fit in the calendar range of
/// `chrono` (about 262 000 years after the epoch).
#[must_use]
pub fn convert_from_timestamp_to_datetime_utc(duration: DurationSinceUnixEpoch) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(duration.as_secs()).ok()?;
    DateTime::from_timestamp(secs, duration.subsec_nanos())
}

/// It renders a timestamp as an RFC 3339 date with millisecond precision,
/// for example `1970-01-01T00:00:00.000Z`.
#[must_use]
pub fn convert_from_timestamp_to_rfc_3339(duration: DurationSinceUnixEpoch) -> Option<String> {
    convert_from_timestamp_to_datetime_utc(duration).map(|datetime| datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}
