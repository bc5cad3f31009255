//! Date formatting helpers shared by every JSON mapping.

use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Formats a UTC timestamp the way the REST surface exposes dates.
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.format(DATE_FORMAT).to_string()
}
