use chrono::{DateTime, Utc};

pub fn unix_millis(dt: DateTime<Utc>) -> u64 {
    dt.timestamp_millis().max(0) as u64
}

/// Time-based identifier that never collides with `existing_max`.
pub fn next_time_id(existing_max: u64) -> u64 {
    unix_millis(Utc::now()).max(existing_max.saturating_add(1))
}
