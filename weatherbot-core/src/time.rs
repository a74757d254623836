use chrono::{DateTime, Utc};

/// Render `timestamp + offset` (both in seconds) as `YYYY-MM-DD HH:MM` in UTC.
///
/// The offset is plain arithmetic on the epoch value; no zone rules are
/// consulted. Sums chrono cannot represent fall back to the raw seconds.
pub fn format_time(timestamp: i64, offset: i64) -> String {
    let shifted = timestamp.saturating_add(offset);

    match DateTime::<Utc>::from_timestamp(shifted, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => shifted.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOV_14_2023_2213: i64 = 1_700_000_000;

    #[test]
    fn epoch_without_offset() {
        assert_eq!(format_time(0, 0), "1970-01-01 00:00");
        assert_eq!(format_time(NOV_14_2023_2213, 0), "2023-11-14 22:13");
    }

    #[test]
    fn offset_is_added_before_formatting() {
        assert_eq!(format_time(NOV_14_2023_2213, 3600), "2023-11-14 23:13");
        assert_eq!(format_time(NOV_14_2023_2213, -5 * 3600), "2023-11-14 17:13");
    }

    #[test]
    fn offset_can_roll_the_date_over() {
        assert_eq!(format_time(NOV_14_2023_2213, 2 * 3600), "2023-11-15 00:13");
        assert_eq!(format_time(60, -120), "1969-12-31 23:59");
    }

    #[test]
    fn one_day_later_keeps_time_of_day() {
        for (ts, offset) in [(0, 0), (NOV_14_2023_2213, 19_800), (1_234_567_890, -36_000)] {
            let today = format_time(ts, offset);
            let tomorrow = format_time(ts + 86_400, offset);

            assert_eq!(today[11..], tomorrow[11..]);
            assert_ne!(today[..10], tomorrow[..10]);
        }
        assert_eq!(format_time(NOV_14_2023_2213 + 86_400, 0), "2023-11-15 22:13");
    }

    #[test]
    fn formatting_is_deterministic() {
        assert_eq!(format_time(1_234_567_890, 3600), format_time(1_234_567_890, 3600));
    }

    #[test]
    fn unrepresentable_instant_falls_back_to_seconds() {
        assert_eq!(format_time(i64::MAX, 1), i64::MAX.to_string());
    }
}
