//! Civil-date utilities
//!
//! All business dates in the system are civil dates in WIB (UTC+7),
//! midnight-to-midnight, regardless of where the server runs. Raw timestamp
//! arithmetic is never used for overdue detection or fine computation.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Seconds east of UTC for WIB (Waktu Indonesia Barat)
const WIB_OFFSET_SECS: i32 = 7 * 3600;

/// The fixed civil timezone (UTC+7)
pub fn wib() -> FixedOffset {
    // Offset is in range, so this cannot fail
    FixedOffset::east_opt(WIB_OFFSET_SECS).unwrap()
}

/// Project an instant onto its WIB civil date
pub fn civil_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&wib()).date_naive()
}

/// Whole civil days `today` is past `due`; zero on or before the due date
pub fn days_late(today: NaiveDate, due: NaiveDate) -> i64 {
    (today - due).num_days().max(0)
}

/// Source of "today", injected so tests can fix the date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock backed clock used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        civil_date(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn civil_date_rolls_over_at_wib_midnight() {
        // 17:30 UTC is 00:30 the next day in WIB
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 17, 30, 0).unwrap();
        assert_eq!(civil_date(instant), NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());

        // 16:30 UTC is still 23:30 the same day in WIB
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 16, 30, 0).unwrap();
        assert_eq!(civil_date(instant), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn days_late_is_zero_on_or_before_due() {
        let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(days_late(due, due), 0);
        assert_eq!(days_late(due.pred_opt().unwrap(), due), 0);
    }

    #[test]
    fn days_late_counts_whole_days() {
        let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(days_late(today, due), 4);
    }
}
