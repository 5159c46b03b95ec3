//! Lookback window policy
//!
//! The window starts at local midnight `days` calendar days before `now` and
//! extends up to `now`. The boundary is inclusive. Comparisons happen on
//! instants, so events recorded in UTC are judged against the local day.

use chrono::{DateTime, Days, Duration, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// How far back the report looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LookbackWindow {
    /// Calendar days before today; 0 means "since midnight today"
    pub days: u32,
}

impl LookbackWindow {
    pub fn new(days: u32) -> Self {
        Self { days }
    }

    /// Start of the window for the given local `now`.
    ///
    /// Saturates at the earliest representable instant when `days` reaches
    /// past the calendar range.
    pub fn cutoff<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Utc> {
        let Some(day) = now
            .date_naive()
            .checked_sub_days(Days::new(u64::from(self.days)))
        else {
            return DateTime::<Utc>::MIN_UTC;
        };
        let midnight = day.and_time(NaiveTime::MIN);

        if let Some(start) = now.timezone().from_local_datetime(&midnight).earliest() {
            return start.with_timezone(&Utc);
        }

        // Midnight skipped by a DST jump, or out of range for the offset;
        // fall back to the current offset
        let offset = now.offset().fix().local_minus_utc();
        midnight
            .checked_sub_signed(Duration::seconds(i64::from(offset)))
            .map(|utc| Utc.from_utc_datetime(&utc))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether `target` falls inside the window ending at `now`
    pub fn contains<Tz: TimeZone>(&self, now: &DateTime<Tz>, target: &DateTime<Utc>) -> bool {
        *target >= self.cutoff(now)
    }
}
