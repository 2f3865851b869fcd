//! Creation and modification stamps.
//!
//! Stamps are truncated to microseconds, the resolution PostgreSQL stores, so
//! a record read back from either backend compares equal to the one returned
//! on write.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use mockable::Clock;

/// Current instant at storage resolution.
pub fn now(clock: &dyn Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}

/// Modification stamp for a record last touched at `previous`.
///
/// Never returns an instant at or before `previous`, even when the clock
/// stands still or steps backwards.
pub fn refreshed(previous: DateTime<Utc>, clock: &dyn Clock) -> DateTime<Utc> {
    now(clock).max(previous + Duration::microseconds(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedClock;
    use chrono::TimeZone;

    #[test]
    fn now_truncates_to_microseconds() {
        let instant = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
            .single()
            .expect("valid instant")
            + Duration::nanoseconds(1_234_567);
        let stamp = now(&FixedClock::at(instant));
        assert_eq!(stamp.timestamp_subsec_nanos(), 1_234_000);
    }

    #[test]
    fn refreshed_moves_past_a_frozen_clock() {
        let clock = FixedClock::default();
        let previous = now(&clock);
        assert!(refreshed(previous, &clock) > previous);
    }

    #[test]
    fn refreshed_uses_clock_when_it_is_ahead() {
        let clock = FixedClock::default();
        let previous = now(&clock) - Duration::hours(1);
        assert_eq!(refreshed(previous, &clock), now(&clock));
    }
}
