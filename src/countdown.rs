use chrono::{DateTime, Utc};

/// Message shown once the target instant has been reached.
pub const ARRIVED_MESSAGE: &str = "The day is here!";

const MS_PER_DAY: i64 = 1000 * 60 * 60 * 24;
const MS_PER_HOUR: i64 = 1000 * 60 * 60;
const MS_PER_MINUTE: i64 = 1000 * 60;

/// What the countdown row should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownDisplay {
    Running {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Arrived,
}

impl CountdownDisplay {
    /// Two-digit zero-padded segments for the running display, in
    /// days/hours/minutes/seconds order. `None` once arrived.
    pub fn segments(&self) -> Option<[String; 4]> {
        match self {
            Self::Running { days, hours, minutes, seconds } => Some([
                format!("{:02}", days),
                format!("{:02}", hours),
                format!("{:02}", minutes),
                format!("{:02}", seconds),
            ]),
            Self::Arrived => None,
        }
    }
}

/// Ticks toward a fixed target instant. Running until the target is
/// reached, then latched as expired; later ticks never produce output,
/// so the arrival display can never be overwritten.
pub struct Countdown {
    target: DateTime<Utc>,
    expired: bool,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self { target, expired: false }
    }

    /// Recompute the remaining time. Returns the display update for this
    /// tick, or `None` when the countdown has already expired.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<CountdownDisplay> {
        if self.expired {
            return None;
        }

        let remaining = (self.target - now).num_milliseconds();
        if remaining <= 0 {
            self.expired = true;
            return Some(CountdownDisplay::Arrived);
        }

        Some(CountdownDisplay::Running {
            days: remaining / MS_PER_DAY,
            hours: (remaining % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (remaining % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (remaining % MS_PER_MINUTE) / 1000,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn target() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 27, 14, 0, 0).unwrap()
    }

    #[test]
    fn one_second_before_target_shows_a_single_second() {
        let mut countdown = Countdown::new(target());
        let display = countdown.tick(target() - chrono::Duration::seconds(1)).unwrap();
        assert_eq!(
            display.segments(),
            Some(["00".into(), "00".into(), "00".into(), "01".into()])
        );
        assert!(!countdown.is_expired());
    }

    #[test]
    fn decomposes_days_hours_minutes_seconds() {
        let mut countdown = Countdown::new(target());
        let now = target()
            - chrono::Duration::days(3)
            - chrono::Duration::hours(5)
            - chrono::Duration::minutes(42)
            - chrono::Duration::seconds(7);
        let display = countdown.tick(now).unwrap();
        assert_eq!(
            display,
            CountdownDisplay::Running { days: 3, hours: 5, minutes: 42, seconds: 7 }
        );
    }

    #[test]
    fn expires_exactly_at_the_target_instant() {
        let mut countdown = Countdown::new(target());
        assert_eq!(countdown.tick(target()), Some(CountdownDisplay::Arrived));
        assert!(countdown.is_expired());
    }

    #[test]
    fn never_displays_a_negative_remaining() {
        let mut countdown = Countdown::new(target());
        let display = countdown.tick(target() + chrono::Duration::milliseconds(1));
        assert_eq!(display, Some(CountdownDisplay::Arrived));
    }

    #[test]
    fn ticks_after_expiry_leave_the_display_untouched() {
        let mut countdown = Countdown::new(target());
        assert_eq!(countdown.tick(target()), Some(CountdownDisplay::Arrived));
        assert_eq!(countdown.tick(target() + chrono::Duration::seconds(1)), None);
        assert_eq!(countdown.tick(target() + chrono::Duration::days(30)), None);
    }

    #[test]
    fn segments_are_zero_padded() {
        let mut countdown = Countdown::new(target());
        let now = target() - chrono::Duration::days(12) - chrono::Duration::seconds(5);
        let segments = countdown.tick(now).unwrap().segments().unwrap();
        assert_eq!(segments[0], "12");
        assert_eq!(segments[3], "05");
    }
}
