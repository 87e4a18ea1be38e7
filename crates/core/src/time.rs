use chrono::{DateTime, Duration, Utc};

/// Where interview sessions get their `started_at` and `ended_at` stamps.
///
/// `Fixed` pins every stamp to one instant until it is advanced.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Moves a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Seconds since the epoch for 2023-11-14T22:13:20Z. A session started at
/// this instant gets the id `interview_1700000000000`.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// The pinned instant used when scripting sessions in tests.
///
/// # Panics
///
/// Never in practice: the constant is well inside chrono's range.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("interview test instant is representable")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_now_matches_first_session_id() {
        assert_eq!(fixed_now().timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn fixed_clock_advances() {
        let mut clock = Clock::fixed(fixed_now());
        clock.advance(Duration::minutes(3));
        assert_eq!(clock.now(), fixed_now() + Duration::minutes(3));
    }

    #[test]
    fn system_clock_ignores_advance() {
        let mut clock = Clock::system();
        clock.advance(Duration::days(365));
        assert!(clock.now() <= Utc::now());
    }
}
