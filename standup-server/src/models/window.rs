//! Statistics time window

use chrono::{DateTime, Duration, Utc};

use super::ValidationError;

const MIN_DAYS: i64 = 1;
const MAX_DAYS: i64 = 365;
const DEFAULT_DAYS: i64 = 30;

/// Number of days of history included in statistics (1..=365).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaysWindow(i64);

impl DaysWindow {
    pub fn new(days: i64) -> Result<Self, ValidationError> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
            return Err(ValidationError::OutOfRange {
                field: "days",
                min: MIN_DAYS,
                max: MAX_DAYS,
            });
        }
        Ok(Self(days))
    }

    pub fn days(&self) -> i64 {
        self.0
    }

    /// Oldest timestamp included when the window ends at `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.0)
    }
}

impl Default for DaysWindow {
    fn default() -> Self {
        Self(DEFAULT_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert!(DaysWindow::new(0).is_err());
        assert!(DaysWindow::new(366).is_err());
        assert_eq!(DaysWindow::new(7).unwrap().days(), 7);
        assert_eq!(DaysWindow::default().days(), 30);
    }

    #[test]
    fn cutoff_subtracts_days() {
        let now = Utc::now();
        let window = DaysWindow::new(2).unwrap();
        assert_eq!(now - window.cutoff(now), Duration::days(2));
    }
}
