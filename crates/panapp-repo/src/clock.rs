use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Monotonic timestamp source for record lifecycle fields.
///
/// Wall-clock time can stall within a tick or step backwards under NTP
/// adjustment, but `created_at`/`updated_at` must never regress across
/// successive mutations. Each call returns
/// `max(wall_clock, previous + 1ms)`, so timestamps from one clock are
/// strictly increasing at millisecond resolution.
pub struct MonotonicClock {
    last_ms: Mutex<i64>,
}

impl MonotonicClock {
    /// Create a clock with no history.
    pub fn new() -> Self {
        Self {
            last_ms: Mutex::new(0),
        }
    }

    /// The next timestamp, strictly after every previous one.
    pub fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_millis();
        let mut last = self.last_ms.lock().expect("clock mutex poisoned");
        let ms = if wall > *last { wall } else { *last + 1 };
        *last = ms;
        DateTime::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MonotonicClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonotonicClock").finish_non_exhaustive()
    }
}
