// Time Provider Port (for testability)

/// Time provider interface (allows fixed clocks in tests)
pub trait TimeProvider: Send + Sync {
    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock that advances by one millisecond per reading
    pub struct SteppingClock {
        next: AtomicI64,
    }

    impl SteppingClock {
        pub fn starting_at(millis: i64) -> Self {
            Self {
                next: AtomicI64::new(millis),
            }
        }
    }

    impl TimeProvider for SteppingClock {
        fn now_millis(&self) -> i64 {
            self.next.fetch_add(1, Ordering::SeqCst)
        }
    }
}
