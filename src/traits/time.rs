/// Abstraction over wall-clock time.
///
/// The session clock is always derived as `now_ms() - start_epoch`, never
/// accumulated in fixed steps, so it cannot drift from the time source.
/// Implementations: [`SystemTimeProvider`] (production), [`MockTimeProvider`]
/// (testing).
pub trait TimeProvider {
    /// Current time in milliseconds from an arbitrary epoch.
    fn now_ms(&self) -> i64;
}

/// Monotonic system clock.
pub struct SystemTimeProvider {
    origin: std::time::Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_ms(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }
}

/// Manually driven clock for deterministic tests.
pub struct MockTimeProvider {
    current_ms: std::cell::Cell<i64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self {
            current_ms: std::cell::Cell::new(0),
        }
    }

    pub fn set_time(&self, ms: i64) {
        self.current_ms.set(ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.current_ms.set(self.current_ms.get() + delta_ms);
    }
}

impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_ms(&self) -> i64 {
        self.current_ms.get()
    }
}

impl<T: TimeProvider + ?Sized> TimeProvider for &T {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_advances() {
        let tp = MockTimeProvider::new();
        assert_eq!(tp.now_ms(), 0);
        tp.advance(1_000);
        tp.advance(500);
        assert_eq!(tp.now_ms(), 1_500);
        tp.set_time(16);
        assert_eq!(tp.now_ms(), 16);
    }

    #[test]
    fn system_time_is_monotonic() {
        let tp = SystemTimeProvider::new();
        let t1 = tp.now_ms();
        let t2 = tp.now_ms();
        assert!(t2 >= t1);
    }
}
