//! Difficulty ramp clock
//!
//! The factor lives in an atomic cell: a background driver thread (or the
//! host loop, via [`DifficultyClock::advance`]) bumps it on a wall-clock
//! cadence while the simulation reads it once per tick. Growth is wall-time
//! driven, never physics-step driven, so frame rate and substep count do not
//! change the ramp.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::config::DifficultyGrowth;

#[derive(Debug)]
struct Shared {
    /// Factor as f64 bits; atomic so the loop never sees a torn value
    factor: AtomicU64,
    stop: Mutex<bool>,
    wake: Condvar,
}

/// Monotonically non-decreasing difficulty factor, starting at 1.0.
///
/// Lives for one session; a restart discards it and builds a fresh one.
#[derive(Debug)]
pub struct DifficultyClock {
    shared: Arc<Shared>,
    growth: DifficultyGrowth,
    /// Wall time accumulated toward the next increment (manual driving)
    carry: Duration,
    driver: Option<JoinHandle<()>>,
}

impl DifficultyClock {
    pub fn new(growth: DifficultyGrowth) -> Self {
        Self {
            shared: Arc::new(Shared {
                factor: AtomicU64::new(1.0f64.to_bits()),
                stop: Mutex::new(false),
                wake: Condvar::new(),
            }),
            growth,
            carry: Duration::ZERO,
            driver: None,
        }
    }

    /// Current factor. Safe to call from any context; a single atomic load.
    pub fn factor(&self) -> f64 {
        f64::from_bits(self.shared.factor.load(Ordering::Acquire))
    }

    /// Credit elapsed wall time toward the ramp. Increments fire once per
    /// full interval regardless of how the elapsed time is sliced up.
    pub fn advance(&mut self, elapsed: Duration) {
        self.carry += elapsed;
        while self.carry >= self.growth.interval {
            self.carry -= self.growth.interval;
            Self::bump(&self.shared, &self.growth);
        }
    }

    /// Spawn the background driver thread. Subsequent calls are no-ops.
    pub fn start(&mut self) {
        if self.driver.is_some() {
            return;
        }
        let shared = Arc::clone(&self.shared);
        let growth = self.growth.clone();
        self.driver = Some(std::thread::spawn(move || {
            let Ok(mut stopped) = shared.stop.lock() else {
                return;
            };
            let mut deadline = Instant::now() + growth.interval;
            loop {
                if *stopped {
                    break;
                }
                let now = Instant::now();
                if now >= deadline {
                    Self::bump(&shared, &growth);
                    deadline += growth.interval;
                    continue;
                }
                match shared.wake.wait_timeout(stopped, deadline - now) {
                    Ok((guard, _)) => stopped = guard,
                    Err(_) => return,
                }
            }
        }));
        log::debug!(
            "difficulty driver started (+{} every {:?})",
            self.growth.delta,
            self.growth.interval
        );
    }

    /// Whether the background driver is running
    pub fn is_running(&self) -> bool {
        self.driver.is_some()
    }

    fn bump(shared: &Shared, growth: &DifficultyGrowth) {
        let mut current = shared.factor.load(Ordering::Acquire);
        loop {
            let mut next = f64::from_bits(current) + growth.delta;
            if let Some(cap) = growth.cap {
                next = next.min(cap);
            }
            match shared.factor.compare_exchange_weak(
                current,
                next.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }
}

impl Drop for DifficultyClock {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            if let Ok(mut stopped) = self.shared.stop.lock() {
                *stopped = true;
            }
            self.shared.wake.notify_all();
            let _ = driver.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growth(interval_ms: u64, delta: f64, cap: Option<f64>) -> DifficultyGrowth {
        DifficultyGrowth {
            interval: Duration::from_millis(interval_ms),
            delta,
            cap,
        }
    }

    #[test]
    fn test_starts_at_one() {
        let clock = DifficultyClock::new(growth(5000, 0.1, None));
        assert_eq!(clock.factor(), 1.0);
    }

    #[test]
    fn test_exact_delta_per_interval() {
        let mut clock = DifficultyClock::new(growth(5000, 0.1, None));
        clock.advance(Duration::from_millis(15_500));
        assert!((clock.factor() - 1.3).abs() < 1e-9);
        // The half-interval remainder carries over
        clock.advance(Duration::from_millis(4_500));
        assert!((clock.factor() - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_independent_of_slicing() {
        let mut coarse = DifficultyClock::new(growth(1000, 0.1, None));
        let mut fine = DifficultyClock::new(growth(1000, 0.1, None));
        coarse.advance(Duration::from_secs(10));
        for _ in 0..1000 {
            fine.advance(Duration::from_millis(10));
        }
        assert!((coarse.factor() - fine.factor()).abs() < 1e-9);
    }

    #[test]
    fn test_sub_interval_does_not_bump() {
        let mut clock = DifficultyClock::new(growth(5000, 0.1, None));
        clock.advance(Duration::from_millis(4_999));
        assert_eq!(clock.factor(), 1.0);
    }

    #[test]
    fn test_cap_clamps_growth() {
        let mut clock = DifficultyClock::new(growth(100, 0.5, Some(2.0)));
        clock.advance(Duration::from_secs(1));
        assert!((clock.factor() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_driver_thread_bumps_and_stops() {
        let mut clock = DifficultyClock::new(growth(10, 0.1, None));
        clock.start();
        assert!(clock.is_running());
        std::thread::sleep(Duration::from_millis(120));
        assert!(clock.factor() > 1.0);
        drop(clock);
    }
}
