//! Stopwatch for measuring one or more intervals, and a logged timing scope.

use std::fmt;
use std::time::{Duration, Instant};

use crate::error::TimerError;

/// Measures time elapsed over one or more start/stop intervals.
///
/// # Examples
///
/// ```
/// use cc_stats::timer::Timer;
///
/// let mut timer = Timer::new(true);
/// timer.stop().unwrap();
/// timer.resume().unwrap();
/// let total = timer.total_elapsed();
/// assert!(total >= timer.last_elapsed().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Timer {
    started_at: Option<Instant>,
    last_elapsed: Option<Duration>,
    total_elapsed: Duration,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Timer {
    /// Create a timer, running immediately if `start_on_creation`.
    pub fn new(start_on_creation: bool) -> Self {
        let mut timer = Self {
            started_at: None,
            last_elapsed: None,
            total_elapsed: Duration::ZERO,
        };
        if start_on_creation {
            timer.started_at = Some(Instant::now());
        }
        timer
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.started_at.is_none()
    }

    /// Start timing a stopped timer. Alias of [`Timer::resume`].
    pub fn start(&mut self) -> Result<(), TimerError> {
        self.resume()
    }

    /// Start a new interval.
    pub fn resume(&mut self) -> Result<(), TimerError> {
        if self.is_started() {
            return Err(TimerError::AlreadyRunning);
        }
        self.started_at = Some(Instant::now());
        Ok(())
    }

    /// Stop the running interval and add it to the total.
    pub fn stop(&mut self) -> Result<Duration, TimerError> {
        let stopped_at = Instant::now();
        let started_at = self.started_at.take().ok_or(TimerError::NotRunning)?;
        let elapsed = stopped_at.duration_since(started_at);
        self.last_elapsed = Some(elapsed);
        self.total_elapsed += elapsed;
        Ok(elapsed)
    }

    /// Stop if running, then return the last measured interval.
    pub fn elapsed(&mut self) -> Result<Duration, TimerError> {
        if self.is_started() {
            self.stop()?;
        }
        self.last_elapsed.ok_or(TimerError::NoInterval)
    }

    /// Last measured interval without stopping.
    pub fn last_elapsed(&self) -> Option<Duration> {
        self.last_elapsed
    }

    /// Stop if running, then return the total of all intervals.
    pub fn total_elapsed(&mut self) -> Duration {
        if self.is_started() {
            // Cannot fail: the timer is running.
            let _ = self.stop();
        }
        self.total_elapsed
    }

    /// Add the total of another stopped timer to this stopped timer.
    pub fn accumulate(&mut self, other: &Timer) -> Result<(), TimerError> {
        if self.is_started() || other.is_started() {
            return Err(TimerError::AlreadyRunning);
        }
        self.total_elapsed += other.total_elapsed;
        Ok(())
    }

    fn measured(&self) -> Duration {
        let running = self
            .started_at
            .map(|start| start.elapsed())
            .unwrap_or(Duration::ZERO);
        self.total_elapsed + running
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} secs", self.measured().as_secs_f64())
    }
}

/// Logs `"<message> ..."` when created and `"<message> done (x.xxx s)"` when
/// dropped.
///
/// ```
/// use cc_stats::timer::TimedScope;
///
/// {
///     let _scope = TimedScope::new(log::Level::Info, "Computing stats");
///     // ... work ...
/// }
/// ```
pub struct TimedScope {
    level: log::Level,
    message: String,
    timer: Timer,
}

impl TimedScope {
    pub fn new(level: log::Level, message: impl Into<String>) -> Self {
        let message = message.into();
        log::log!(level, "{} ...", message);
        Self {
            level,
            message,
            timer: Timer::new(true),
        }
    }

    /// Time spent in the scope so far.
    pub fn elapsed(&self) -> Duration {
        self.timer.measured()
    }
}

impl Drop for TimedScope {
    fn drop(&mut self) {
        let elapsed = self.timer.total_elapsed();
        log::log!(
            self.level,
            "{} done ({:.3} s)",
            self.message,
            elapsed.as_secs_f64()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_not_started() {
        let mut timer = Timer::new(false);
        assert!(timer.is_stopped());
        assert_eq!(timer.stop(), Err(TimerError::NotRunning));
        assert_eq!(timer.elapsed(), Err(TimerError::NoInterval));
        assert_eq!(timer.total_elapsed(), Duration::ZERO);
        assert_eq!(timer.to_string(), "0.000 secs");
    }

    #[test]
    fn test_stop_then_resume_accumulates() {
        let mut timer = Timer::new(true);
        assert!(timer.is_started());
        let first = timer.stop().unwrap();
        assert!(timer.is_stopped());

        timer.resume().unwrap();
        assert_eq!(timer.resume(), Err(TimerError::AlreadyRunning));
        let second = timer.elapsed().unwrap();

        assert_eq!(timer.last_elapsed(), Some(second));
        assert_eq!(timer.total_elapsed(), first + second);
    }

    #[test]
    fn test_start_on_stopped_timer() {
        let mut timer = Timer::new(false);
        timer.start().unwrap();
        assert!(timer.is_started());
        assert_eq!(timer.start(), Err(TimerError::AlreadyRunning));
        assert!(timer.stop().is_ok());
        assert!(timer.last_elapsed().is_some());
    }

    #[test]
    fn test_accumulate_requires_stopped_timers() {
        let mut a = Timer::new(true);
        let mut b = Timer::new(true);
        assert_eq!(a.accumulate(&b), Err(TimerError::AlreadyRunning));

        let a_total = a.total_elapsed();
        let b_total = b.total_elapsed();
        a.accumulate(&b).unwrap();
        assert_eq!(a.total_elapsed(), a_total + b_total);
    }

    #[test]
    fn test_timed_scope_measures() {
        let scope = TimedScope::new(log::Level::Debug, "unit");
        let first = scope.elapsed();
        assert!(scope.elapsed() >= first);
    }
}
