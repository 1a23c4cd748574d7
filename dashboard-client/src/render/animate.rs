//! Counter animation
//!
//! Numbers move from the value currently on screen to the new target with a
//! quartic ease-out. Retargeting mid-flight starts from wherever the counter
//! is at that moment, so the display never jumps.

use std::time::Duration;

use tokio::time::Instant;

/// `1 - (1 - t)^4`, clamped to `[0, 1]`
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// An animated numeric display
#[derive(Debug, Clone)]
pub struct Counter {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl Counter {
    /// A counter resting at `value`
    pub fn new(value: f64, duration: Duration) -> Self {
        Self {
            from: value,
            to: value,
            started: Instant::now(),
            duration,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Value to display at `now`
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_out_quart(t)
    }

    pub fn value(&self) -> f64 {
        self.value_at(Instant::now())
    }

    pub fn is_settled(&self) -> bool {
        (self.to - self.from).abs() < f64::EPSILON || self.started.elapsed() >= self.duration
    }

    /// Animate towards `target` from the currently displayed value
    pub fn retarget(&mut self, target: f64) {
        let now = Instant::now();
        self.from = self.value_at(now);
        self.to = target;
        self.started = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(2000);

    #[test]
    fn test_ease_out_quart_curve() {
        assert!(ease_out_quart(0.0).abs() < f64::EPSILON);
        assert!((ease_out_quart(1.0) - 1.0).abs() < f64::EPSILON);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
        assert!((ease_out_quart(2.0) - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_starts_at_previous_and_ends_at_target() {
        let mut counter = Counter::new(1000.0, DURATION);
        counter.retarget(2000.0);
        assert!((counter.value() - 1000.0).abs() < f64::EPSILON);

        tokio::time::advance(Duration::from_millis(1000)).await;
        let mid = counter.value();
        assert!((mid - 1937.5).abs() < 1e-9);

        tokio::time::advance(Duration::from_millis(1000)).await;
        assert!((counter.value() - 2000.0).abs() < f64::EPSILON);
        assert!(counter.is_settled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retarget_mid_flight_continues_from_display() {
        let mut counter = Counter::new(0.0, DURATION);
        counter.retarget(100.0);
        tokio::time::advance(Duration::from_millis(1000)).await;

        counter.retarget(50.0);
        assert!((counter.value() - 93.75).abs() < 1e-9);
        assert!((counter.target() - 50.0).abs() < f64::EPSILON);

        tokio::time::advance(DURATION).await;
        assert!((counter.value() - 50.0).abs() < f64::EPSILON);
    }
}
