use std::thread;
use std::time::{Duration, Instant};

/// Sleeps away whatever is left of each tick to cap the loop at a fixed rate.
pub struct FrameLimiter {
    frame_duration: Duration,
    frame_start: Instant,
}

impl FrameLimiter {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / tick_rate.max(1) as f64),
            frame_start: Instant::now(),
        }
    }

    /// Blocks until the current tick has lasted at least one frame duration,
    /// then starts the next tick.
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_duration {
            thread::sleep(self.frame_duration - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_caps_tick_rate() {
        let mut limiter = FrameLimiter::new(100);
        let start = Instant::now();
        limiter.wait();
        limiter.wait();
        assert!(
            start.elapsed() >= Duration::from_millis(19),
            "two ticks at 100 Hz took only {:?}",
            start.elapsed()
        );
    }
}
