/// Repeating interval timer driven by frame deltas.
#[derive(Debug, Clone)]
pub struct Timer {
    pub interval: f32,
    pub elapsed: f32,
}

impl Timer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_ready(&self) -> bool {
        self.elapsed >= self.interval
    }

    /// Returns true once per elapsed interval and keeps the remainder.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.update(dt);
        if self.is_ready() {
            self.elapsed %= self.interval;
            return true;
        }
        false
    }
}
