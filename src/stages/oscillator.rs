//! A marker that sweeps back and forth between two bounds at constant speed.

/// Bounded 1-D back-and-forth motion shared by the cast bar, the depth gauge
/// and the tension target square.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    pub position: f64,
    /// +1.0 toward `max`, -1.0 toward `min`.
    pub direction: f64,
    pub speed: f64,
    pub min: f64,
    pub max: f64,
}

impl Oscillator {
    /// Starts at `start` (clamped into bounds) heading toward `max`.
    /// Swapped bounds are put back in order.
    pub fn new(start: f64, speed: f64, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            position: start.clamp(min, max),
            direction: 1.0,
            speed: speed.abs(),
            min,
            max,
        }
    }

    /// Moves the marker by `dt` seconds, reversing at either end.
    pub fn step(&mut self, dt: f64) {
        self.position += self.direction * self.speed * dt;
        if self.position >= self.max {
            self.position = self.max;
            self.direction = -1.0;
        } else if self.position <= self.min {
            self.position = self.min;
            self.direction = 1.0;
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position relative to `min`, in `[0, span]`.
    pub fn offset(&self) -> f64 {
        (self.position - self.min).clamp(0.0, self.span())
    }
}
