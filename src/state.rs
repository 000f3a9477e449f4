use std::time::Duration;

/// Mutable scalar that an animation drives and the scene reads
#[derive(Clone, Debug, PartialEq)]
pub struct ValueTracker {
    value: f64,
}

impl ValueTracker {
    pub fn new(value: f64) -> Self {
        ValueTracker { value }
    }

    pub fn get_value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

/// Maps animation progress in [0, 1] onto interpolation progress
pub type RateFunc = fn(f64) -> f64;

pub fn linear(alpha: f64) -> f64 {
    alpha
}

/// A single tween of a tracked value from `start` to `end`
#[derive(Clone, Debug)]
pub struct Animation {
    pub start: f64,
    pub end: f64,
    pub run_time: Duration,
    pub fps: u32,
    pub rate_func: RateFunc,
}

impl Animation {
    pub fn linear(start: f64, end: f64, run_time: Duration, fps: u32) -> Self {
        Animation {
            start,
            end,
            run_time,
            fps,
            rate_func: linear,
        }
    }

    /// Number of frame intervals; frames are rendered at both ends
    pub fn frame_count(&self) -> usize {
        (self.run_time.as_secs_f64() * self.fps as f64).round() as usize
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    /// Tracked value at progress `alpha`
    pub fn value_at(&self, alpha: f64) -> f64 {
        let alpha = (self.rate_func)(alpha.clamp(0.0, 1.0));
        if alpha >= 1.0 {
            return self.end;
        }
        self.start + (self.end - self.start) * alpha
    }

    /// Progress of every frame, from 0 through 1 inclusive
    pub fn frames(&self) -> impl Iterator<Item = f64> {
        let count = self.frame_count();
        (0..=count).map(move |i| if count == 0 { 1.0 } else { i as f64 / count as f64 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn full_turn() -> Animation {
        Animation::linear(0.0, TAU, Duration::from_secs(5), 30)
    }

    #[test]
    fn tracker_holds_value() {
        let mut tracker = ValueTracker::new(0.0);
        assert_eq!(tracker.get_value(), 0.0);
        tracker.set_value(1.25);
        assert_eq!(tracker.get_value(), 1.25);
    }

    #[test]
    fn frame_count_from_run_time() {
        let animation = full_turn();
        assert_eq!(animation.frame_count(), 150);
        assert_eq!(animation.frames().count(), 151);
        assert_relative_eq!(animation.frame_interval().as_secs_f64(), 1.0 / 30.0, epsilon = 1e-9);
    }

    #[test]
    fn values_run_from_start_to_end() {
        let animation = full_turn();
        let values: Vec<f64> = animation.frames().map(|a| animation.value_at(a)).collect();
        assert_eq!(values[0], 0.0);
        assert_eq!(*values.last().unwrap(), TAU);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn linear_progress_is_proportional() {
        let animation = full_turn();
        assert_relative_eq!(animation.value_at(0.25), TAU / 4.0, epsilon = 1e-12);
        assert_relative_eq!(animation.value_at(0.5), TAU / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_length_animation_jumps_to_end() {
        let animation = Animation::linear(0.0, TAU, Duration::ZERO, 30);
        let frames: Vec<f64> = animation.frames().collect();
        assert_eq!(frames, vec![1.0]);
        assert_eq!(animation.value_at(frames[0]), TAU);
    }
}
