use glam::Vec4;

use super::{TimeFunction, normalized_progress};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorTransition {
    from: Vec4,
    to: Vec4,
    duration_seconds: f32,
    elapsed_seconds: f32,
    timing: TimeFunction,
}

impl ColorTransition {
    pub fn new(from: Vec4, to: Vec4, duration_seconds: f32) -> Self {
        Self {
            from,
            to,
            duration_seconds: duration_seconds.max(0.0),
            elapsed_seconds: 0.0,
            timing: TimeFunction::default(),
        }
    }

    pub const fn timing(mut self, timing: TimeFunction) -> Self {
        self.timing = timing;
        self
    }

    pub const fn target(&self) -> Vec4 {
        self.to
    }

    pub fn step(&mut self, delta_seconds: f32) -> Vec4 {
        self.elapsed_seconds += delta_seconds.max(0.0);
        self.current()
    }

    pub fn current(&self) -> Vec4 {
        if self.is_finished() {
            return self.to;
        }
        let t = normalized_progress(self.elapsed_seconds, self.duration_seconds);
        self.from.lerp(self.to, self.timing.sample(t))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_seconds >= self.duration_seconds
    }

    pub fn retarget(&mut self, to: Vec4, duration_seconds: f32) {
        *self = Self::new(self.current(), to, duration_seconds).timing(self.timing);
    }
}

#[cfg(test)]
mod tests {
    use super::ColorTransition;
    use crate::transition::TimeFunction;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn linear_blend_reaches_target() {
        let mut t = ColorTransition::new(Vec4::ZERO, Vec4::ONE, 1.0).timing(TimeFunction::Linear);
        assert_relative_eq!(t.step(0.25).x, 0.25);
        assert!(!t.is_finished());
        assert_eq!(t.step(10.0), Vec4::ONE);
        assert!(t.is_finished());
    }

    #[test]
    fn retarget_starts_from_current_color() {
        let mut t = ColorTransition::new(Vec4::ZERO, Vec4::ONE, 1.0).timing(TimeFunction::Linear);
        t.step(0.5);
        t.retarget(Vec4::ZERO, 1.0);
        assert_relative_eq!(t.current().x, 0.5);
        assert_eq!(t.target(), Vec4::ZERO);
    }
}
