#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimeFunction {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl TimeFunction {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOut if t < 0.5 => 2.0 * t * t,
            Self::EaseInOut => 1.0 - (-2.0 * t + 2.0).powi(2) * 0.5,
        }
    }
}

pub fn normalized_progress(elapsed_seconds: f32, duration_seconds: f32) -> f32 {
    if duration_seconds <= f32::EPSILON {
        return 1.0;
    }
    (elapsed_seconds / duration_seconds).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{TimeFunction, normalized_progress};
    use approx::assert_relative_eq;

    #[test]
    fn curves_hit_their_endpoints() {
        for f in [
            TimeFunction::Linear,
            TimeFunction::EaseIn,
            TimeFunction::EaseOut,
            TimeFunction::EaseInOut,
        ] {
            assert_relative_eq!(f.sample(0.0), 0.0);
            assert_relative_eq!(f.sample(1.0), 1.0);
            assert_relative_eq!(f.sample(2.0), 1.0);
        }
        assert_relative_eq!(TimeFunction::EaseInOut.sample(0.5), 0.5);
    }

    #[test]
    fn zero_duration_completes_at_once() {
        assert_eq!(normalized_progress(0.0, 0.0), 1.0);
        assert_relative_eq!(normalized_progress(0.5, 2.0), 0.25);
        assert_eq!(normalized_progress(5.0, 2.0), 1.0);
    }
}
