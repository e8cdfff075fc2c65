use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiConfig {
    pub reference_width: f32,
    pub reference_height: f32,
    pub scaling_enabled: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            reference_width: 1920.0,
            reference_height: 1080.0,
            scaling_enabled: true,
        }
    }
}

impl UiConfig {
    pub const fn reference(mut self, width: f32, height: f32) -> Self {
        self.reference_width = width;
        self.reference_height = height;
        self
    }

    pub const fn scaling(mut self, enabled: bool) -> Self {
        self.scaling_enabled = enabled;
        self
    }

    pub fn scale_for(&self, window: Vec2) -> f32 {
        if !self.scaling_enabled || self.reference_width <= 0.0 || self.reference_height <= 0.0 {
            return 1.0;
        }
        let scale = (window.x / self.reference_width).min(window.y / self.reference_height);
        if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::UiConfig;
    use glam::Vec2;

    #[test]
    fn scale_uses_the_tighter_axis() {
        let config = UiConfig::default();
        assert_eq!(config.scale_for(Vec2::new(1920.0, 1080.0)), 1.0);
        assert_eq!(config.scale_for(Vec2::new(960.0, 1080.0)), 0.5);
        assert_eq!(config.scale_for(Vec2::new(3840.0, 1080.0)), 1.0);
        assert_eq!(config.scale_for(Vec2::ZERO), 1.0);
        assert_eq!(config.scaling(false).scale_for(Vec2::new(960.0, 540.0)), 1.0);
    }
}
