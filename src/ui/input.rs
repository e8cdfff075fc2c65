use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

pub trait InputProvider {
    // Cursor position in window pixels.
    fn mouse_position(&self) -> Vec2;
    fn is_mouse_down(&self, button: MouseButton) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub position: Vec2,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl MouseState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn pressed(mut self, button: MouseButton) -> Self {
        match button {
            MouseButton::Left => self.left = true,
            MouseButton::Right => self.right = true,
            MouseButton::Middle => self.middle = true,
        }
        self
    }
}

impl InputProvider for MouseState {
    fn mouse_position(&self) -> Vec2 {
        self.position
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }
}
