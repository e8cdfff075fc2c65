use glam::{Mat4, Vec2, Vec3};

use crate::style::computed_style::EdgeInsets;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    pub size: Vec2,
    // Margin-box origin relative to the parent's border-box origin.
    pub layout_position: Vec2,
    pub margin: EdgeInsets<f32>,
    pub padding: EdgeInsets<f32>,
    pub border: EdgeInsets<f32>,
    // Sum of the children's margin boxes along this element's main axis.
    pub major_total: f32,
    pub world_position: Vec2,
    pub world_rotation: Vec3,
    pub world_transform: Mat4,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            size: Vec2::ZERO,
            layout_position: Vec2::ZERO,
            margin: EdgeInsets::default(),
            padding: EdgeInsets::default(),
            border: EdgeInsets::default(),
            major_total: 0.0,
            world_position: Vec2::ZERO,
            world_rotation: Vec3::ZERO,
            world_transform: Mat4::IDENTITY,
        }
    }
}

impl LayoutState {
    pub fn content_size(&self) -> Vec2 {
        Vec2::new(
            (self.size.x - self.padding.horizontal() - self.border.horizontal()).max(0.0),
            (self.size.y - self.padding.vertical() - self.border.vertical()).max(0.0),
        )
    }

    pub fn content_offset(&self) -> Vec2 {
        Vec2::new(
            self.padding.left + self.border.left,
            self.padding.top + self.border.top,
        )
    }

    pub fn margin_size(&self) -> Vec2 {
        Vec2::new(self.margin.horizontal(), self.margin.vertical())
    }
}
