use glam::{Mat4, Vec2, Vec4};

use crate::view::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshId {
    Quad,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShaderParams {
    pub size: Vec2,
    // Border widths in pixels: top, right, bottom, left.
    pub border: Vec4,
    pub border_color: Vec4,
    pub border_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ClipRect {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size.max(Vec2::ZERO),
        }
    }

    pub fn intersect(self, other: Self) -> Self {
        let min = self.min.max(other.min);
        Self {
            min,
            max: self.max.min(other.max).max(min),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmplt(self.max).all()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub content: String,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub element: ElementId,
    pub mesh: MeshId,
    pub transform: Mat4,
    pub color: Vec4,
    pub params: ShaderParams,
    pub clip: Option<ClipRect>,
    pub text: Option<TextRun>,
}

pub trait UiRenderer {
    fn begin_frame(&mut self, _viewport: Vec2, _scale_factor: f32) {}

    fn submit(&mut self, command: RenderCommand);

    fn end_frame(&mut self) {}
}

impl UiRenderer for Vec<RenderCommand> {
    fn begin_frame(&mut self, _viewport: Vec2, _scale_factor: f32) {
        self.clear();
    }

    fn submit(&mut self, command: RenderCommand) {
        self.push(command);
    }
}

pub trait FontMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Vec2;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 1.0,
        }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Vec2 {
        let lines = text.lines().count().max(1);
        let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        Vec2::new(
            columns as f32 * self.advance * font_size,
            lines as f32 * self.line_height * font_size,
        )
    }
}
