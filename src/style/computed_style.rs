use glam::{Vec3, Vec4};

use crate::style::keywords::{
    Display, LayoutAlign, LayoutDirection, LayoutType, LayoutWrap, Overflow, Visibility,
};
use crate::style::unit::{Length, LengthContext};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeSpec {
    #[default]
    Auto,
    Length(Length),
}

impl SizeSpec {
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> EdgeInsets<T> {
    pub const fn uniform(v: T) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn map<U>(self, f: impl Fn(T) -> U) -> EdgeInsets<U> {
        EdgeInsets {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

impl EdgeInsets<Length> {
    pub fn resolve(self, ctx: &LengthContext) -> EdgeInsets<f32> {
        self.map(|l| l.resolve_or_zero(ctx).max(0.0))
    }
}

impl EdgeInsets<f32> {
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub width: SizeSpec,
    pub height: SizeSpec,
    pub position_x: Length,
    pub position_y: Length,
    // Degrees about x, y and z.
    pub rotation: Vec3,
    pub margin: EdgeInsets<Length>,
    pub padding: EdgeInsets<Length>,
    pub border: EdgeInsets<Length>,
    pub layout_major: LayoutAlign,
    pub layout_minor: LayoutAlign,
    pub layout_item: LayoutAlign,
    pub layout_direction: LayoutDirection,
    pub layout_wrap: LayoutWrap,
    pub layout_type: LayoutType,
    pub display: Display,
    pub visibility: Visibility,
    pub overflow: Overflow,
    pub background_color: Vec4,
    pub border_color: Vec4,
    pub text_color: Vec4,
    pub border_radius: Length,
    // Seconds; zero disables color transitions.
    pub duration: f32,
    pub font_size: Length,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            width: SizeSpec::Auto,
            height: SizeSpec::Auto,
            position_x: Length::zero(),
            position_y: Length::zero(),
            rotation: Vec3::ZERO,
            margin: EdgeInsets::uniform(Length::zero()),
            padding: EdgeInsets::uniform(Length::zero()),
            border: EdgeInsets::uniform(Length::zero()),
            layout_major: LayoutAlign::Start,
            layout_minor: LayoutAlign::Start,
            layout_item: LayoutAlign::Start,
            layout_direction: LayoutDirection::Row,
            layout_wrap: LayoutWrap::NoWrap,
            layout_type: LayoutType::Flex,
            display: Display::Block,
            visibility: Visibility::Visible,
            overflow: Overflow::Visible,
            background_color: Vec4::ZERO,
            border_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            text_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            border_radius: Length::zero(),
            duration: 0.0,
            font_size: Length::px(16.0),
        }
    }
}

impl ComputedStyle {
    pub fn layout_differs(&self, other: &Self) -> bool {
        self.width != other.width
            || self.height != other.height
            || self.position_x != other.position_x
            || self.position_y != other.position_y
            || self.margin != other.margin
            || self.padding != other.padding
            || self.border != other.border
            || self.layout_major != other.layout_major
            || self.layout_minor != other.layout_minor
            || self.layout_item != other.layout_item
            || self.layout_direction != other.layout_direction
            || self.layout_wrap != other.layout_wrap
            || self.layout_type != other.layout_type
            || self.display != other.display
            || self.font_size != other.font_size
    }

    pub fn rotation_differs(&self, other: &Self) -> bool {
        self.rotation != other.rotation
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible && self.display == Display::Block
    }
}

#[cfg(test)]
mod tests {
    use super::{ComputedStyle, EdgeInsets, SizeSpec};
    use crate::style::Visibility;
    use crate::style::unit::{Length, LengthContext, Unit};
    use glam::Vec4;

    #[test]
    fn defaults() {
        let style = ComputedStyle::default();
        assert!(style.width.is_auto());
        assert_eq!(style.background_color, Vec4::ZERO);
        assert_eq!(style.font_size, Length::px(16.0));
        assert!(style.is_visible());
    }

    #[test]
    fn visual_changes_do_not_touch_layout() {
        let a = ComputedStyle::default();
        let mut b = a.clone();
        b.background_color = Vec4::ONE;
        b.visibility = Visibility::Hidden;
        assert!(!a.layout_differs(&b));
        b.width = SizeSpec::Length(Length::px(3.0));
        assert!(a.layout_differs(&b));
    }

    #[test]
    fn edges_resolve_against_parent() {
        let edges = EdgeInsets {
            top: Length::px(2.0),
            right: Length::new(10.0, Unit::PercentOfParentWidth),
            bottom: Length::px(-4.0),
            left: Length::new(1.0, Unit::PercentOfAvailable),
        };
        let resolved = edges.resolve(&LengthContext::new(200.0, 100.0, 0.0, 0.0));
        assert_eq!(resolved.top, 2.0);
        assert_eq!(resolved.right, 20.0);
        assert_eq!(resolved.bottom, 0.0);
        assert_eq!(resolved.left, 0.0);
        assert_eq!(resolved.horizontal(), 20.0);
    }
}
