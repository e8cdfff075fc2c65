use glam::Vec2;

use crate::style::{LayoutAlign, LayoutDirection, LayoutType, LayoutWrap};

mod flex;
mod free;
mod grid;

pub use flex::FlexLayoutCalculator;
pub use free::FreeLayoutCalculator;
pub use grid::GridLayoutCalculator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    Fixed(f32),
    Auto,
    Available(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildLayout {
    pub width: Extent,
    pub height: Extent,
    pub intrinsic: Vec2,
    pub margin: Vec2,
    pub offset: Vec2,
}

impl Default for ChildLayout {
    fn default() -> Self {
        Self {
            width: Extent::Auto,
            height: Extent::Auto,
            intrinsic: Vec2::ZERO,
            margin: Vec2::ZERO,
            offset: Vec2::ZERO,
        }
    }
}

impl ChildLayout {
    pub const fn fixed(width: f32, height: f32) -> Self {
        Self {
            width: Extent::Fixed(width),
            height: Extent::Fixed(height),
            intrinsic: Vec2::ZERO,
            margin: Vec2::ZERO,
            offset: Vec2::ZERO,
        }
    }

    fn base(&self, axis: Axis) -> f32 {
        match axis.extent(self) {
            Extent::Fixed(v) => v.max(0.0),
            Extent::Auto => axis.pick(self.intrinsic),
            Extent::Available(_) => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerLayout {
    pub content_size: Vec2,
    pub direction: LayoutDirection,
    pub wrap: LayoutWrap,
    pub major: LayoutAlign,
    pub minor: LayoutAlign,
    pub item: LayoutAlign,
}

impl Default for ContainerLayout {
    fn default() -> Self {
        Self {
            content_size: Vec2::ZERO,
            direction: LayoutDirection::Row,
            wrap: LayoutWrap::NoWrap,
            major: LayoutAlign::Start,
            minor: LayoutAlign::Start,
            item: LayoutAlign::Start,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SizePass {
    pub sizes: Vec<Vec2>,
    pub major_total: f32,
}

pub trait LayoutCalculator {
    fn content_size(&self, container: &ContainerLayout, children: &[ChildLayout]) -> Vec2;

    fn compute_sizes(&self, container: &ContainerLayout, children: &[ChildLayout]) -> SizePass;

    fn compute_positions(
        &self,
        container: &ContainerLayout,
        children: &[ChildLayout],
        sizes: &[Vec2],
    ) -> Vec<Vec2>;
}

static FLEX: FlexLayoutCalculator = FlexLayoutCalculator;
static GRID: GridLayoutCalculator = GridLayoutCalculator;
static FREE: FreeLayoutCalculator = FreeLayoutCalculator;

pub fn calculator_for(layout_type: LayoutType) -> &'static dyn LayoutCalculator {
    match layout_type {
        LayoutType::Flex => &FLEX,
        LayoutType::Grid => &GRID,
        LayoutType::None => &FREE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub(crate) const fn main(direction: LayoutDirection) -> Self {
        match direction {
            LayoutDirection::Row => Self::Horizontal,
            LayoutDirection::Column => Self::Vertical,
        }
    }

    pub(crate) const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    pub(crate) fn pick(self, v: Vec2) -> f32 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    pub(crate) const fn extent(self, child: &ChildLayout) -> Extent {
        match self {
            Self::Horizontal => child.width,
            Self::Vertical => child.height,
        }
    }

    pub(crate) fn pack(self, along: f32, across: f32) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(along, across),
            Self::Vertical => Vec2::new(across, along),
        }
    }
}

pub(crate) fn start_and_gap(
    limit: f32,
    occupied: f32,
    count: usize,
    align: LayoutAlign,
) -> (f32, f32) {
    let free = (limit - occupied).max(0.0);
    match align {
        LayoutAlign::Start | LayoutAlign::Stretch => (0.0, 0.0),
        LayoutAlign::Center => (free * 0.5, 0.0),
        LayoutAlign::End => (free, 0.0),
        LayoutAlign::SpaceEvenly => {
            let gap = free / (count + 1) as f32;
            (gap, gap)
        }
        LayoutAlign::SpaceAround if count > 0 => {
            let space = free / count as f32;
            (space * 0.5, space)
        }
        LayoutAlign::SpaceAround => (0.0, 0.0),
    }
}

pub(crate) fn item_offset(line: f32, item: f32, align: LayoutAlign) -> f32 {
    let free = (line - item).max(0.0);
    match align {
        LayoutAlign::Center => free * 0.5,
        LayoutAlign::End => free,
        LayoutAlign::Start
        | LayoutAlign::Stretch
        | LayoutAlign::SpaceEvenly
        | LayoutAlign::SpaceAround => 0.0,
    }
}

/// Splits `space` into `count` whole-pixel shares. Pixels left over after
/// flooring go one each to the earliest shares.
pub(crate) fn whole_pixel_shares(space: f32, count: usize) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let space = space.max(0.0).floor();
    let share = (space / count as f32).floor();
    let leftover = (space - share * count as f32).max(0.0) as usize;
    (0..count)
        .map(|i| if i < leftover { share + 1.0 } else { share })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{LayoutCalculator, calculator_for, start_and_gap, whole_pixel_shares};
    use crate::style::{LayoutAlign, LayoutType};

    #[test]
    fn shares_are_whole_pixels() {
        assert_eq!(whole_pixel_shares(300.0, 3), [100.0, 100.0, 100.0]);
        assert_eq!(whole_pixel_shares(100.0, 3), [34.0, 33.0, 33.0]);
        assert_eq!(whole_pixel_shares(101.5, 2), [51.0, 50.0]);
        assert!(whole_pixel_shares(10.0, 0).is_empty());
        assert_eq!(whole_pixel_shares(-5.0, 2), [0.0, 0.0]);
    }

    #[test]
    fn major_alignment_offsets() {
        assert_eq!(start_and_gap(100.0, 40.0, 2, LayoutAlign::Start), (0.0, 0.0));
        assert_eq!(start_and_gap(100.0, 40.0, 2, LayoutAlign::Center), (30.0, 0.0));
        assert_eq!(start_and_gap(100.0, 40.0, 2, LayoutAlign::End), (60.0, 0.0));
        assert_eq!(start_and_gap(100.0, 40.0, 2, LayoutAlign::SpaceEvenly), (20.0, 20.0));
        assert_eq!(start_and_gap(100.0, 40.0, 2, LayoutAlign::SpaceAround), (15.0, 30.0));
        assert_eq!(start_and_gap(10.0, 40.0, 2, LayoutAlign::End), (0.0, 0.0));
    }

    #[test]
    fn layout_type_selects_calculator() {
        let calc: &dyn LayoutCalculator = calculator_for(LayoutType::Flex);
        let pass = calc.compute_sizes(&Default::default(), &[]);
        assert!(pass.sizes.is_empty());
        assert_eq!(pass.major_total, 0.0);
    }
}
