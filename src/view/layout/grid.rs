use glam::Vec2;

use super::{ChildLayout, ContainerLayout, Extent, LayoutCalculator, SizePass};

/// Grid placement is not supported yet; children are stacked in a single
/// column that spans the content width.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLayoutCalculator;

impl LayoutCalculator for GridLayoutCalculator {
    fn content_size(&self, _container: &ContainerLayout, children: &[ChildLayout]) -> Vec2 {
        children.iter().fold(Vec2::ZERO, |acc, c| {
            let size = Vec2::new(
                match c.width {
                    Extent::Fixed(v) => v.max(0.0),
                    _ => c.intrinsic.x,
                },
                match c.height {
                    Extent::Fixed(v) => v.max(0.0),
                    _ => c.intrinsic.y,
                },
            ) + c.margin;
            Vec2::new(acc.x.max(size.x), acc.y + size.y)
        })
    }

    fn compute_sizes(&self, container: &ContainerLayout, children: &[ChildLayout]) -> SizePass {
        log::debug!("grid layout falls back to a single column");
        let column = container.content_size.x;
        let sizes: Vec<Vec2> = children
            .iter()
            .map(|c| {
                let room = (column - c.margin.x).max(0.0);
                let width = match c.width {
                    Extent::Fixed(v) => v.max(0.0),
                    Extent::Auto => room,
                    Extent::Available(percent) => room * percent * 0.01,
                };
                let height = match c.height {
                    Extent::Fixed(v) => v.max(0.0),
                    Extent::Auto => c.intrinsic.y,
                    Extent::Available(_) => 0.0,
                };
                Vec2::new(width, height)
            })
            .collect();
        let major_total = children
            .iter()
            .zip(&sizes)
            .map(|(c, s)| s.y + c.margin.y)
            .sum();
        SizePass { sizes, major_total }
    }

    fn compute_positions(
        &self,
        _container: &ContainerLayout,
        children: &[ChildLayout],
        sizes: &[Vec2],
    ) -> Vec<Vec2> {
        let mut y = 0.0;
        children
            .iter()
            .zip(sizes)
            .map(|(c, s)| {
                let at = Vec2::new(0.0, y) + c.offset;
                y += s.y + c.margin.y;
                at
            })
            .collect()
    }
}
