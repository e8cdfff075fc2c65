use glam::Vec2;

use super::{ChildLayout, ContainerLayout, Extent, LayoutCalculator, SizePass};

#[derive(Debug, Clone, Copy, Default)]
pub struct FreeLayoutCalculator;

fn own_size(container: &ContainerLayout, child: &ChildLayout) -> Vec2 {
    let resolve = |extent: Extent, intrinsic: f32, room: f32| match extent {
        Extent::Fixed(v) => v.max(0.0),
        Extent::Auto => intrinsic,
        Extent::Available(percent) => room.max(0.0) * percent * 0.01,
    };
    Vec2::new(
        resolve(child.width, child.intrinsic.x, container.content_size.x - child.margin.x),
        resolve(child.height, child.intrinsic.y, container.content_size.y - child.margin.y),
    )
}

impl LayoutCalculator for FreeLayoutCalculator {
    fn content_size(&self, container: &ContainerLayout, children: &[ChildLayout]) -> Vec2 {
        children.iter().fold(Vec2::ZERO, |acc, c| {
            acc.max(c.offset + own_size(container, c) + c.margin)
        })
    }

    fn compute_sizes(&self, container: &ContainerLayout, children: &[ChildLayout]) -> SizePass {
        let sizes: Vec<Vec2> = children.iter().map(|c| own_size(container, c)).collect();
        let major_total = children
            .iter()
            .zip(&sizes)
            .map(|(c, s)| s.x + c.margin.x)
            .sum();
        SizePass { sizes, major_total }
    }

    fn compute_positions(
        &self,
        _container: &ContainerLayout,
        children: &[ChildLayout],
        _sizes: &[Vec2],
    ) -> Vec<Vec2> {
        children.iter().map(|c| c.offset).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::FreeLayoutCalculator;
    use crate::view::layout::{ChildLayout, ContainerLayout, LayoutCalculator};
    use glam::Vec2;

    #[test]
    fn children_sit_at_their_offsets() {
        let container = ContainerLayout {
            content_size: Vec2::new(500.0, 500.0),
            ..ContainerLayout::default()
        };
        let mut a = ChildLayout::fixed(10.0, 10.0);
        a.offset = Vec2::new(100.0, 50.0);
        let b = ChildLayout::fixed(20.0, 20.0);
        let calc = FreeLayoutCalculator;
        let pass = calc.compute_sizes(&container, &[a, b]);
        assert_eq!(pass.sizes, [Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0)]);
        assert_eq!(
            calc.compute_positions(&container, &[a, b], &pass.sizes),
            [Vec2::new(100.0, 50.0), Vec2::ZERO]
        );
        assert_eq!(calc.content_size(&container, &[a, b]), Vec2::new(110.0, 60.0));
    }
}
