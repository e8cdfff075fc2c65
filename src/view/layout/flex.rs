use glam::Vec2;

use super::{
    Axis, ChildLayout, ContainerLayout, Extent, LayoutCalculator, SizePass, item_offset,
    start_and_gap, whole_pixel_shares,
};
use crate::style::{LayoutAlign, LayoutWrap};

/// Row/column flow with optional wrapping.
///
/// `major` aligns items along the direction and `minor` places whole lines
/// across it; `item` aligns each child inside its line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexLayoutCalculator;

impl FlexLayoutCalculator {
    fn break_lines(
        container: &ContainerLayout,
        limit: f32,
        mains: impl Iterator<Item = f32>,
    ) -> Vec<Vec<usize>> {
        let wrap = container.wrap == LayoutWrap::Wrap;
        let mut lines: Vec<Vec<usize>> = Vec::new();
        let mut current = Vec::new();
        let mut current_main = 0.0;
        for (idx, item_main) in mains.enumerate() {
            if wrap && !current.is_empty() && current_main + item_main > limit {
                lines.push(std::mem::take(&mut current));
                current_main = 0.0;
            }
            current_main += item_main;
            current.push(idx);
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn line_crosses(
        container: &ContainerLayout,
        lines: &[Vec<usize>],
        crosses: &[f32],
    ) -> Vec<f32> {
        let cross_limit = Axis::main(container.direction).cross().pick(container.content_size);
        if container.wrap == LayoutWrap::NoWrap {
            return lines.iter().map(|_| cross_limit).collect();
        }
        let mut out: Vec<f32> = lines
            .iter()
            .map(|line| line.iter().map(|&i| crosses[i]).fold(0.0, f32::max))
            .collect();
        if container.minor == LayoutAlign::Stretch && !out.is_empty() {
            let extra = (cross_limit - out.iter().sum::<f32>()).max(0.0) / out.len() as f32;
            for cross in &mut out {
                *cross += extra;
            }
        }
        out
    }
}

impl LayoutCalculator for FlexLayoutCalculator {
    fn content_size(&self, container: &ContainerLayout, children: &[ChildLayout]) -> Vec2 {
        let main = Axis::main(container.direction);
        let cross = main.cross();
        let along: f32 = children
            .iter()
            .map(|c| c.base(main) + main.pick(c.margin))
            .sum();
        let across = children
            .iter()
            .map(|c| c.base(cross) + cross.pick(c.margin))
            .fold(0.0, f32::max);
        main.pack(along, across)
    }

    fn compute_sizes(&self, container: &ContainerLayout, children: &[ChildLayout]) -> SizePass {
        let main = Axis::main(container.direction);
        let cross = main.cross();
        let main_limit = main.pick(container.content_size);
        let cross_limit = cross.pick(container.content_size);
        let stretch_major = container.major == LayoutAlign::Stretch;

        let mut mains: Vec<f32> = children
            .iter()
            .map(|c| match main.extent(c) {
                Extent::Auto if stretch_major => 0.0,
                _ => c.base(main),
            })
            .collect();

        let lines = Self::break_lines(
            container,
            main_limit,
            children
                .iter()
                .zip(&mains)
                .map(|(c, m)| m + main.pick(c.margin)),
        );

        for line in &lines {
            let occupied: f32 = line
                .iter()
                .map(|&i| mains[i] + main.pick(children[i].margin))
                .sum();
            let free = (main_limit - occupied).max(0.0);
            let mut remaining = free;
            for &i in line {
                if let Extent::Available(percent) = main.extent(&children[i]) {
                    mains[i] = (free * percent * 0.01).max(0.0);
                    remaining -= mains[i];
                }
            }
            if stretch_major {
                let stretched: Vec<usize> = line
                    .iter()
                    .copied()
                    .filter(|&i| main.extent(&children[i]) == Extent::Auto)
                    .collect();
                for (i, share) in stretched
                    .iter()
                    .zip(whole_pixel_shares(remaining, stretched.len()))
                {
                    mains[*i] = share;
                }
            }
        }

        let mut crosses: Vec<f32> = children
            .iter()
            .map(|c| match cross.extent(c) {
                Extent::Available(percent) => {
                    ((cross_limit - cross.pick(c.margin)).max(0.0) * percent * 0.01).max(0.0)
                }
                _ => c.base(cross),
            })
            .collect();

        if container.item == LayoutAlign::Stretch {
            let margin_crosses: Vec<f32> = children
                .iter()
                .zip(&crosses)
                .map(|(c, v)| v + cross.pick(c.margin))
                .collect();
            let line_crosses = Self::line_crosses(container, &lines, &margin_crosses);
            for (line, line_cross) in lines.iter().zip(line_crosses) {
                for &i in line {
                    if cross.extent(&children[i]) == Extent::Auto {
                        crosses[i] = (line_cross - cross.pick(children[i].margin)).max(0.0);
                    }
                }
            }
        }

        let major_total = children
            .iter()
            .zip(&mains)
            .map(|(c, m)| m + main.pick(c.margin))
            .sum();
        SizePass {
            sizes: mains
                .into_iter()
                .zip(crosses)
                .map(|(m, c)| main.pack(m, c))
                .collect(),
            major_total,
        }
    }

    fn compute_positions(
        &self,
        container: &ContainerLayout,
        children: &[ChildLayout],
        sizes: &[Vec2],
    ) -> Vec<Vec2> {
        let main = Axis::main(container.direction);
        let cross = main.cross();
        let main_limit = main.pick(container.content_size);
        let cross_limit = cross.pick(container.content_size);

        let boxes: Vec<Vec2> = children
            .iter()
            .zip(sizes)
            .map(|(c, s)| *s + c.margin)
            .collect();
        let lines = Self::break_lines(container, main_limit, boxes.iter().map(|b| main.pick(*b)));
        let crosses: Vec<f32> = boxes.iter().map(|b| cross.pick(*b)).collect();
        // Stretched items followed their line; they must not size it.
        let line_basis: Vec<f32> = children
            .iter()
            .zip(&crosses)
            .map(|(c, v)| {
                if container.item == LayoutAlign::Stretch && cross.extent(c) == Extent::Auto {
                    c.base(cross) + cross.pick(c.margin)
                } else {
                    *v
                }
            })
            .collect();
        let line_crosses = Self::line_crosses(container, &lines, &line_basis);

        let total_cross: f32 = line_crosses.iter().sum();
        let (mut cross_cursor, line_gap) =
            start_and_gap(cross_limit, total_cross, lines.len(), container.minor);

        let mut positions = vec![Vec2::ZERO; children.len()];
        for (line, line_cross) in lines.iter().zip(line_crosses) {
            let occupied: f32 = line.iter().map(|&i| main.pick(boxes[i])).sum();
            let (start, gap) = start_and_gap(main_limit, occupied, line.len(), container.major);
            let mut cursor = start;
            for &i in line {
                let offset = item_offset(line_cross, crosses[i], container.item);
                positions[i] = main.pack(cursor, cross_cursor + offset) + children[i].offset;
                cursor += main.pick(boxes[i]) + gap;
            }
            cross_cursor += line_cross + line_gap;
        }
        positions
    }
}
