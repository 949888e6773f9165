use crate::error::Result;
use crate::geometry::Segment;
use crate::math::{angle_signed, Vector2};
use crate::topology::{PitchId, PitchStore};

use super::axis::RoofAxis;
use super::bind::{rotate_next_slope, rotate_node_slope};
use super::node::{AxisBinding, RoofAxisNode};
use super::pitch::{RoofPolygon, BOTTOM};

/// Registers the slope parts on their start node and drops repeated slopes
/// between two horizontal segments.
pub(super) fn add_constraints(nodes: &mut [RoofAxisNode], axes: &[RoofAxis]) {
    for (idx, axis) in axes.iter().enumerate() {
        if axis.is_horizontal() {
            continue;
        }
        nodes[axis.v0_idx].add(AxisBinding {
            axis_idx: idx,
            a0: axis.a0,
            reversed: false,
            left: None,
            right: None,
            horizontal: false,
            take_precedence: axis.take_precedence,
        });
    }

    for node in nodes.iter_mut() {
        node.sort();
        if node.n_horizontal > 1 {
            let mut last = None;
            node.bindings.retain(|b| {
                let dup = !b.horizontal && last == Some(false);
                last = Some(b.horizontal);
                !dup
            });
            node.update_center();
        }
    }
}

/// Bends the pitches around every node to follow its slope parts.
pub(super) fn apply(store: &mut PitchStore, nodes: &[RoofAxisNode], axes: &[RoofAxis]) -> Result<()> {
    for node in nodes {
        if node.n_horizontal == 1 {
            if node.n_slope > 0 {
                pin_end(store, node, axes)?;
            }
        } else {
            turn_between(store, node, axes)?;
        }
    }
    Ok(())
}

/// Single horizontal segment: each slope pins the eave corner on its side.
fn pin_end(store: &mut PitchStore, node: &RoofAxisNode, axes: &[RoofAxis]) -> Result<()> {
    let Some(root) = node.root_binding() else {
        return Ok(());
    };
    let (Some(left), Some(right)) = (root.left, root.right) else {
        return Ok(());
    };
    let seg = &axes[root.axis_idx].seg;
    let s0 = node.left(node.center);
    let a0 = axes[s0.axis_idx].seg.delta_angle(seg);
    pin_corner(store, &axes[s0.axis_idx].seg, if a0 < 0.0 { right } else { left }, root.reversed)?;

    if node.n_slope > 1 {
        let s1 = node.right(node.center);
        let a1 = axes[s1.axis_idx].seg.delta_angle(seg);
        // both slopes on the same side: the first one wins
        if a0 > 0.0 && a1 < 0.0 {
            pin_corner(store, &axes[s1.axis_idx].seg, right, root.reversed)?;
        } else if a0 < 0.0 && a1 > 0.0 {
            pin_corner(store, &axes[s1.axis_idx].seg, left, root.reversed)?;
        }
    }
    Ok(())
}

/// Moves the eave corner of `id` onto the slope line, at the next end when
/// the segment ends in the node.
fn pin_corner(store: &mut PitchStore, slope: &Segment, id: PitchId, at_end: bool) -> Result<()> {
    let pitch = store.pitch_mut(id)?;
    let Some(p) = slope.intersect(&pitch.segs[BOTTOM].seg).hit() else {
        tracing::warn!(at_end, "slope constraint parallel to the eave, ignored");
        return Ok(());
    };
    if at_end {
        pitch.move_next(p);
    } else {
        pitch.move_node(p);
    }
    Ok(())
}

/// Slopes between horizontal segments turn the shared corner of the pitch
/// that depends on the other one.
fn turn_between(store: &mut PitchStore, node: &RoofAxisNode, axes: &[RoofAxis]) -> Result<()> {
    for (i, s0) in node.bindings.iter().enumerate() {
        let s1 = node.left(i);
        let s2 = node.left(i + 1);
        if s1.horizontal {
            continue;
        }
        let slope = &axes[s1.axis_idx].seg;

        let turn = if s0.reversed {
            // contiguous right / right
            let Some(s2_right) = s2.right else { continue };
            if store.pitch(s2_right)?.backward {
                Turn::node(s2_right, false, false)
            } else {
                let Some(main) = s0.right else { continue };
                Turn::next(main, true, true)
            }
        } else if s2.reversed {
            // contiguous left / left
            let Some(s0_left) = s0.left else { continue };
            if store.pitch(s0_left)?.backward {
                Turn::node(s0_left, true, true)
            } else {
                let Some(main) = s2.left else { continue };
                Turn::next(main, false, false)
            }
        } else {
            // back to back
            let Some(s0_left) = s0.left else { continue };
            if store.pitch(s0_left)?.backward {
                Turn::node(s0_left, true, true)
            } else {
                let Some(main) = s2.right else { continue };
                Turn::node(main, false, false)
            }
        };

        let pitch = store.pitch(turn.main)?;
        let v = turn.reference(pitch);
        let Some(p) = slope.intersect(&pitch.segs[BOTTOM].seg).hit() else {
            tracing::warn!(axis = s1.axis_idx, "slope constraint misses the eave, ignored");
            continue;
        };
        let dp = p - slope.p0();
        let a0 = angle_signed(&dp, &v);
        let a0 = if turn.negate { -a0 } else { a0 };
        if turn.at_node {
            rotate_node_slope(store, turn.main, a0)?;
        } else {
            rotate_next_slope(store, turn.main, a0)?;
        }
    }
    Ok(())
}

/// Which corner of which pitch a slope turns, and the side the angle is
/// measured against.
struct Turn {
    main: PitchId,
    at_node: bool,
    negate: bool,
    /// Measure against the closing side instead of the side at the axis end.
    closing: bool,
}

impl Turn {
    fn node(main: PitchId, negate: bool, closing: bool) -> Self {
        Self {
            main,
            at_node: true,
            negate,
            closing,
        }
    }

    fn next(main: PitchId, negate: bool, closing: bool) -> Self {
        Self {
            main,
            at_node: false,
            negate,
            closing,
        }
    }

    /// Direction of the side the slope angle is measured from.
    fn reference(&self, pitch: &RoofPolygon) -> Vector2 {
        if self.closing {
            -pitch.segs[pitch.last_idx()].seg.v()
        } else {
            pitch.segs[1].seg.v()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use approx::assert_relative_eq;

    use crate::roof::{ConstraintType, RoofGenerator, RoofPart, RoofSettings, Side};

    fn slope_part(bound_idx: usize, a0: f64) -> RoofPart {
        RoofPart {
            bound_idx,
            a0,
            length: 2.0,
            constraint_type: ConstraintType::Slope,
            ..RoofPart::default()
        }
    }

    // ── constraints ──

    #[test]
    fn repeated_slopes_between_segments_are_dropped() {
        let mut roof = RoofGenerator::from_parts(
            RoofSettings::default(),
            &[
                RoofPart::default(),
                RoofPart {
                    bound_idx: 1,
                    ..RoofPart::default()
                },
                slope_part(1, FRAC_PI_4),
                slope_part(1, FRAC_PI_4 + 0.1),
            ],
        )
        .unwrap();
        roof.make_roof().unwrap();
        let node = &roof.nodes()[1];
        assert_eq!(node.n_horizontal, 2);
        assert_eq!(node.count(), 3);
    }

    #[test]
    fn end_slope_pins_the_eave_corner() {
        // slope at the end of the axis, turned 45 degrees to the left
        let mut roof = RoofGenerator::from_parts(
            RoofSettings::default(),
            &[RoofPart::default(), slope_part(1, FRAC_PI_4)],
        )
        .unwrap();
        roof.make_roof().unwrap();
        assert_eq!(roof.pans().len(), 2);
        let (_, left) = roof
            .pitches()
            .find(|(_, p)| p.side == Side::Left)
            .unwrap();
        // the slope line from (4, 0) at 45 degrees meets the eave y = 3 at x = 7
        let corner = left.segs[2].seg.p0();
        assert_relative_eq!(corner.x, 7.0, epsilon = 1e-9);
        assert_relative_eq!(corner.y, 3.0, epsilon = 1e-9);
        assert!((left.segs[1].seg.p1() - corner).norm() < 1e-9);
        // the right pitch keeps its rectangle
        let (_, right) = roof
            .pitches()
            .find(|(_, p)| p.side == Side::Right)
            .unwrap();
        assert_relative_eq!(right.segs[2].seg.p1().x, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn slope_between_segments_turns_the_dependent_corner() {
        // straight ridge split in two, slope hint at the junction
        let mut roof = RoofGenerator::from_parts(
            RoofSettings::default(),
            &[
                RoofPart::default(),
                RoofPart {
                    bound_idx: 1,
                    a0: 0.3,
                    ..RoofPart::default()
                },
                slope_part(1, FRAC_PI_2),
            ],
        )
        .unwrap();
        roof.make_roof().unwrap();
        assert_eq!(roof.pans().len(), 4);
        for (_, p) in roof.pitches() {
            assert!(p.slope.is_finite());
            assert!(p.width.is_finite());
        }
    }
}
