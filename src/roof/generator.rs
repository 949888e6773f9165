use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::Line;
use crate::math::{Point3, Vector2, TOLERANCE};
use crate::operations::boolean::{CutAblePolygon, Cutter};
use crate::topology::{PitchId, PitchStore};

use super::axis::RoofAxis;
use super::bind::bind;
use super::node::{AxisBinding, RoofAxisNode};
use super::part::{ConstraintType, RoofPart, RoofSettings, Side};
use super::pitch::RoofPolygon;
use super::{merge, slope, triangular};

/// Outer loop and hole loops of one finished pitch, in 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLoops {
    pub pitch: PitchId,
    pub outer: Vec<Point3>,
    pub holes: Vec<Vec<Point3>>,
}

/// Builds the network of roof pitches from a tree of parts.
///
/// # Example
///
/// ```
/// use roofgen::roof::{RoofGenerator, RoofPart, RoofSettings};
///
/// let mut roof = RoofGenerator::from_parts(RoofSettings::default(), &[RoofPart::default()]).unwrap();
/// roof.make_roof().unwrap();
/// assert_eq!(roof.pans().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RoofGenerator {
    pub settings: RoofSettings,
    parts: Vec<RoofPart>,
    axes: Vec<RoofAxis>,
    nodes: Vec<RoofAxisNode>,
    store: PitchStore,
    pans: Vec<PitchId>,
}

impl RoofGenerator {
    /// Creates an empty generator.
    #[must_use]
    pub fn new(settings: RoofSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Creates a generator and adds `parts` in order.
    ///
    /// Parts hanging from a later part are skipped.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` when no part is usable, or
    /// `GeometryError::DegenerateAxis` when a part has a non-positive length.
    pub fn from_parts(settings: RoofSettings, parts: &[RoofPart]) -> Result<Self> {
        let mut gen = Self::new(settings);
        for (idx, part) in parts.iter().enumerate() {
            if part.bound_idx > idx {
                tracing::debug!(idx, bound_idx = part.bound_idx, "part hangs from a later part, skipped");
                continue;
            }
            gen.add_part(part)?;
        }
        if gen.axes.is_empty() {
            return Err(OperationError::InvalidInput("roof has no part".to_owned()).into());
        }
        Ok(gen)
    }

    /// Appends a part, hanging it from the end of part `bound_idx - 1`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateAxis` when the length is not positive,
    /// or `GeometryError::ParentOutOfRange` when `bound_idx` points past the
    /// existing parts.
    pub fn add_part(&mut self, part: &RoofPart) -> Result<()> {
        if part.length <= 0.0 {
            return Err(GeometryError::DegenerateAxis(part.length).into());
        }
        if part.bound_idx > self.axes.len() {
            return Err(GeometryError::ParentOutOfRange {
                bound_idx: part.bound_idx,
                parts: self.axes.len(),
            }
            .into());
        }

        let mut a0 = part.a0;
        if part.constraint_type == ConstraintType::Slope && a0.abs() < TOLERANCE {
            a0 = FRAC_PI_2;
        }

        let line = match part.bound_idx.checked_sub(1).map(|i| &self.axes[i]) {
            Some(parent) => parent.branch(a0, part.length),
            None => Line::new(self.settings.origin, Vector2::new(a0.cos(), a0.sin()) * part.length),
        };
        let mut axis = RoofAxis::new(line, part);
        axis.a0 = a0;
        axis.v0_idx = self.axes.len().min(part.bound_idx);
        self.parts.push(*part);
        self.axes.push(axis);
        Ok(())
    }

    #[must_use]
    pub fn parts(&self) -> &[RoofPart] {
        &self.parts
    }

    #[must_use]
    pub fn axes(&self) -> &[RoofAxis] {
        &self.axes
    }

    #[must_use]
    pub fn nodes(&self) -> &[RoofAxisNode] {
        &self.nodes
    }

    /// Surviving pitches, triangular ends first.
    #[must_use]
    pub fn pans(&self) -> &[PitchId] {
        &self.pans
    }

    #[must_use]
    pub fn store(&self) -> &PitchStore {
        &self.store
    }

    /// Ridge altitude.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.settings.z
    }

    /// Returns the pitch `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pitch does not exist.
    pub fn pitch(&self, id: PitchId) -> Result<&RoofPolygon> {
        Ok(self.store.pitch(id)?)
    }

    /// Iterates over the surviving pitches in output order.
    pub fn pitches(&self) -> impl Iterator<Item = (PitchId, &RoofPolygon)> + '_ {
        self.pans
            .iter()
            .filter_map(|&id| self.store.pitch(id).ok().map(|p| (id, p)))
    }

    /// Builds every pitch from the axis tree.
    ///
    /// Runs from scratch on each call: previous pitches are discarded.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` when the generator has no part,
    /// or an error if the pitch arena gets out of sync.
    pub fn make_roof(&mut self) -> Result<()> {
        if self.axes.is_empty() {
            return Err(OperationError::InvalidInput("roof has no part".to_owned()).into());
        }
        self.store = PitchStore::new();
        self.pans.clear();
        self.init_first_axis();

        let mut nodes = vec![RoofAxisNode::default(); self.axes.len() + 1];
        let mut pairs = Vec::new();
        for idx in 0..self.axes.len() {
            self.axes[idx].v1_idx = idx + 1;
            let axis = self.axes[idx];
            if !axis.is_horizontal() {
                continue;
            }
            let left = self.store.add_pitch(RoofPolygon::new(&axis, Side::Left));
            let right = self.store.add_pitch(RoofPolygon::new(&axis, Side::Right));
            self.store.pitch_mut(left)?.other_side = Some(right);
            self.store.pitch_mut(right)?.other_side = Some(left);
            pairs.push((left, right));

            let binding = AxisBinding {
                axis_idx: idx,
                a0: axis.a0,
                reversed: false,
                left: Some(left),
                right: Some(right),
                horizontal: true,
                take_precedence: axis.take_precedence,
            };
            nodes[axis.v0_idx].add(binding);
            nodes[axis.v1_idx].add(AxisBinding {
                a0: -PI,
                reversed: true,
                ..binding
            });
        }

        // the roof start has no ending segment to hang from
        if let Some(first) = nodes[0].bindings.first() {
            nodes[0].root = Some(first.axis_idx);
        }
        for node in &mut nodes {
            node.sort();
            bind_node(&mut self.store, node)?;
        }
        // nodes hanging from a slope part have no root
        for &(left, right) in &pairs {
            self.store.pitch_mut(left)?.make_segments();
            self.store.pitch_mut(right)?.make_segments();
        }
        tracing::debug!(nodes = nodes.len(), pairs = pairs.len(), "pitches bound");

        slope::add_constraints(&mut nodes, &self.axes);
        slope::apply(&mut self.store, &nodes, &self.axes)?;

        let mut pans = triangular::make_ends(&mut self.store, &nodes, &self.axes, self.settings.is_t_child)?;
        pans.extend(pairs.iter().flat_map(|&(l, r)| [l, r]));
        merge::merge_collinear(&mut self.store, &mut pans)?;

        for &id in &pans {
            self.store.pitch_mut(id)?.limits();
        }
        tracing::debug!(pitches = pans.len(), "roof built");
        self.pans = pans;
        self.nodes = nodes;
        Ok(())
    }

    /// Slices every pitch by every cutter; pitches a cutter removes are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the pitch arena gets out of sync.
    pub fn cut(&mut self, cutters: &[Cutter]) -> Result<()> {
        let mut dropped = Vec::new();
        for &id in &self.pans {
            let pitch = self.store.pitch_mut(id)?;
            if !cutters.iter().all(|c| pitch.slice(c)) {
                dropped.push(id);
            }
        }
        if !dropped.is_empty() {
            tracing::debug!(dropped = dropped.len(), "pitches removed by cutters");
            self.pans.retain(|id| !dropped.contains(id));
            merge::forget(&mut self.store, &self.pans, &dropped)?;
        }
        for &id in &self.pans {
            self.store.pitch_mut(id)?.limits();
        }
        Ok(())
    }

    /// 3D loops of every surviving pitch at ridge altitude.
    #[must_use]
    pub fn face_loops(&self) -> Vec<FaceLoops> {
        let z = self.z();
        self.pitches()
            .map(|(pitch, p)| FaceLoops {
                pitch,
                outer: p.face_loop(z),
                holes: p.hole_loops(z),
            })
            .collect()
    }

    /// Seeds the first axis with the roof wide width and slope, per side.
    fn init_first_axis(&mut self) {
        let s = self.settings;
        let Some(a) = self.axes.first_mut() else {
            return;
        };
        if a.auto_left.inherits_width() {
            a.width_left = s.width_left;
        }
        if a.auto_right.inherits_width() {
            a.width_right = s.width_right;
        }
        if a.auto_left.inherits_slope() {
            a.slope_left = s.slope_left;
        }
        if a.auto_right.inherits_slope() {
            a.slope_right = s.slope_right;
        }
    }
}

/// Binds the pitches of a node around its precedence segment.
///
/// Segments on the right of the precedence one chain their right pitches from
/// the root, those on its left chain their left pitches; the opposite pitches
/// get the root values and depend backwards.
fn bind_node(store: &mut PitchStore, node: &RoofAxisNode) -> Result<()> {
    let Some(root) = node.root_binding().copied() else {
        return Ok(());
    };
    let (Some(left), Some(right)) = (root.left, root.right) else {
        return Ok(());
    };
    let n = node.count();
    if n < 2 {
        store.pitch_mut(left)?.make_segments();
        store.pitch_mut(right)?.make_segments();
        return Ok(());
    }

    let mut l_bind = left;
    let mut r_bind = right;

    if n == 2 {
        if let Some((s_left, s_right)) = node
            .bindings
            .iter()
            .find(|b| b.axis_idx != root.axis_idx)
            .and_then(pitch_pair)
        {
            link(store, s_right, r_bind, false)?;
            link(store, s_left, l_bind, true)?;
        }
        return Ok(());
    }

    let mut center = if n % 2 == 1 { (n - 1) / 2 } else { n / 2 };
    if let Some(i) = node.bindings.iter().position(|b| b.take_precedence) {
        center = i;
    }

    for (i, b) in node.bindings.iter().enumerate().skip(1) {
        let Some((s_left, s_right)) = pitch_pair(b) else {
            continue;
        };
        link(store, s_right, r_bind, false)?;
        if i >= center {
            break;
        }
        r_bind = s_left;
        inherit_backward(store, s_left, right)?;
    }

    for (i, b) in node.bindings.iter().rev().enumerate() {
        let Some((s_left, s_right)) = pitch_pair(b) else {
            continue;
        };
        link(store, s_left, l_bind, true)?;
        if i + center + 1 >= n {
            break;
        }
        l_bind = s_right;
        inherit_backward(store, s_right, left)?;
    }
    Ok(())
}

fn pitch_pair(b: &AxisBinding) -> Option<(PitchId, PitchId)> {
    Some((b.left?, b.right?))
}

/// Binds unless both ends are the same pitch.
fn link(store: &mut PitchStore, this: PitchId, last: PitchId, ccw: bool) -> Result<()> {
    if this == last {
        tracing::debug!("pitch bound to itself, skipped");
        return Ok(());
    }
    bind(store, this, last, ccw)
}

/// Gives an unbound pitch the root values and makes it depend backwards.
fn inherit_backward(store: &mut PitchStore, id: PitchId, root: PitchId) -> Result<()> {
    let (slope, width) = {
        let r = store.pitch(root)?;
        (r.slope, r.width)
    };
    let pitch = store.pitch_mut(id)?;
    if pitch.auto_mode.inherits_slope() {
        pitch.slope = slope;
    }
    if pitch.auto_mode.inherits_width() {
        pitch.width = width;
    }
    pitch.backward = true;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::RoofgenError;
    use crate::geometry::EdgeKind;
    use crate::math::Point2;
    use crate::operations::boolean::BooleanOp;
    use crate::roof::AutoMode;

    fn settings() -> RoofSettings {
        RoofSettings {
            z: 0.0,
            ..RoofSettings::default()
        }
    }

    fn build(parts: &[RoofPart]) -> RoofGenerator {
        let mut roof = RoofGenerator::from_parts(settings(), parts).unwrap();
        roof.make_roof().unwrap();
        roof
    }

    fn sides(roof: &RoofGenerator, axis_idx: usize) -> (&RoofPolygon, &RoofPolygon) {
        let node = &roof.nodes()[roof.axes()[axis_idx].v1_idx];
        let b = node.bindings.iter().find(|b| b.axis_idx == axis_idx).unwrap();
        (
            roof.pitch(b.left.unwrap()).unwrap(),
            roof.pitch(b.right.unwrap()).unwrap(),
        )
    }

    // ── parts ──

    #[test]
    fn parts_chain_from_their_parent_end() {
        let roof = RoofGenerator::from_parts(
            settings(),
            &[
                RoofPart::default(),
                RoofPart {
                    a0: FRAC_PI_2,
                    bound_idx: 1,
                    ..RoofPart::default()
                },
            ],
        )
        .unwrap();
        let a1 = roof.axes()[1];
        assert!((a1.p0() - Point2::new(4.0, 0.0)).norm() < 1e-12);
        assert!((a1.p1() - Point2::new(4.0, 4.0)).norm() < 1e-12);
        assert_eq!(a1.v0_idx, 1);
    }

    #[test]
    fn slope_part_without_angle_turns_a_quarter() {
        let mut roof = RoofGenerator::new(settings());
        roof.add_part(&RoofPart::default()).unwrap();
        roof.add_part(&RoofPart {
            bound_idx: 1,
            constraint_type: ConstraintType::Slope,
            ..RoofPart::default()
        })
        .unwrap();
        assert_relative_eq!(roof.axes()[1].a0, FRAC_PI_2);
    }

    #[test]
    fn parts_hanging_from_later_parts_are_skipped() {
        let roof = RoofGenerator::from_parts(
            settings(),
            &[
                RoofPart::default(),
                RoofPart {
                    bound_idx: 5,
                    ..RoofPart::default()
                },
            ],
        )
        .unwrap();
        assert_eq!(roof.axes().len(), 1);
    }

    #[test]
    fn malformed_parts_are_rejected() {
        assert!(RoofGenerator::from_parts(settings(), &[]).is_err());
        let mut roof = RoofGenerator::new(settings());
        let err = roof
            .add_part(&RoofPart {
                length: 0.0,
                ..RoofPart::default()
            })
            .unwrap_err();
        assert!(matches!(err, RoofgenError::Geometry(GeometryError::DegenerateAxis(_))));
        let err = roof
            .add_part(&RoofPart {
                bound_idx: 3,
                ..RoofPart::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            RoofgenError::Geometry(GeometryError::ParentOutOfRange { bound_idx: 3, parts: 0 })
        ));
        assert!(roof.make_roof().is_err());
    }

    // ── single segment ──

    #[test]
    fn single_segment_makes_two_rectangles() {
        let roof = build(&[RoofPart {
            a0: FRAC_PI_2,
            length: 4.0,
            ..RoofPart::default()
        }]);
        assert_eq!(roof.pans().len(), 2);
        for (_, p) in roof.pitches() {
            assert_eq!(p.segs.len(), 4);
            assert_relative_eq!(p.xsize, 4.0, epsilon = 1e-9);
            assert_relative_eq!(p.ysize, 3.0, epsilon = 1e-9);
            assert_relative_eq!(p.slope, 0.5);
            assert_relative_eq!(p.altitude(&p.segs[2].seg.p0()), -1.5, epsilon = 1e-9);
        }
        let (left, right) = sides(&roof, 0);
        assert_eq!(left.side, Side::Left);
        assert_eq!(right.side, Side::Right);
        assert!(left.segs[2].seg.p0().x < 0.0);
        assert!(right.segs[2].seg.p0().x > 0.0);
    }

    #[test]
    fn global_settings_seed_each_side_by_its_own_mode() {
        let roof = build(&[RoofPart {
            auto_left: AutoMode::All,
            width_left: 2.0,
            slope_left: 0.2,
            ..RoofPart::default()
        }]);
        let (left, right) = sides(&roof, 0);
        assert_relative_eq!(left.width, 2.0);
        assert_relative_eq!(left.slope, 0.2);
        assert_relative_eq!(right.width, 3.0);
        assert_relative_eq!(right.slope, 0.5);
    }

    // ── corners ──

    fn corner() -> RoofGenerator {
        build(&[
            RoofPart::default(),
            RoofPart {
                a0: FRAC_PI_2,
                bound_idx: 1,
                ..RoofPart::default()
            },
        ])
    }

    #[test]
    fn right_angle_corner_shares_the_eave_point() {
        let roof = corner();
        assert_eq!(roof.nodes()[1].n_horizontal, 2);
        assert_eq!(roof.pans().len(), 4);

        let (l0, r0) = sides(&roof, 0);
        let (l1, r1) = sides(&roof, 1);
        assert!((l0.segs[2].seg.p0() - l1.segs[2].seg.p1()).norm() < 1e-4);
        assert!((r0.segs[2].seg.p1() - r1.segs[2].seg.p0()).norm() < 1e-4);
        assert!((l0.segs[2].seg.p0() - Point2::new(1.0, 3.0)).norm() < 1e-9);
        assert!((r0.segs[2].seg.p1() - Point2::new(7.0, -3.0)).norm() < 1e-9);
    }

    #[test]
    fn corner_links_are_valley_inside_and_hip_outside() {
        let roof = corner();
        let (l0, r0) = sides(&roof, 0);
        let (l1, r1) = sides(&roof, 1);
        assert_eq!(l0.segs[1].kind, EdgeKind::LinkValley);
        assert_eq!(l1.segs[3].kind, EdgeKind::LinkValley);
        assert_eq!(r0.segs[3].kind, EdgeKind::LinkHip);
        assert_eq!(r1.segs[1].kind, EdgeKind::LinkHip);
        // inherited from the first part
        assert_relative_eq!(l1.slope, 0.5);
        assert_relative_eq!(r1.width, 3.0);
    }

    #[test]
    fn corner_pitches_meet_at_the_same_altitude() {
        let roof = corner();
        let (l0, _) = sides(&roof, 0);
        let (l1, _) = sides(&roof, 1);
        let p = l0.segs[2].seg.p0();
        assert_relative_eq!(l0.altitude(&p), l1.altitude(&p), epsilon = 1e-9);
    }

    #[test]
    fn make_roof_is_repeatable() {
        let parts = [
            RoofPart::default(),
            RoofPart {
                a0: FRAC_PI_2,
                bound_idx: 1,
                length: 3.0,
                ..RoofPart::default()
            },
            RoofPart {
                a0: -FRAC_PI_2,
                bound_idx: 1,
                length: 5.0,
                ..RoofPart::default()
            },
        ];
        let a = build(&parts);
        let mut b = build(&parts);
        b.make_roof().unwrap();
        assert_eq!(a.pans().len(), b.pans().len());
        for ((_, pa), (_, pb)) in a.pitches().zip(b.pitches()) {
            for (x, y) in [
                (pa.tmin, pb.tmin),
                (pa.tmax, pb.tmax),
                (pa.ysize, pb.ysize),
                (pa.xsize, pb.xsize),
                (pa.slope, pb.slope),
                (pa.width, pb.width),
            ] {
                assert_relative_eq!(x, y, epsilon = 1e-12);
            }
        }
    }

    // ── merge ──

    #[test]
    fn collinear_parts_merge_into_one_pitch_per_side() {
        let roof = build(&[
            RoofPart::default(),
            RoofPart {
                bound_idx: 1,
                ..RoofPart::default()
            },
        ]);
        assert_eq!(roof.pans().len(), 2);
        assert_eq!(roof.store().len(), 2);
        for (_, p) in roof.pitches() {
            assert_relative_eq!(p.xsize, 8.0, epsilon = 1e-9);
            assert_relative_eq!(p.ysize, 3.0, epsilon = 1e-9);
            assert!(p.last.is_none() || roof.store().contains(p.last.unwrap()));
            assert!(p.next.is_none() || roof.store().contains(p.next.unwrap()));
        }
    }

    // ── triangular ends ──

    #[test]
    fn triangular_end_adds_hipped_faces() {
        let roof = build(&[RoofPart {
            triangular_end: true,
            ..RoofPart::default()
        }]);
        assert_eq!(roof.pans().len(), 4);
        let tris: Vec<&RoofPolygon> = roof.pitches().map(|(_, p)| p).filter(|p| p.is_tri).collect();
        assert_eq!(tris.len(), 2);
        for t in tris {
            assert_eq!(t.segs.len(), 3);
            assert_relative_eq!(t.slope, 0.5, epsilon = 1e-9);
            assert_eq!(t.segs[0].kind, EdgeKind::LinkHip);
            assert_eq!(t.segs[1].kind, EdgeKind::Bottom);
            // the eave corners sit one width down the slope
            let eave = t.segs[1].seg.p0();
            assert_relative_eq!(t.altitude(&eave), -1.5, epsilon = 1e-9);
        }
        let (left, right) = sides(&roof, 0);
        assert!(left.node_tri && left.next_tri);
        assert!(right.node_tri && right.next_tri);
        assert_eq!(left.segs[1].kind, EdgeKind::LinkHip);
        assert!((left.segs[2].seg.p0() - Point2::new(7.0, 3.0)).norm() < 1e-9);
    }

    #[test]
    fn t_child_has_no_triangle_on_its_start() {
        let mut roof = RoofGenerator::from_parts(
            RoofSettings {
                is_t_child: true,
                ..settings()
            },
            &[RoofPart {
                triangular_end: true,
                ..RoofPart::default()
            }],
        )
        .unwrap();
        roof.make_roof().unwrap();
        assert_eq!(roof.pans().len(), 3);
    }

    // ── cut ──

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, op: BooleanOp) -> Cutter {
        Cutter::from_points(
            &[
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ],
            EdgeKind::Side,
            op,
        )
    }

    #[test]
    fn difference_cutter_trims_and_drops_pitches() {
        let mut roof = build(&[RoofPart::default()]);
        roof.cut(&[rect(-1.0, -4.0, 5.0, 0.5, BooleanOp::Difference)]).unwrap();
        assert_eq!(roof.pans().len(), 1);
        let (_, left) = roof.pitches().next().unwrap();
        assert_eq!(left.side, Side::Left);
        let ymin = left
            .segs
            .iter()
            .map(|e| e.seg.p0().y)
            .fold(f64::INFINITY, f64::min);
        assert_relative_eq!(ymin, 0.5, epsilon = 1e-9);
        assert!(left.segs.iter().any(|e| e.is_hole));
        assert_eq!(left.other_side, None);
    }

    #[test]
    fn distant_intersection_cutter_drops_everything() {
        let mut roof = build(&[RoofPart::default()]);
        roof.cut(&[rect(50.0, 50.0, 60.0, 60.0, BooleanOp::Intersection)]).unwrap();
        assert!(roof.pans().is_empty());
        assert!(roof.face_loops().is_empty());
    }

    // ── output ──

    #[test]
    fn face_loops_follow_the_pitch_outline() {
        let mut roof = RoofGenerator::from_parts(RoofSettings::default(), &[RoofPart::default()]).unwrap();
        roof.make_roof().unwrap();
        let loops = roof.face_loops();
        assert_eq!(loops.len(), 2);
        for l in &loops {
            assert_eq!(l.outer.len(), 4);
            assert!(l.holes.is_empty());
            let zmax = l.outer.iter().map(|p| p.z).fold(f64::NEG_INFINITY, f64::max);
            let zmin = l.outer.iter().map(|p| p.z).fold(f64::INFINITY, f64::min);
            assert_relative_eq!(zmax, 3.0, epsilon = 1e-9);
            assert_relative_eq!(zmin, 1.5, epsilon = 1e-9);
        }
    }
}
