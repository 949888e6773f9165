use std::f64::consts::FRAC_PI_2;

use crate::geometry::{Edge, EdgeKind, Line, Segment};
use crate::math::{lift, round_angle, Point2, Point3, Vector2, Vector3, TOLERANCE};
use crate::operations::boolean::CutAblePolygon;
use crate::topology::PitchId;

use super::axis::RoofAxis;
use super::part::{AutoMode, Side};

/// Index of the eave segment in a freshly built pitch.
pub const BOTTOM: usize = 2;

/// One planar roof face.
///
/// The boundary runs counter-clockwise from the axis: `segs[0]` is the axis,
/// `segs[1]` the side at the axis end, `segs[2]` the eave and the last one the
/// side back to the axis start. A right pitch walks its axis backwards, so both
/// pitches of an axis lie on the left of their own `axis`.
#[derive(Debug, Clone)]
pub struct RoofPolygon {
    pub side: Side,
    /// Altitude drop per unit of distance from the axis.
    pub slope: f64,
    pub width: f64,
    pub auto_mode: AutoMode,
    /// The pitch depends on its neighbour against the axis direction.
    pub backward: bool,
    pub last: Option<PitchId>,
    pub next: Option<PitchId>,
    pub other_side: Option<PitchId>,
    /// Axis walked in this pitch's direction.
    pub axis: Line,
    /// Unit normal at the axis start, pointing away from the pitch.
    pub cross: Line,
    pub next_cross: Line,
    pub last_cross: Line,
    pub convex: bool,
    pub segs: Vec<Edge>,
    pub holes: Vec<Vec<Edge>>,
    /// A triangular pitch closes the axis start.
    pub node_tri: bool,
    /// A triangular pitch closes the axis end.
    pub next_tri: bool,
    /// This is a triangular end pitch.
    pub is_tri: bool,
    pub tmin: f64,
    pub tmax: f64,
    pub dt: f64,
    pub ysize: f64,
    pub xsize: f64,
    pub vx: Vector3,
    pub vy: Vector3,
    pub vz: Vector3,
}

impl RoofPolygon {
    /// Creates the `side` pitch of `axis`, with no boundary yet.
    #[must_use]
    pub fn new(axis: &RoofAxis, side: Side) -> Self {
        let line = axis.line();
        match side {
            Side::Left => Self::with_axis(line, side, axis.slope_left, axis.width_left, axis.auto_left),
            Side::Right => Self::with_axis(
                line.opposite(),
                side,
                axis.slope_right,
                axis.width_right,
                axis.auto_right,
            ),
        }
    }

    /// Creates a pitch hanging from `axis`, already oriented for `side`.
    #[must_use]
    pub fn with_axis(axis: Line, side: Side, slope: f64, width: f64, auto_mode: AutoMode) -> Self {
        let cross = fake_axis(&axis).sized_normal(0.0, -1.0);
        Self {
            side,
            slope,
            width,
            auto_mode,
            backward: false,
            last: None,
            next: None,
            other_side: None,
            axis,
            cross,
            next_cross: cross,
            last_cross: cross,
            convex: true,
            segs: Vec::new(),
            holes: Vec::new(),
            node_tri: false,
            next_tri: false,
            is_tri: false,
            tmin: 0.0,
            tmax: 1.0,
            dt: 1.0,
            ysize: 0.0,
            xsize: 0.0,
            vx: Vector3::zeros(),
            vy: Vector3::zeros(),
            vz: Vector3::zeros(),
        }
    }

    /// The axis used for distances: the real one, or a unit substitute when
    /// the real one has no length.
    #[must_use]
    pub fn fake_axis(&self) -> Line {
        fake_axis(&self.axis)
    }

    /// Index of the side segment back to the axis start.
    #[must_use]
    pub fn last_idx(&self) -> usize {
        self.segs.len().saturating_sub(1)
    }

    /// Builds the default rectangle when the pitch has no boundary yet.
    pub fn make_segments(&mut self) {
        if !self.segs.is_empty() {
            return;
        }
        let s0 = self.axis;
        let w = self.width;
        let s1 = s0.straight(w, 1.0).rotated(FRAC_PI_2);
        let s3 = s0.straight(w, 0.0).rotated(FRAC_PI_2).opposite();
        let s2 = Line::from_points(s1.p1(), s3.p0());
        self.segs = vec![
            Edge::new(s0, EdgeKind::Axis),
            Edge::new(s1, EdgeKind::Side),
            Edge::new(s2, EdgeKind::Bottom),
            Edge::new(s3, EdgeKind::Side),
        ];
    }

    /// Moves the eave corner on the node side.
    pub fn move_node(&mut self, p: Point2) {
        let li = self.last_idx();
        match self.side {
            Side::Left => {
                self.segs[li].seg.set_p0(p);
                self.segs[BOTTOM].seg.set_p1(p);
            }
            Side::Right => {
                self.segs[BOTTOM].seg.set_p0(p);
                self.segs[1].seg.set_p1(p);
            }
        }
    }

    /// Moves the eave corner on the next side.
    pub fn move_next(&mut self, p: Point2) {
        let li = self.last_idx();
        match self.side {
            Side::Left => {
                self.segs[BOTTOM].seg.set_p0(p);
                self.segs[1].seg.set_p1(p);
            }
            Side::Right => {
                self.segs[li].seg.set_p0(p);
                self.segs[BOTTOM].seg.set_p1(p);
            }
        }
    }

    /// Tags the side on the node end from the half angle to the neighbour.
    pub fn node_link(&mut self, da: f64) {
        let idx = match self.side {
            Side::Left => self.last_idx(),
            Side::Right => 1,
        };
        self.segs[idx].kind = link_kind(da);
    }

    /// Tags the side on the next end from the half angle to the neighbour.
    pub fn next_link(&mut self, da: f64) {
        let idx = match self.side {
            Side::Left => 1,
            Side::Right => self.last_idx(),
        };
        self.segs[idx].kind = link_kind(da);
    }

    /// Offsets the eave through `pt`, keeping the altitude of the eave.
    pub fn move_side(&mut self, pt: Point2) {
        let (d0, _) = self.distance(&self.segs[BOTTOM].seg.p0());
        let (d1, _) = self.distance(&pt);
        if d1.abs() < TOLERANCE {
            tracing::warn!(d0, "eave moved onto the axis, pitch left unchanged");
            return;
        }
        self.width = d1;
        self.slope = self.slope * d0 / d1;
        self.segs[BOTTOM].seg = self.segs[BOTTOM].seg.offset(d1 - d0);
    }

    /// Lateral distance from the axis and parameter along it.
    #[must_use]
    pub fn distance(&self, pt: &Point2) -> (f64, f64) {
        let pr = self.fake_axis().project(pt);
        (pr.distance, pr.t)
    }

    /// Altitude of `pt` relative to the ridge.
    #[must_use]
    pub fn altitude(&self, pt: &Point2) -> f64 {
        -self.distance(pt).0 * self.slope
    }

    /// Texture coordinates of `pt`.
    #[must_use]
    pub fn uv(&self, pt: &Point2) -> Point2 {
        let (d, t) = self.distance(pt);
        Point2::new((t - self.tmin) * self.xsize, d)
    }

    /// Computes the local frame and the extent of the boundary along the axis.
    pub fn limits(&mut self) {
        let fake = self.fake_axis();
        let mut tmin = f64::INFINITY;
        let mut tmax = f64::NEG_INFINITY;
        let mut ysize = f64::NEG_INFINITY;
        for e in &self.segs {
            let pr = fake.project(&e.seg.p0());
            tmin = tmin.min(pr.t);
            tmax = tmax.max(pr.t);
            ysize = ysize.max(pr.distance);
        }
        if self.segs.is_empty() {
            (tmin, tmax, ysize) = (0.0, 1.0, 0.0);
        }
        self.tmin = tmin;
        self.tmax = tmax;
        self.dt = tmax - tmin;
        self.ysize = ysize;
        self.xsize = fake.length() * self.dt;

        let d = fake.direction();
        let vx = -Vector3::new(d.x, d.y, 0.0);
        let vy = Vector3::new(-vx.y, vx.x, self.slope).normalize();
        self.vx = vx;
        self.vy = vy;
        self.vz = vx.cross(&vy);
    }

    /// Parameters and points where `seg` crosses the boundary, sorted along `seg`.
    #[must_use]
    pub fn intersect(&self, seg: &Segment) -> Vec<(f64, Point2)> {
        let mut it: Vec<(f64, Point2)> = self
            .segs
            .iter()
            .filter_map(|e| seg.intersect_ext(&e.seg))
            .map(|(p, t, _)| (t, p))
            .collect();
        it.sort_by(|a, b| a.0.total_cmp(&b.0));
        it
    }

    /// Boundary segment before `index`.
    #[must_use]
    pub fn last_seg(&self, index: usize) -> &Edge {
        neighbour(&self.segs, index, false)
    }

    /// Boundary segment after `index`.
    #[must_use]
    pub fn next_seg(&self, index: usize) -> &Edge {
        neighbour(&self.segs, index, true)
    }

    /// Outer boundary as 3D points at ridge altitude `z`.
    #[must_use]
    pub fn face_loop(&self, z: f64) -> Vec<Point3> {
        self.loop_points(&self.segs, z)
    }

    /// Hole boundaries as 3D points at ridge altitude `z`.
    #[must_use]
    pub fn hole_loops(&self, z: f64) -> Vec<Vec<Point3>> {
        self.holes.iter().map(|h| self.loop_points(h, z)).collect()
    }

    fn loop_points(&self, segs: &[Edge], z: f64) -> Vec<Point3> {
        segs.iter()
            .map(|e| {
                let p = e.seg.p0();
                lift(&p, z + self.altitude(&p))
            })
            .collect()
    }
}

impl CutAblePolygon for RoofPolygon {
    fn segs(&self) -> &[Edge] {
        &self.segs
    }

    fn set_segs(&mut self, segs: Vec<Edge>) {
        self.segs = segs;
    }

    fn add_hole(&mut self, hole: Vec<Edge>) {
        self.holes.push(hole);
    }

    fn set_convex(&mut self, convex: bool) {
        self.convex = convex;
    }
}

/// `segs[index ± 1]` with wrap around.
pub(crate) fn neighbour(segs: &[Edge], index: usize, forward: bool) -> &Edge {
    let n = segs.len();
    if forward {
        &segs[(index + 1) % n]
    } else {
        &segs[(index + n - 1) % n]
    }
}

fn fake_axis(axis: &Line) -> Line {
    if axis.length() < TOLERANCE {
        Line::new(axis.p, Vector2::new(1.0, 0.0))
    } else {
        *axis
    }
}

/// Hip when the half angle is wider than a right angle, valley when narrower.
fn link_kind(da: f64) -> EdgeKind {
    let right = round_angle(FRAC_PI_2);
    let da = round_angle(da).abs();
    if da < right {
        EdgeKind::LinkValley
    } else if da > right {
        EdgeKind::LinkHip
    } else {
        EdgeKind::Link
    }
}
