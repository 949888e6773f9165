use std::f64::consts::TAU;

use crate::error::Result;
use crate::geometry::Segment;
use crate::math::{angle_signed, Point2, TOLERANCE};
use crate::topology::{PitchId, PitchStore};

use super::part::{AutoMode, Side};
use super::pitch::BOTTOM;

/// Upper bound on pitches visited by one propagation.
const MAX_PROPAGATION: usize = 1024;

/// Binds pitch `this` to `last`, its neighbour across a node.
///
/// Width and slope flow from `last` according to the auto mode of `this`, the
/// two eaves are joined at their intersection and both shared sides are tagged
/// with the link type of the corner. `ccw` tells on which side of `last` the
/// pitch turns.
///
/// # Errors
///
/// Returns an error if either pitch is missing from the store.
pub fn bind(store: &mut PitchStore, this_id: PitchId, last_id: PitchId, ccw: bool) -> Result<()> {
    let (this, last) = store.pair_mut(this_id, last_id)?;

    if last.backward {
        this.backward = this.side == last.side;
    }
    if this.side == last.side {
        last.next_cross = this.cross;
    } else {
        last.last_cross = this.cross;
    }
    this.last_cross = last.cross;

    if this.backward {
        this.next = Some(last_id);
        last.last = Some(this_id);
    } else {
        this.last = Some(last_id);
        last.next = Some(this_id);
    }

    match this.auto_mode {
        AutoMode::Auto => {
            this.width = last.width;
            this.slope = last.slope;
        }
        AutoMode::Width if this.width.abs() > TOLERANCE => {
            this.slope = last.slope * last.width / this.width;
        }
        AutoMode::Slope if this.slope.abs() > TOLERANCE => {
            this.width = last.width * last.slope / this.slope;
        }
        _ => {}
    }

    this.make_segments();
    last.make_segments();

    // parallel eaves keep their corners
    if let Some(p) = this.segs[BOTTOM].seg.intersect(&last.segs[BOTTOM].seg).hit() {
        this.move_node(p);
        if this.side == last.side {
            last.move_next(p);
        } else {
            last.move_node(p);
        }
    }

    if this.auto_mode == AutoMode::All {
        let eave: Segment = this.axis.offset(-this.width).into();
        if let Some(p0) = this.segs[1].seg.intersect(&eave).hit() {
            this.segs[BOTTOM].seg.set_p0(p0);
            this.segs[1].seg.set_p1(p0);
        }
        let li = this.last_idx();
        if let Some(p1) = this.segs[li].seg.intersect(&eave).hit() {
            this.segs[BOTTOM].seg.set_p1(p1);
            this.segs[li].seg.set_p0(p1);
        }
    }

    // v1 runs node -> next along the real axis
    let v1 = match this.side {
        Side::Left => this.axis.v,
        Side::Right => -this.axis.v,
    };
    let v0 = if this.side == last.side {
        match this.side {
            Side::Left => -last.axis.v,
            Side::Right => last.axis.v,
        }
    } else {
        match last.side {
            Side::Left => last.axis.v,
            Side::Right => -last.axis.v,
        }
    };
    let mut da = angle_signed(&v0, &v1);
    if ccw {
        if da < 0.0 {
            da += TAU;
        }
    } else if da > 0.0 {
        da -= TAU;
    }
    if this.side == last.side {
        last.next_link(0.5 * da);
    } else {
        last.node_link(0.5 * da);
    }
    this.node_link(-0.5 * da);
    Ok(())
}

/// Turns the eave corner on the next end of `id` by `a0` and pushes the new
/// corner to the following pitch.
///
/// # Errors
///
/// Returns an error if a pitch of the chain is missing from the store.
pub fn rotate_next_slope(store: &mut PitchStore, id: PitchId, a0: f64) -> Result<()> {
    let pitch = store.pitch_mut(id)?;
    let li = pitch.last_idx();
    let corner = match pitch.side {
        Side::Left => {
            pitch.segs[1].seg.rotate(a0);
            let hit = pitch.segs[BOTTOM].seg.intersect(&pitch.segs[1].seg).hit();
            hit.map(|p| (p, BOTTOM, 1))
        }
        Side::Right => {
            let mut ray = pitch.segs[li].seg.opposite();
            ray.rotate(-a0);
            ray.intersect(&pitch.segs[BOTTOM].seg).hit().map(|p| (p, li, BOTTOM))
        }
    };
    apply_corner(store, id, corner)
}

/// Turns the eave corner on the node end of `id` by `a0` and pushes the new
/// corner to the following pitch.
///
/// # Errors
///
/// Returns an error if a pitch of the chain is missing from the store.
pub fn rotate_node_slope(store: &mut PitchStore, id: PitchId, a0: f64) -> Result<()> {
    let pitch = store.pitch_mut(id)?;
    let li = pitch.last_idx();
    let corner = match pitch.side {
        Side::Left => {
            let mut ray = pitch.segs[li].seg.opposite();
            ray.rotate(-a0);
            ray.intersect(&pitch.segs[BOTTOM].seg).hit().map(|p| (p, li, BOTTOM))
        }
        Side::Right => {
            pitch.segs[1].seg.rotate(a0);
            let hit = pitch.segs[BOTTOM].seg.intersect(&pitch.segs[1].seg).hit();
            hit.map(|p| (p, BOTTOM, 1))
        }
    };
    apply_corner(store, id, corner)
}

/// Moves the corner `p` to the start of `segs[starts]` and the end of
/// `segs[ends]`, then hands it on along the chain.
fn apply_corner(store: &mut PitchStore, id: PitchId, corner: Option<(Point2, usize, usize)>) -> Result<()> {
    let Some((p, starts, ends)) = corner else {
        return Ok(());
    };
    let pitch = store.pitch_mut(id)?;
    pitch.segs[starts].seg.set_p0(p);
    pitch.segs[ends].seg.set_p1(p);

    let Some(next_id) = pitch.next else {
        return Ok(());
    };
    let next = store.pitch(next_id)?;
    match (next.auto_mode, next.backward) {
        (AutoMode::All, _) => Ok(()),
        (_, true) => propagate_backward(store, next_id, p),
        (_, false) => propagate_forward(store, next_id, p),
    }
}

/// Offsets the eave of `id` through `pt` and walks the change along the
/// `next` chain while the pitches stay in auto mode.
///
/// # Errors
///
/// Returns an error if a pitch of the chain is missing from the store.
pub fn propagate_forward(store: &mut PitchStore, id: PitchId, pt: Point2) -> Result<()> {
    propagate(store, id, pt, false)
}

/// Same as [`propagate_forward`] for pitches depending on their neighbour
/// against the axis direction.
///
/// # Errors
///
/// Returns an error if a pitch of the chain is missing from the store.
pub fn propagate_backward(store: &mut PitchStore, id: PitchId, pt: Point2) -> Result<()> {
    propagate(store, id, pt, true)
}

fn propagate(store: &mut PitchStore, mut id: PitchId, mut pt: Point2, backward: bool) -> Result<()> {
    for _ in 0..MAX_PROPAGATION {
        let pitch = store.pitch_mut(id)?;
        pitch.move_side(pt);
        if backward {
            pitch.move_next(pt);
        } else {
            pitch.move_node(pt);
        }

        let li = pitch.last_idx();
        let side = match (pitch.side, backward) {
            (Side::Left, true) | (Side::Right, false) => li,
            (Side::Left, false) | (Side::Right, true) => 1,
        };
        let Some(p) = pitch.segs[side].seg.intersect(&pitch.segs[BOTTOM].seg).hit() else {
            return Ok(());
        };
        if backward {
            pitch.move_node(p);
        } else {
            pitch.move_next(p);
        }

        let Some(next_id) = pitch.next else {
            return Ok(());
        };
        if store.pitch(next_id)?.auto_mode != AutoMode::Auto {
            return Ok(());
        }
        id = next_id;
        pt = p;
    }
    tracing::warn!(limit = MAX_PROPAGATION, "slope propagation stopped, pitch chain loops");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{EdgeKind, Line};
    use crate::math::Vector2;
    use crate::roof::{RoofAxis, RoofPart, RoofPolygon};

    fn axis(px: f64, py: f64, vx: f64, vy: f64, part: &RoofPart) -> RoofAxis {
        RoofAxis::new(Line::new(Point2::new(px, py), Vector2::new(vx, vy)), part)
    }

    // ── bind ──

    #[test]
    fn contiguous_left_pitches_share_the_eave_corner() {
        // axis 0 runs +x to (4, 0), axis 1 turns left to (4, 4)
        let part = RoofPart::default();
        let a0 = axis(0.0, 0.0, 4.0, 0.0, &part);
        let a1 = axis(4.0, 0.0, 0.0, 4.0, &part);
        let mut store = PitchStore::new();
        let last = store.add_pitch(RoofPolygon::new(&a0, Side::Left));
        let this = store.add_pitch(RoofPolygon::new(&a1, Side::Left));
        bind(&mut store, this, last, true).unwrap();

        let l = store.pitch(last).unwrap();
        let t = store.pitch(this).unwrap();
        assert_eq!(l.next, Some(this));
        assert_eq!(t.last, Some(last));
        let corner = Point2::new(1.0, 3.0);
        assert!((l.segs[BOTTOM].seg.p0() - corner).norm() < 1e-9);
        assert!((t.segs[BOTTOM].seg.p1() - corner).norm() < 1e-9);
        // inner corner of a left turn is a valley
        assert_eq!(l.segs[1].kind, EdgeKind::LinkValley);
        assert_eq!(t.segs[t.last_idx()].kind, EdgeKind::LinkValley);
    }

    #[test]
    fn outer_side_of_a_turn_is_a_hip() {
        let part = RoofPart::default();
        let a0 = axis(0.0, 0.0, 4.0, 0.0, &part);
        let a1 = axis(4.0, 0.0, 0.0, 4.0, &part);
        let mut store = PitchStore::new();
        let last = store.add_pitch(RoofPolygon::new(&a0, Side::Right));
        let this = store.add_pitch(RoofPolygon::new(&a1, Side::Right));
        bind(&mut store, this, last, false).unwrap();

        let l = store.pitch(last).unwrap();
        let t = store.pitch(this).unwrap();
        let corner = Point2::new(7.0, -3.0);
        assert!((l.segs[BOTTOM].seg.p1() - corner).norm() < 1e-9);
        assert!((t.segs[BOTTOM].seg.p0() - corner).norm() < 1e-9);
        assert_eq!(l.segs[l.last_idx()].kind, EdgeKind::LinkHip);
        assert_eq!(t.segs[1].kind, EdgeKind::LinkHip);
    }

    #[test]
    fn auto_mode_copies_width_and_slope() {
        let a0 = axis(0.0, 0.0, 4.0, 0.0, &RoofPart::default());
        let wide = RoofPart {
            width_left: 5.0,
            slope_left: 0.8,
            ..RoofPart::default()
        };
        let a1 = axis(4.0, 0.0, 0.0, 4.0, &wide);
        let mut store = PitchStore::new();
        let last = store.add_pitch(RoofPolygon::new(&a0, Side::Left));
        let this = store.add_pitch(RoofPolygon::new(&a1, Side::Left));
        bind(&mut store, this, last, true).unwrap();
        let t = store.pitch(this).unwrap();
        assert_relative_eq!(t.width, 3.0);
        assert_relative_eq!(t.slope, 0.3);
    }

    #[test]
    fn width_mode_keeps_the_eave_altitude() {
        let a0 = axis(0.0, 0.0, 4.0, 0.0, &RoofPart::default());
        let wide = RoofPart {
            width_left: 6.0,
            auto_left: AutoMode::Width,
            ..RoofPart::default()
        };
        let a1 = axis(4.0, 0.0, 0.0, 4.0, &wide);
        let mut store = PitchStore::new();
        let last = store.add_pitch(RoofPolygon::new(&a0, Side::Left));
        let this = store.add_pitch(RoofPolygon::new(&a1, Side::Left));
        bind(&mut store, this, last, true).unwrap();
        let t = store.pitch(this).unwrap();
        assert_relative_eq!(t.width, 6.0);
        assert_relative_eq!(t.slope, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn binding_to_itself_fails() {
        let a0 = axis(0.0, 0.0, 4.0, 0.0, &RoofPart::default());
        let mut store = PitchStore::new();
        let id = store.add_pitch(RoofPolygon::new(&a0, Side::Left));
        assert!(bind(&mut store, id, id, true).is_err());
    }

    // ── slope rotation ──

    #[test]
    fn rotate_next_slope_moves_the_far_corner() {
        let a0 = axis(0.0, 0.0, 4.0, 0.0, &RoofPart::default());
        let mut store = PitchStore::new();
        let mut pitch = RoofPolygon::new(&a0, Side::Left);
        pitch.make_segments();
        let id = store.add_pitch(pitch);
        // turn the side at the axis end 45 degrees outward
        rotate_next_slope(&mut store, id, -FRAC_PI_2 / 2.0).unwrap();
        let p = store.pitch(id).unwrap();
        let corner = p.segs[BOTTOM].seg.p0();
        assert_relative_eq!(corner.x, 7.0, epsilon = 1e-9);
        assert_relative_eq!(corner.y, 3.0, epsilon = 1e-9);
        assert!((p.segs[1].seg.p1() - corner).norm() < 1e-9);
    }

    #[test]
    fn propagation_follows_auto_neighbours() {
        let part = RoofPart::default();
        let a0 = axis(0.0, 0.0, 4.0, 0.0, &part);
        let a1 = axis(4.0, 0.0, 4.0, 0.0, &part);
        let mut store = PitchStore::new();
        let first = store.add_pitch(RoofPolygon::new(&a0, Side::Left));
        let second = store.add_pitch(RoofPolygon::new(&a1, Side::Left));
        bind(&mut store, second, first, true).unwrap();

        // a wider corner at the start of the second pitch
        propagate_forward(&mut store, second, Point2::new(4.0, 4.0)).unwrap();
        let p = store.pitch(second).unwrap();
        assert_relative_eq!(p.width, 4.0, epsilon = 1e-9);
        assert_relative_eq!(p.segs[BOTTOM].seg.p0().y, 4.0, epsilon = 1e-9);
        assert_relative_eq!(p.segs[BOTTOM].seg.p0().x, 8.0, epsilon = 1e-9);
    }
}
