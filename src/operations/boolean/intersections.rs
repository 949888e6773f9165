use crate::geometry::Edge;
use crate::math::Point2;

/// A crossing between a boundary segment and a cutter segment.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    border_idx: usize,
    border_t: f64,
    cutter_idx: usize,
    cutter_t: f64,
    point: Point2,
}

/// A position along a closed chain.
#[derive(Debug, Clone, Copy)]
struct ChainPos {
    idx: usize,
    t: f64,
    point: Point2,
}

/// Walks two closed chains alternately between their crossings.
///
/// Starting at the first point of `border[s_start]`, copies boundary segments
/// up to the next crossing, then cutter segments up to the following crossing,
/// and so on until the loop closes, snapping the copies onto the crossing
/// points. Copies from `border` get `is_hole = !start_by_hole`, copies from
/// `cutter` get `is_hole = start_by_hole`.
///
/// Returns `true` with nothing appended when the chains do not cross.
/// Returns `false` when the crossings cannot be paired or the output grows
/// past `border.len() + cutter.len() + 1` segments (the cutter looped).
#[must_use]
pub fn get_intersections(
    border: &[Edge],
    cutter: &[Edge],
    s_start: usize,
    out: &mut Vec<Edge>,
    start_by_hole: bool,
) -> bool {
    if border.is_empty() || cutter.is_empty() || s_start >= border.len() {
        return true;
    }

    let mut inter = Vec::new();
    for (border_idx, s) in border.iter().enumerate() {
        for (cutter_idx, b) in cutter.iter().enumerate() {
            for (point, border_t, cutter_t) in s.seg.crossings(&b.seg) {
                inter.push(Crossing {
                    border_idx,
                    border_t,
                    cutter_idx,
                    cutter_t,
                    point,
                });
            }
        }
    }

    if inter.is_empty() {
        return true;
    }
    if inter.len() % 2 == 1 {
        tracing::warn!(crossings = inter.len(), "odd crossing count, cutter grazes the boundary");
        return false;
    }

    inter.sort_by(|a, b| {
        a.border_idx
            .cmp(&b.border_idx)
            .then(a.border_t.total_cmp(&b.border_t))
            .then(a.cutter_idx.cmp(&b.cutter_idx))
            .then(a.cutter_t.total_cmp(&b.cutter_t))
    });
    let order = inter
        .iter()
        .position(|c| c.border_idx >= s_start)
        .unwrap_or(0);
    inter.rotate_left(order);

    let ceiling = border.len() + cutter.len() + 1;
    let start = ChainPos {
        idx: s_start,
        t: 0.0,
        point: border[s_start].seg.p0(),
    };
    let mut pos = start;

    for pair in inter.chunks_exact(2) {
        let (enter, leave) = (pair[0], pair[1]);
        walk(
            border,
            pos,
            ChainPos {
                idx: enter.border_idx,
                t: enter.border_t,
                point: enter.point,
            },
            !start_by_hole,
            out,
        );
        walk(
            cutter,
            ChainPos {
                idx: enter.cutter_idx,
                t: enter.cutter_t,
                point: enter.point,
            },
            ChainPos {
                idx: leave.cutter_idx,
                t: leave.cutter_t,
                point: leave.point,
            },
            start_by_hole,
            out,
        );
        pos = ChainPos {
            idx: leave.border_idx,
            t: leave.border_t,
            point: leave.point,
        };
        if out.len() > ceiling {
            return false;
        }
    }

    // back to the start point, i.e. the end of the segment before s_start
    let before_start = (s_start + border.len() - 1) % border.len();
    walk(
        border,
        pos,
        ChainPos {
            idx: before_start,
            t: 1.0,
            point: start.point,
        },
        !start_by_hole,
        out,
    );

    out.len() <= ceiling
}

/// Copies `chain` segments from `from` to `to`, trimming both ends.
fn walk(chain: &[Edge], from: ChainPos, to: ChainPos, is_hole: bool, out: &mut Vec<Edge>) {
    let n = chain.len();
    let mut idx = from.idx;
    for step in 0..=n {
        let mut e = chain[idx];
        e.is_hole = is_hole;
        if step == 0 {
            e.seg.set_p0(from.point);
        }
        let last = idx == to.idx && (step > 0 || to.t >= from.t);
        if last {
            e.seg.set_p1(to.point);
            out.push(e);
            return;
        }
        out.push(e);
        idx = (idx + 1) % n;
    }
}
