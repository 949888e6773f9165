use std::collections::HashMap;

use crate::error::Result;
use crate::math::{normalize_angle, round_angle, TOLERANCE};
use crate::topology::{PitchId, PitchStore};

use super::part::Side;
use super::pitch::{RoofPolygon, BOTTOM};

/// Merges every pitch into its same side neighbour when both axes are
/// collinear, then drops the merged pitches from `pans` and the store.
///
/// References to a merged pitch are re-pointed to the pitch that absorbed it.
pub(super) fn merge_collinear(store: &mut PitchStore, pans: &mut Vec<PitchId>) -> Result<()> {
    let mut absorbed: HashMap<PitchId, PitchId> = HashMap::new();
    for &id in pans.iter() {
        let pan = store.pitch(id)?;
        let target = if pan.backward { pan.last } else { pan.next };
        let Some(target) = target.map(|t| resolve(&absorbed, t)) else {
            continue;
        };
        if target == id {
            continue;
        }
        let (into, from) = store.pair_mut(target, id)?;
        if into.side != from.side {
            continue;
        }
        let da = round_angle(normalize_angle(into.axis.angle() - from.axis.angle()));
        if da.abs() > TOLERANCE {
            continue;
        }
        absorb(into, from);
        absorbed.insert(id, target);
    }
    if absorbed.is_empty() {
        return Ok(());
    }
    tracing::debug!(merged = absorbed.len(), "collinear pitches merged");

    pans.retain(|id| !absorbed.contains_key(id));
    for &id in pans.iter() {
        let pitch = store.pitch_mut(id)?;
        for link in [&mut pitch.last, &mut pitch.next, &mut pitch.other_side] {
            *link = link.map(|l| resolve(&absorbed, l)).filter(|&l| l != id);
        }
    }
    for id in absorbed.keys() {
        store.remove(*id);
    }
    Ok(())
}

/// Follows the chain of merges starting at `id`.
fn resolve(absorbed: &HashMap<PitchId, PitchId>, mut id: PitchId) -> PitchId {
    for _ in 0..=absorbed.len() {
        match absorbed.get(&id) {
            Some(&t) => id = t,
            None => break,
        }
    }
    id
}

/// Grows `into` over `from`, taking over its far end.
fn absorb(into: &mut RoofPolygon, from: &RoofPolygon) {
    if from.backward {
        into.next = from.next;
    } else {
        into.last = from.last;
    }
    into.last_cross = from.last_cross;
    into.node_tri = from.node_tri;
    into.slope = from.slope;

    // the far end of `from` lies past the axis end of `into`
    let at_end = (from.backward == (from.side == Side::Right)) == into.backward;
    if at_end {
        into.axis.set_p1(from.axis.p1());
        into.segs[1] = from.segs[1];
        into.segs[BOTTOM].seg.set_p0(from.segs[BOTTOM].seg.p0());
    } else {
        into.axis.set_p0(from.axis.p0());
        let (li, fi) = (into.last_idx(), from.last_idx());
        into.segs[li] = from.segs[fi];
        into.segs[BOTTOM].seg.set_p1(from.segs[BOTTOM].seg.p1());
    }
    into.segs[0].seg = into.axis.into();
}

/// Clears every reference to `dropped` from the surviving `pans` and removes
/// the dropped pitches from the store.
pub(super) fn forget(store: &mut PitchStore, pans: &[PitchId], dropped: &[PitchId]) -> Result<()> {
    for &id in pans {
        let pitch = store.pitch_mut(id)?;
        for link in [&mut pitch.last, &mut pitch.next, &mut pitch.other_side] {
            if link.is_some_and(|l| dropped.contains(&l)) {
                *link = None;
            }
        }
    }
    for &id in dropped {
        store.remove(id);
    }
    Ok(())
}
