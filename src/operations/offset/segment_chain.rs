use crate::error::{OperationError, Result};
use crate::geometry::Segment;

/// Offsets a chain of segments, joining every corner with [`Segment::make_offset`].
///
/// Each segment carries its own offset distance (positive = right). A closed
/// chain also joins its last segment back onto the first.
#[derive(Debug)]
pub struct OffsetChain {
    segs: Vec<Segment>,
    distances: Vec<f64>,
    closed: bool,
}

impl OffsetChain {
    /// Creates an offset chain with the same distance for every segment.
    #[must_use]
    pub fn new(segs: Vec<Segment>, distance: f64) -> Self {
        let distances = vec![distance; segs.len()];
        Self {
            segs,
            distances,
            closed: false,
        }
    }

    /// Creates an offset chain with one distance per segment.
    #[must_use]
    pub fn with_distances(segs: Vec<Segment>, distances: Vec<f64>) -> Self {
        Self {
            segs,
            distances,
            closed: false,
        }
    }

    /// Treats the chain as a closed loop.
    #[must_use]
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` when the chain is empty or the
    /// distance count does not match the segment count.
    pub fn execute(&self) -> Result<Vec<Segment>> {
        if self.segs.is_empty() {
            return Err(OperationError::InvalidInput("empty segment chain".to_owned()).into());
        }
        if self.distances.len() != self.segs.len() {
            return Err(OperationError::InvalidInput(format!(
                "{} distances for {} segments",
                self.distances.len(),
                self.segs.len()
            ))
            .into());
        }

        let mut out: Vec<Segment> = Vec::with_capacity(self.segs.len());
        for (seg, &d) in self.segs.iter().zip(&self.distances) {
            let next = seg.make_offset(d, out.last_mut());
            out.push(next);
        }

        if self.closed {
            close(&self.segs, self.distances[0], &mut out);
        }
        Ok(out)
    }
}

/// Re-joins the last offset segment onto the first one, keeping the first
/// segment's already joined end.
fn close(segs: &[Segment], first_distance: f64, out: &mut [Segment]) {
    if out.len() < 2 {
        return;
    }
    let n = out.len();
    let p1 = out[0].p1();
    let mut first = segs[0].make_offset(first_distance, Some(&mut out[n - 1]));
    first.set_p1(p1);
    out[0] = first;
}
