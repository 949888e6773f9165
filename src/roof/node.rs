use crate::topology::PitchId;

/// One axis segment seen from a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBinding {
    /// Index of the axis in the generator.
    pub axis_idx: usize,
    /// Incidence angle used for the radial sort.
    pub a0: f64,
    /// The axis ends at this node.
    pub reversed: bool,
    pub left: Option<PitchId>,
    pub right: Option<PitchId>,
    pub horizontal: bool,
    pub take_precedence: bool,
}

/// A point where axis segments meet, with the segments sorted by angle.
#[derive(Debug, Clone, Default)]
pub struct RoofAxisNode {
    pub bindings: Vec<AxisBinding>,
    /// Axis index of the segment the node hangs from.
    pub root: Option<usize>,
    /// Position of the root in `bindings`.
    pub center: usize,
    pub n_horizontal: usize,
    pub n_slope: usize,
}

impl RoofAxisNode {
    #[must_use]
    pub fn count(&self) -> usize {
        self.bindings.len()
    }

    /// Registers a segment; an ending segment becomes the root.
    pub fn add(&mut self, binding: AxisBinding) {
        if binding.horizontal {
            self.n_horizontal += 1;
        } else {
            self.n_slope += 1;
        }
        if binding.reversed {
            self.root = Some(binding.axis_idx);
        }
        self.bindings.push(binding);
    }

    /// The root binding, if the node has one.
    #[must_use]
    pub fn root_binding(&self) -> Option<&AxisBinding> {
        let root = self.root?;
        self.bindings.iter().find(|b| b.axis_idx == root)
    }

    /// Last binding in sorted order.
    #[must_use]
    pub fn last(&self) -> Option<&AxisBinding> {
        self.bindings.last()
    }

    /// Next binding counter-clockwise, wrapping to the first.
    #[must_use]
    pub fn left(&self, index: usize) -> &AxisBinding {
        if index + 1 >= self.count() {
            &self.bindings[0]
        } else {
            &self.bindings[index + 1]
        }
    }

    /// Previous binding, wrapping to the last.
    #[must_use]
    pub fn right(&self, index: usize) -> &AxisBinding {
        if index == 0 {
            &self.bindings[self.count() - 1]
        } else {
            &self.bindings[index - 1]
        }
    }

    /// Recomputes the position of the root.
    pub fn update_center(&mut self) {
        if let Some(root) = self.root {
            if let Some(i) = self.bindings.iter().position(|b| b.axis_idx == root) {
                self.center = i;
            }
        }
    }

    /// Sorts the bindings by incidence angle and relocates the root.
    ///
    /// Plain quicksort with a first-element pivot: equal angles end up in a
    /// fixed, input dependent order that the binding pass relies on.
    pub fn sort(&mut self) {
        quicksort_by_key(&mut self.bindings, |b| b.a0);
        self.update_center();
    }
}

fn quicksort_by_key<T>(array: &mut [T], key: impl Fn(&T) -> f64 + Copy) {
    if array.len() < 2 {
        return;
    }
    let pivot = partition(array, key);
    let (lo, hi) = array.split_at_mut(pivot);
    quicksort_by_key(lo, key);
    quicksort_by_key(&mut hi[1..], key);
}

fn partition<T>(array: &mut [T], key: impl Fn(&T) -> f64) -> usize {
    let mut pivot = 0;
    for i in 1..array.len() {
        if key(&array[i]) < key(&array[0]) {
            pivot += 1;
            array.swap(i, pivot);
        }
    }
    array.swap(pivot, 0);
    pivot
}
