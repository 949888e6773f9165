use slotmap::{new_key_type, SlotMap};

use crate::error::TopologyError;
use crate::roof::RoofPolygon;

new_key_type! {
    /// Unique identifier for a roof pitch in the [`PitchStore`].
    pub struct PitchId;
}

/// Central arena that owns every roof pitch.
///
/// Pitches reference their neighbours via [`PitchId`] (generational indices),
/// so merging or dropping a pitch never leaves a dangling reference behind.
#[derive(Debug, Default)]
pub struct PitchStore {
    pitches: SlotMap<PitchId, RoofPolygon>,
}

impl PitchStore {
    /// Creates a new, empty pitch store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pitch and returns its ID.
    pub fn add_pitch(&mut self, pitch: RoofPolygon) -> PitchId {
        self.pitches.insert(pitch)
    }

    /// Returns a reference to the pitch, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the pitch is not in the store.
    pub fn pitch(&self, id: PitchId) -> Result<&RoofPolygon, TopologyError> {
        self.pitches
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("pitch".into()))
    }

    /// Returns a mutable reference to the pitch, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the pitch is not in the store.
    pub fn pitch_mut(&mut self, id: PitchId) -> Result<&mut RoofPolygon, TopologyError> {
        self.pitches
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("pitch".into()))
    }

    /// Borrows two distinct pitches mutably at once.
    ///
    /// # Errors
    ///
    /// Returns an error if either pitch is missing or both IDs are the same.
    pub fn pair_mut(
        &mut self,
        a: PitchId,
        b: PitchId,
    ) -> Result<(&mut RoofPolygon, &mut RoofPolygon), TopologyError> {
        if a == b {
            return Err(TopologyError::InvalidTopology(
                "a pitch cannot be bound to itself".into(),
            ));
        }
        let [pa, pb] = self
            .pitches
            .get_disjoint_mut([a, b])
            .ok_or_else(|| TopologyError::EntityNotFound("pitch".into()))?;
        Ok((pa, pb))
    }

    /// Removes a pitch, returning it if it was present.
    pub fn remove(&mut self, id: PitchId) -> Option<RoofPolygon> {
        self.pitches.remove(id)
    }

    /// Whether the store holds `id`.
    #[must_use]
    pub fn contains(&self, id: PitchId) -> bool {
        self.pitches.contains_key(id)
    }

    /// Number of pitches in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }
}
