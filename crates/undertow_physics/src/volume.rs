//! Trigger volumes
//!
//! A trigger volume is a region that reports overlap enter/exit without
//! participating in collision response. Membership edges are detected by
//! comparing each tick's overlap set against the previous one.

use crate::body::BodyKey;
use crate::overlap::{OverlapFilter, OverlapLayer};
use crate::shapes::Region;
use slotmap::new_key_type;

new_key_type! {
    /// Key to a trigger volume in the physics world
    ///
    /// Generational, like [`BodyKey`]: keys to removed volumes read as None.
    pub struct VolumeKey;
}

/// A placed trigger region
#[derive(Clone, Debug)]
pub struct TriggerVolume {
    /// The region covered by this volume
    pub region: Region,
    /// Which body layers this volume detects
    pub filter: OverlapFilter,
    /// Overlap set from the last resolution pass, in body insertion order
    pub(crate) inside: Vec<BodyKey>,
}

impl TriggerVolume {
    /// Create a volume detecting every layer
    pub fn new(region: Region) -> Self {
        Self {
            region,
            filter: OverlapFilter::sensor(OverlapLayer::ALL),
            inside: Vec::new(),
        }
    }

    /// Restrict detection to the given layers
    pub fn with_detects(mut self, detects: OverlapLayer) -> Self {
        self.filter = OverlapFilter::sensor(detects);
        self
    }

    /// Bodies currently overlapping the volume, as of the last resolution
    pub fn overlapping(&self) -> &[BodyKey] {
        &self.inside
    }
}
