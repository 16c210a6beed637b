//! Overlap filtering and events
//!
//! Trigger volumes detect bodies through a layer/mask system and report
//! membership changes as enter/exit events.

use bitflags::bitflags;

use crate::body::BodyKey;
use crate::volume::VolumeKey;

bitflags! {
    /// Overlap layers for filtering which bodies a trigger volume detects
    ///
    /// Each layer is a bit in a 32-bit mask. Bodies can belong to multiple
    /// layers; volumes declare which layers they detect via a mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OverlapLayer: u32 {
        /// Default layer for most bodies
        const DEFAULT = 1 << 0;
        /// Player-controlled vehicle
        const PILOT = 1 << 1;
        /// Autonomous creatures (fish, jellyfish)
        const CREATURE = 1 << 2;
        /// Loose debris carried by currents
        const DEBRIS = 1 << 3;
        /// Sensor regions (detect but exert no contact response)
        const SENSOR = 1 << 4;
        /// All layers
        const ALL = 0xFFFFFFFF;
    }
}

/// Overlap filter determining what a volume detects and what a body is
///
/// - `layer`: which layer(s) the owner belongs to
/// - `mask`: which layer(s) the owner detects
///
/// Detection is one-sided: a volume detects a body when the volume's mask
/// intersects the body's layer. Bodies never detect volumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlapFilter {
    /// Which layer(s) the owner belongs to
    pub layer: OverlapLayer,
    /// Which layer(s) the owner detects
    pub mask: OverlapLayer,
}

impl Default for OverlapFilter {
    fn default() -> Self {
        Self {
            layer: OverlapLayer::DEFAULT,
            mask: OverlapLayer::ALL,
        }
    }
}

impl OverlapFilter {
    /// Create a new overlap filter with specified layer and mask
    pub fn new(layer: OverlapLayer, mask: OverlapLayer) -> Self {
        Self { layer, mask }
    }

    /// Check whether this filter detects a body carrying `other`
    pub fn detects(&self, other: &Self) -> bool {
        self.mask.intersects(other.layer)
    }

    /// Create a filter for the player-controlled body
    pub fn pilot() -> Self {
        Self {
            layer: OverlapLayer::PILOT,
            mask: OverlapLayer::empty(),
        }
    }

    /// Create a filter for creature bodies
    pub fn creature() -> Self {
        Self {
            layer: OverlapLayer::CREATURE,
            mask: OverlapLayer::empty(),
        }
    }

    /// Create a filter for loose debris
    pub fn debris() -> Self {
        Self {
            layer: OverlapLayer::DEBRIS,
            mask: OverlapLayer::empty(),
        }
    }

    /// Create a filter for a sensor region detecting the given layers
    pub fn sensor(detects: OverlapLayer) -> Self {
        Self {
            layer: OverlapLayer::SENSOR,
            mask: detects,
        }
    }
}

/// Kind of membership transition reported by overlap resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlapKind {
    /// Body moved from outside the volume to inside
    Enter,
    /// Body moved from inside the volume to outside (or was destroyed)
    Exit,
}

/// A membership transition for one (volume, body) pair
#[derive(Clone, Copy, Debug)]
pub struct OverlapEvent {
    /// The volume whose membership changed
    pub volume: VolumeKey,
    /// The body that entered or exited
    pub body: BodyKey,
    /// Enter or exit
    pub kind: OverlapKind,
}
