//! Physics simulation for Undertow
//!
//! This crate provides the physics surface the gameplay layer drives:
//! - Rigid bodies held in a generational-key arena
//! - Trigger volumes with overlap enter/exit resolution
//! - Force/velocity command modes and fixed-step integration
//! - Overlap layer masks for sensor filtering

pub mod body;
pub mod overlap;
pub mod shapes;
pub mod volume;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, ForceMode, RigidBody};
pub use overlap::{OverlapEvent, OverlapFilter, OverlapKind, OverlapLayer};
pub use shapes::{Aabb3, Region, Sphere3};
pub use volume::{TriggerVolume, VolumeKey};
pub use world::{PhysicsConfig, PhysicsWorld};
