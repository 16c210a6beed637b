//! 3D Mathematics Library
//!
//! This crate provides the vector and rotation types for the Undertow
//! simulation.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - rotation quaternion with basis accessors

mod vec3;
mod quat;

pub use vec3::Vec3;
pub use quat::Quat;
