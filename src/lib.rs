//! Undertow - underwater current simulation
//!
//! A headless simulation of an underwater pilot moving through
//! volumetric current zones. The heavy lifting lives in the workspace
//! crates; this package adds configuration, scene building, and the
//! fixed-step driver.

pub mod config;
pub mod scene;
pub mod systems;
