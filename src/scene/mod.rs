//! Scene construction from configuration

mod scene_builder;

pub use scene_builder::{build_session, BuiltScene};
