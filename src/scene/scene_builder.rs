//! Builds a simulation session from the application config
//!
//! Spawns the pilot body, registers each configured current zone's
//! trigger volume, and wires the movement controller. Handle resolution
//! failures here are fatal setup errors.

use crate::config::{AppConfig, ZoneConfig, ZoneShape};
use undertow_math::Vec3;
use undertow_physics::{OverlapFilter, PhysicsWorld, Region, RigidBody, TriggerVolume};
use undertow_sim::{
    CurrentZone, MovementController, ReferenceFrame, Session, SetupError,
};

/// A session built from config, plus the handles the driver needs
pub struct BuiltScene {
    pub session: Session,
    pub pilot: undertow_physics::BodyKey,
}

fn vec3(components: [f32; 3]) -> Vec3 {
    Vec3::new(components[0], components[1], components[2])
}

fn zone_region(config: &ZoneConfig) -> Region {
    match config.shape {
        ZoneShape::Sphere => Region::sphere(vec3(config.center), config.radius),
        ZoneShape::Box => Region::boxed(vec3(config.center), vec3(config.half_extents)),
    }
}

/// Build a session: physics world, pilot, zones, movement controller
pub fn build_session(config: &AppConfig) -> Result<BuiltScene, SetupError> {
    let mut physics = PhysicsWorld::with_config(config.physics.to_physics_config());

    let pilot = physics.add_body(
        RigidBody::new(vec3(config.pilot.start_position))
            .with_radius(config.pilot.radius)
            .with_filter(OverlapFilter::pilot()),
    );

    let mut session = Session::new(physics);

    for zone_config in &config.zones {
        let volume = session
            .physics_mut()
            .add_volume(TriggerVolume::new(zone_region(zone_config)));

        let mut zone = CurrentZone::new(
            session.physics(),
            volume,
            vec3(zone_config.force),
            zone_config.mode,
        )?
        .with_acceleration_rate(zone_config.acceleration_rate)
        .with_max_current_speed(zone_config.max_current_speed)
        .with_color(zone_config.color);
        if let Some(duration) = zone_config.shield_duration {
            zone = zone.with_shield_duration(duration);
        }
        session.add_zone(zone);
    }

    let controller = MovementController::new(
        session.physics_mut(),
        pilot,
        ReferenceFrame::default(),
        config.pilot.policy,
        config.pilot.tuning.clone(),
    )?;
    session.set_controller(controller);

    log::info!(
        "Built scene: pilot at {:?}, {} current zone(s)",
        config.pilot.start_position,
        session.zones().len()
    );

    Ok(BuiltScene { session, pilot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use undertow_sim::CurrentMode;

    #[test]
    fn test_build_empty_scene() {
        let config = AppConfig::default();
        let built = build_session(&config).expect("default config builds");

        assert_eq!(built.session.zones().len(), 0);
        assert!(built.session.controller().is_some());
        assert!(built.session.physics().contains_body(built.pilot));
    }

    #[test]
    fn test_build_scene_with_zones() {
        let mut config = AppConfig::default();
        config.zones.push(ZoneConfig::default());
        config.zones.push(ZoneConfig {
            shape: ZoneShape::Box,
            mode: CurrentMode::Override,
            shield_duration: Some(3.0),
            ..Default::default()
        });

        let built = build_session(&config).expect("config builds");
        assert_eq!(built.session.zones().len(), 2);
        assert_eq!(built.session.physics().volume_count(), 2);
        assert_eq!(built.session.zone(1).unwrap().mode(), CurrentMode::Override);
    }

    #[test]
    fn test_pilot_starts_at_configured_position() {
        let mut config = AppConfig::default();
        config.pilot.start_position = [1.0, -2.0, 3.0];

        let built = build_session(&config).unwrap();
        let body = built.session.physics().get_body(built.pilot).unwrap();
        assert_eq!(body.position, Vec3::new(1.0, -2.0, 3.0));
    }
}
