//! Simulation session
//!
//! Owns the physics world, the current zones, and the optional pilot
//! controller, and drives them in a fixed per-tick order:
//!
//! 1. Trigger overlap resolution (zone membership updates)
//! 2. Movement advance, then zone advances
//! 3. Physics integration
//! 4. Post-integration speed cap
//!
//! Movement runs before the zones so a zone's velocity-change blends land
//! on top of the controller's output and are never wiped by a velocity
//! assignment within the same tick.

use crate::cues::CueSink;
use crate::current::CurrentZone;
use crate::movement::MovementController;
use undertow_input::InputSnapshot;
use undertow_physics::{OverlapKind, PhysicsWorld};

/// A running simulation: world, zones, and pilot
pub struct Session {
    physics: PhysicsWorld,
    zones: Vec<CurrentZone>,
    controller: Option<MovementController>,
}

impl Session {
    /// Create a session around a prepared physics world
    pub fn new(physics: PhysicsWorld) -> Self {
        Self {
            physics,
            zones: Vec::new(),
            controller: None,
        }
    }

    /// The underlying physics world
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Mutable access to the underlying physics world
    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// Add a current zone, returning its index
    pub fn add_zone(&mut self, zone: CurrentZone) -> usize {
        self.zones.push(zone);
        self.zones.len() - 1
    }

    /// All zones, in registration order
    pub fn zones(&self) -> &[CurrentZone] {
        &self.zones
    }

    /// A zone by index
    pub fn zone(&self, index: usize) -> Option<&CurrentZone> {
        self.zones.get(index)
    }

    /// A zone by index, mutable
    pub fn zone_mut(&mut self, index: usize) -> Option<&mut CurrentZone> {
        self.zones.get_mut(index)
    }

    /// Install the pilot movement controller
    pub fn set_controller(&mut self, controller: MovementController) {
        self.controller = Some(controller);
    }

    /// The pilot movement controller, if installed
    pub fn controller(&self) -> Option<&MovementController> {
        self.controller.as_ref()
    }

    /// The pilot movement controller, mutable
    pub fn controller_mut(&mut self) -> Option<&mut MovementController> {
        self.controller.as_mut()
    }

    /// Run one fixed simulation step
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32, cues: &mut dyn CueSink) {
        // 1. Overlap resolution feeds zone membership
        for event in self.physics.update_overlaps() {
            for zone in &mut self.zones {
                if zone.volume() == event.volume {
                    match event.kind {
                        OverlapKind::Enter => zone.on_body_enter(event.body, cues),
                        OverlapKind::Exit => zone.on_body_exit(event.body, cues),
                    }
                }
            }
        }

        // 2. Component advances: movement first, zones on top
        if let Some(controller) = &mut self.controller {
            controller.advance(&mut self.physics, input, dt);
        }
        for zone in &mut self.zones {
            zone.advance(&mut self.physics, dt, cues);
        }

        // 3. Integration
        self.physics.step(dt);

        // 4. Post-integration speed cap (force-additive policy)
        if let Some(controller) = &self.controller {
            controller.limit_speed(&mut self.physics);
        }
    }
}
