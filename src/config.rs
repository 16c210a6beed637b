//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`UT_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use undertow_physics::PhysicsConfig;
use undertow_sim::{CurrentMode, MovementConfig, MovementPolicy};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulation stepping configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsSettings,
    /// Pilot configuration
    #[serde(default)]
    pub pilot: PilotConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Current zone placements
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            physics: PhysicsSettings::default(),
            pilot: PilotConfig::default(),
            input: InputConfig::default(),
            zones: Vec::new(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`UT_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // UT_SIMULATION__FIXED_DT=0.01 -> simulation.fixed_dt = 0.01
        figment = figment.merge(Env::prefixed("UT_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Simulation stepping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed physics timestep in seconds
    pub fixed_dt: f32,
    /// Cap on raw frame delta time (prevents spiral of death)
    pub max_frame_dt: f32,
    /// Simulated seconds the demo binary runs for
    pub demo_seconds: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 0.02,
            max_frame_dt: 0.25,
            demo_seconds: 10.0,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Net vertical acceleration (gravity minus buoyancy)
    pub gravity: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self { gravity: 0.0 }
    }
}

impl PhysicsSettings {
    /// Convert to the physics engine's config type
    pub fn to_physics_config(&self) -> PhysicsConfig {
        PhysicsConfig::new(self.gravity)
    }
}

/// Pilot body and movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Bounding radius for trigger overlap
    pub radius: f32,
    /// Translation policy
    pub policy: MovementPolicy,
    /// Movement tuning
    #[serde(default)]
    pub tuning: MovementConfig,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 0.0],
            radius: 0.5,
            policy: MovementPolicy::ForceAdditive,
            tuning: MovementConfig::default(),
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Input smoothing half-life in seconds (lower = more responsive)
    pub smoothing_half_life: f32,
    /// Enable input smoothing by default
    pub smoothing_enabled: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }
}

/// Shape of a configured current zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneShape {
    Sphere,
    Box,
}

/// One placed current zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Region shape
    pub shape: ZoneShape,
    /// Region center [x, y, z]
    pub center: [f32; 3],
    /// Sphere radius (sphere shape)
    pub radius: f32,
    /// Box half-extents [x, y, z] (box shape)
    pub half_extents: [f32; 3],
    /// Current force vector [x, y, z]
    pub force: [f32; 3],
    /// Blend mode
    pub mode: CurrentMode,
    /// Approach rate toward the current
    pub acceleration_rate: f32,
    /// Push-mode flow speed ceiling
    pub max_current_speed: f32,
    /// Shield grant duration in seconds (omit to disable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shield_duration: Option<f32>,
    /// Display color [r, g, b, a] for external debug rendering
    pub color: [f32; 4],
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            shape: ZoneShape::Sphere,
            center: [0.0, 0.0, 0.0],
            radius: 5.0,
            half_extents: [5.0, 5.0, 5.0],
            force: [0.0, 0.0, 5.0],
            mode: CurrentMode::Push,
            acceleration_rate: 10.0,
            max_current_speed: 60.0,
            shield_duration: None,
            color: [0.2, 0.5, 0.9, 0.4],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Seconds between pilot state reports in the demo binary
    pub report_interval: f32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_interval: 1.0,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
