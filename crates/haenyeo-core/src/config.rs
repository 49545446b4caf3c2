//! Tuning configuration.
//!
//! All fields are numeric and default to the values in
//! [`constants`](crate::constants). Every struct uses `#[serde(default)]`,
//! so a JSON file only needs the fields it overrides.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Complete tuning surface for the retrieval subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Seconds per simulation tick.
    pub tick_dt: f64,
    pub scan: ScanConfig,
    pub camera: CameraConfig,
    pub tether: TetherConfig,
    pub gather: GatherConfig,
    pub movement: MovementConfig,
}

/// Target scanner parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Sphere-cast radius around the view ray. 0 disables the widened pass.
    pub assist_radius: f64,
    /// Max hit distance along the view ray, also the reel's fallback reach.
    pub reel_reach: f64,
    /// Max player-to-hit-point distance for hand collection and gathering.
    pub gather_distance: f64,
    /// Collision layers the scan considers.
    pub layer_mask: u32,
    /// Whether trigger colliders are reported.
    pub include_triggers: bool,
}

/// Camera profiles and blend rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub normal_fov: f64,
    pub aim_fov: f64,
    pub normal_distance: f64,
    pub aim_distance: f64,
    pub normal_shoulder: DVec3,
    pub aim_shoulder: DVec3,
    /// Exponential smoothing rate (1/s).
    pub blend_rate: f64,
    /// Orbit pivot height above the player origin.
    pub pivot_height: f64,
}

/// Spring tether and rope parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetherConfig {
    pub spring_k: f64,
    pub damping: f64,
    pub reel_in_rate: f64,
    pub stop_distance: f64,
    pub max_hook_time: f64,
    pub rope_segments: usize,
    pub sag_ratio: f64,
    pub whip_influence: f64,
}

/// Gather sequence parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherConfig {
    /// Fraction of the animation segment at which collection fires, clamped to [0, 1].
    pub collect_at_fraction: f64,
    /// Number of clip frames in the gather segment.
    pub frames: u32,
}

/// Player locomotion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub move_speed: f64,
    /// Move speed multiplier while aiming.
    pub aim_speed_factor: f64,
    pub look_sensitivity: f64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            tick_dt: DT,
            scan: ScanConfig::default(),
            camera: CameraConfig::default(),
            tether: TetherConfig::default(),
            gather: GatherConfig::default(),
            movement: MovementConfig::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            assist_radius: AIM_ASSIST_RADIUS,
            reel_reach: REEL_REACH,
            gather_distance: GATHER_DISTANCE,
            layer_mask: LAYER_MASK_ALL,
            include_triggers: true,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            normal_fov: NORMAL_FOV,
            aim_fov: AIM_FOV,
            normal_distance: NORMAL_DISTANCE,
            aim_distance: AIM_DISTANCE,
            normal_shoulder: DVec3::from_array(NORMAL_SHOULDER),
            aim_shoulder: DVec3::from_array(AIM_SHOULDER),
            blend_rate: CAMERA_BLEND_RATE,
            pivot_height: CAMERA_PIVOT_HEIGHT,
        }
    }
}

impl Default for TetherConfig {
    fn default() -> Self {
        Self {
            spring_k: SPRING_K,
            damping: SPRING_DAMPING,
            reel_in_rate: REEL_IN_RATE,
            stop_distance: STOP_DISTANCE,
            max_hook_time: MAX_HOOK_TIME,
            rope_segments: ROPE_SEGMENTS,
            sag_ratio: ROPE_SAG,
            whip_influence: WHIP_INFLUENCE,
        }
    }
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            collect_at_fraction: COLLECT_AT_FRACTION,
            frames: GATHER_FRAMES,
        }
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            aim_speed_factor: AIM_SPEED_FACTOR,
            look_sensitivity: LOOK_SENSITIVITY,
        }
    }
}

impl TuningConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TuningConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tick_dt", self.tick_dt)?;

        non_negative("scan.assist_radius", self.scan.assist_radius)?;
        positive("scan.reel_reach", self.scan.reel_reach)?;
        non_negative("scan.gather_distance", self.scan.gather_distance)?;

        in_range("camera.normal_fov", self.camera.normal_fov, 1.0, 179.0)?;
        in_range("camera.aim_fov", self.camera.aim_fov, 1.0, 179.0)?;
        non_negative("camera.normal_distance", self.camera.normal_distance)?;
        non_negative("camera.aim_distance", self.camera.aim_distance)?;
        finite_vec("camera.normal_shoulder", self.camera.normal_shoulder)?;
        finite_vec("camera.aim_shoulder", self.camera.aim_shoulder)?;
        positive("camera.blend_rate", self.camera.blend_rate)?;
        finite("camera.pivot_height", self.camera.pivot_height)?;

        positive("tether.spring_k", self.tether.spring_k)?;
        positive("tether.damping", self.tether.damping)?;
        non_negative("tether.reel_in_rate", self.tether.reel_in_rate)?;
        positive("tether.stop_distance", self.tether.stop_distance)?;
        positive("tether.max_hook_time", self.tether.max_hook_time)?;
        if self.tether.rope_segments < 2 {
            return Err(ConfigError::TooFewSegments(self.tether.rope_segments));
        }
        non_negative("tether.sag_ratio", self.tether.sag_ratio)?;
        non_negative("tether.whip_influence", self.tether.whip_influence)?;

        in_range(
            "gather.collect_at_fraction",
            self.gather.collect_at_fraction,
            0.0,
            1.0,
        )?;

        non_negative("movement.move_speed", self.movement.move_speed)?;
        in_range(
            "movement.aim_speed_factor",
            self.movement.aim_speed_factor,
            0.0,
            1.0,
        )?;
        finite("movement.look_sensitivity", self.movement.look_sensitivity)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn finite_vec(field: &'static str, value: DVec3) -> Result<(), ConfigError> {
    for component in value.to_array() {
        finite(field, component)?;
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
