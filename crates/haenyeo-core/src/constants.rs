//! Simulation constants and default tuning parameters.
//!
//! Every value here is the default for a field of
//! [`TuningConfig`](crate::config::TuningConfig); a loaded config overrides it.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Slack used when comparing accumulated tick time against a deadline,
/// so that 250 ticks of 0.02 s count as 5 s.
pub const TIME_EPSILON: f64 = 1e-9;

// --- Layers ---

/// Collision layer of ordinary world geometry.
pub const LAYER_DEFAULT: u32 = 0;

/// Collision layer of the player's own body.
pub const LAYER_PLAYER: u32 = 3;

/// Collision layer of harvestable objects.
pub const LAYER_COLLECTIBLE: u32 = 6;

/// Collision layer of swimming creatures.
pub const LAYER_FISH: u32 = 7;

/// Layer mask matching every layer.
pub const LAYER_MASK_ALL: u32 = u32::MAX;

// --- Target scanning ---

/// Sphere-cast radius added to the view ray (meters).
pub const AIM_ASSIST_RADIUS: f64 = 0.15;

/// Reach of the reel and of the aim scan (meters).
pub const REEL_REACH: f64 = 40.0;

/// Max distance from the player to the hit point for hand collection (meters).
pub const GATHER_DISTANCE: f64 = 3.0;

// --- Camera ---

/// Field of view while not aiming (degrees).
pub const NORMAL_FOV: f64 = 60.0;

/// Field of view while aiming (degrees).
pub const AIM_FOV: f64 = 45.0;

/// Follow distance while not aiming (meters).
pub const NORMAL_DISTANCE: f64 = 4.5;

/// Follow distance while aiming (meters).
pub const AIM_DISTANCE: f64 = 2.2;

/// Shoulder offset while not aiming (camera-local meters).
pub const NORMAL_SHOULDER: [f64; 3] = [0.5, 0.0, 0.0];

/// Shoulder offset while aiming (camera-local meters).
pub const AIM_SHOULDER: [f64; 3] = [0.8, 0.1, 0.0];

/// Exponential blend rate between camera profiles (1/s).
pub const CAMERA_BLEND_RATE: f64 = 12.0;

/// Height of the orbit pivot above the player origin (meters).
pub const CAMERA_PIVOT_HEIGHT: f64 = 1.5;

/// Pitch limit for look input (radians).
pub const MAX_PITCH: f64 = 1.5;

// --- Tether / reel ---

/// Spring constant of the tether (1/s²).
pub const SPRING_K: f64 = 40.0;

/// Damping applied to velocity along the tether (1/s).
pub const SPRING_DAMPING: f64 = 8.0;

/// Rest-length decay while reeling (m/s).
pub const REEL_IN_RATE: f64 = 10.0;

/// Surface distance at which a hooked target is collected (meters).
pub const STOP_DISTANCE: f64 = 1.3;

/// Safety timeout for a single hook (seconds).
pub const MAX_HOOK_TIME: f64 = 5.0;

/// Number of rope curve samples handed to the renderer.
pub const ROPE_SEGMENTS: usize = 24;

/// Rope droop as a fraction of span length.
pub const ROPE_SAG: f64 = 0.12;

/// Weight of the target's lateral velocity in the rope control point.
pub const WHIP_INFLUENCE: f64 = 0.25;

/// Fixed scale-down applied on top of `WHIP_INFLUENCE`.
pub const WHIP_SCALE: f64 = 0.05;

/// Guard against division by zero when normalizing the tether direction.
pub const TETHER_EPSILON: f64 = 1e-5;

// --- Gather sequence ---

/// Fraction of the gather animation segment after which collection fires.
pub const COLLECT_AT_FRACTION: f64 = 0.9;

/// Frames of the gather clip to play.
pub const GATHER_FRAMES: u32 = 60;

/// Default clip frame rate (frames per second).
pub const CLIP_FRAME_RATE: f64 = 30.0;

/// Name of the default gather clip.
pub const GATHER_CLIP: &str = "gather";

// --- Player movement ---

/// Swim speed (m/s).
pub const MOVE_SPEED: f64 = 4.0;

/// Move speed multiplier while aiming.
pub const AIM_SPEED_FACTOR: f64 = 0.6;

/// Look rate scale applied to look input (radians per unit).
pub const LOOK_SENSITIVITY: f64 = 1.0;

// --- Autonomous wander ---

/// Minimum wander speed (m/s).
pub const WANDER_MIN_SPEED: f64 = 1.3;

/// Maximum wander speed (m/s).
pub const WANDER_MAX_SPEED: f64 = 3.0;

/// Heading blend rate toward the wander goal (1/s).
pub const WANDER_TURN_RATE: f64 = 3.0;

/// Distance at which a wander goal counts as reached (meters).
pub const WANDER_ARRIVE_DISTANCE: f64 = 1.5;

/// Minimum seconds before a new wander goal is picked.
pub const WANDER_RETARGET_MIN: f64 = 2.0;

/// Maximum seconds before a new wander goal is picked.
pub const WANDER_RETARGET_MAX: f64 = 5.0;

/// Inset from the wander bounds when picking goals (meters).
pub const WANDER_BOUNDS_MARGIN: f64 = 2.0;

/// Gravity acceleration applied to non-kinematic bodies (m/s²).
pub const GRAVITY: f64 = -9.81;
