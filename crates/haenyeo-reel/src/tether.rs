//! Spring tether that reels a hooked target toward an anchor.
//!
//! State machine: Idle -> Hooked -> Resolved -> Idle. While hooked, the
//! rest length decays toward the stop distance and a damped spring drags the
//! target along the tether. The per-tick step is clamped to the current
//! extension, so the target can never pass the rest length and the
//! integration cannot oscillate.

use glam::DVec3;
use tracing::{debug, info};

use haenyeo_core::config::TetherConfig;
use haenyeo_core::constants::{TETHER_EPSILON, TIME_EPSILON};
use haenyeo_core::enums::{TetherOutcome, TetherPhase};

use crate::capability::HookTarget;
use crate::curve;

/// Integrator state of an active hook. Exists only while Hooked.
#[derive(Debug, Clone)]
pub struct TetherState {
    /// Spring natural length. Never increases while hooked.
    pub rest_length: f64,
    pub velocity: DVec3,
    /// Seconds since the hook landed.
    pub elapsed: f64,
    /// Anchor position when the hook landed.
    pub anchor_at_hook: DVec3,
    /// Target position after the previous step, for the rope's whip term.
    prev_target_pos: DVec3,
}

/// Owns the tether integration and the rope samples for the renderer.
#[derive(Debug, Clone)]
pub struct ReelSimulator {
    config: TetherConfig,
    phase: TetherPhase,
    state: Option<TetherState>,
    rope: Vec<DVec3>,
    last_outcome: Option<TetherOutcome>,
}

impl ReelSimulator {
    pub fn new(config: TetherConfig) -> Self {
        Self {
            config,
            phase: TetherPhase::Idle,
            state: None,
            rope: Vec::new(),
            last_outcome: None,
        }
    }

    pub fn config(&self) -> &TetherConfig {
        &self.config
    }

    pub fn phase(&self) -> TetherPhase {
        self.phase
    }

    pub fn state(&self) -> Option<&TetherState> {
        self.state.as_ref()
    }

    pub fn is_hooked(&self) -> bool {
        self.phase == TetherPhase::Hooked
    }

    /// Current rope samples, anchor first. Empty when not hooked.
    pub fn rope(&self) -> &[DVec3] {
        &self.rope
    }

    pub fn last_outcome(&self) -> Option<TetherOutcome> {
        self.last_outcome
    }

    /// Attach the tether to `target`.
    ///
    /// Returns false without side effects if a hook is already active, the
    /// target is gone, or its collectible gate is already consumed.
    pub fn hook<T: HookTarget + ?Sized>(&mut self, target: &mut T, anchor: DVec3) -> bool {
        if self.phase == TetherPhase::Hooked || !target.is_alive() || !target.is_available() {
            return false;
        }

        target.set_autonomous_motion_enabled(false);
        target.set_physics_gravity_owned(false);

        let position = target.position();
        let rest_length = anchor.distance(position).max(self.config.stop_distance);
        self.state = Some(TetherState {
            rest_length,
            velocity: DVec3::ZERO,
            elapsed: 0.0,
            anchor_at_hook: anchor,
            prev_target_pos: position,
        });
        self.phase = TetherPhase::Hooked;
        self.last_outcome = None;
        self.rope = curve::rope_curve(anchor, position, DVec3::ZERO, &self.config);

        info!(rest_length, "tether hooked");
        true
    }

    /// Advance the tether by `dt`. Returns the outcome on the tick the hook resolves.
    ///
    /// `anchor` is re-read every tick since it usually follows the player.
    pub fn tick<T: HookTarget + ?Sized>(&mut self, target: &mut T, anchor: DVec3, dt: f64) -> Option<TetherOutcome> {
        let Some(state) = self.state.as_mut() else {
            self.settle();
            return None;
        };

        if !target.is_alive() {
            return Some(self.resolve(target, TetherOutcome::TargetLost));
        }

        let cfg = &self.config;
        state.elapsed += dt;
        state.rest_length = (state.rest_length - cfg.reel_in_rate * dt).max(cfg.stop_distance);

        let position = target.position();
        let delta = anchor - position;
        let distance = delta.length();
        let dir = delta / distance.max(TETHER_EPSILON);
        let extension = (distance - state.rest_length).max(0.0);

        let along = state.velocity.dot(dir);
        let accel = cfg.spring_k * extension - cfg.damping * along;
        state.velocity += dir * accel * dt;

        let mut step = state.velocity * dt;
        let step_len = step.length();
        if step_len > extension {
            step = if step_len > 0.0 { step * (extension / step_len) } else { DVec3::ZERO };
        }
        let new_position = position + step;
        target.move_to(new_position);

        let observed_velocity = if dt > 0.0 {
            (new_position - state.prev_target_pos) / dt
        } else {
            DVec3::ZERO
        };
        state.prev_target_pos = new_position;
        self.rope = curve::rope_curve(anchor, new_position, observed_velocity, cfg);

        let surface = target.surface_distance(anchor);
        if surface <= cfg.stop_distance + TETHER_EPSILON {
            let outcome = if target.try_collect() {
                TetherOutcome::Collected
            } else {
                TetherOutcome::Forfeited
            };
            return Some(self.resolve(target, outcome));
        }

        if state.elapsed + TIME_EPSILON >= cfg.max_hook_time {
            return Some(self.resolve(target, TetherOutcome::TimedOut));
        }

        None
    }

    /// Resolved decays to Idle one tick after the outcome is published.
    pub fn settle(&mut self) {
        if self.state.is_none() && self.phase == TetherPhase::Resolved {
            self.phase = TetherPhase::Idle;
        }
    }

    /// Drop the hook without collecting. None if nothing was hooked.
    pub fn cancel<T: HookTarget + ?Sized>(&mut self, target: &mut T) -> Option<TetherOutcome> {
        self.release(target, TetherOutcome::Cancelled)
    }

    /// Force-resolve an active hook with `outcome`, e.g. when the owner despawns.
    pub fn release<T: HookTarget + ?Sized>(&mut self, target: &mut T, outcome: TetherOutcome) -> Option<TetherOutcome> {
        self.state.as_ref()?;
        Some(self.resolve(target, outcome))
    }

    /// Release everything the hook took. Runs on every exit path.
    fn resolve<T: HookTarget + ?Sized>(&mut self, target: &mut T, outcome: TetherOutcome) -> TetherOutcome {
        if target.is_alive() {
            target.set_autonomous_motion_enabled(true);
            target.set_physics_gravity_owned(true);
        }
        let elapsed = self.state.take().map(|s| s.elapsed).unwrap_or_default();
        self.rope.clear();
        self.phase = TetherPhase::Resolved;
        self.last_outcome = Some(outcome);

        match outcome {
            TetherOutcome::Collected => info!(elapsed, "tether collected target"),
            _ => debug!(?outcome, elapsed, "tether released"),
        }
        outcome
    }
}
