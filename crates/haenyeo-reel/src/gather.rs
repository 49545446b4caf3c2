//! Gather interaction sequencer.
//!
//! Idle -> Triggered -> Playing | Locked -> Collected -> Idle. A trigger
//! starts the gather clip, suppresses every registered movement handle and
//! optionally records a freeze pose. After `duration * collect_at_fraction`
//! seconds the sequencer asks its owner to run the collectible contract and
//! releases everything it held in the same tick.
//!
//! Release is tied to [`MovementLock`]'s `Drop`, so completion, `cancel`,
//! and dropping the sequencer all restore movement.

use tracing::{debug, info, warn};

use haenyeo_core::constants::TIME_EPSILON;
use haenyeo_core::enums::GatherPhase;
use haenyeo_core::types::{clamp01, Pose};

use crate::capability::{AnimationPlayback, MovementLock, SuppressionHandle};

/// Everything needed to start one gather.
#[derive(Debug, Clone)]
pub struct GatherRequest<'a, T> {
    pub target: T,
    pub clip: &'a str,
    pub frame_count: u32,
    /// Point in the segment (0..1) at which the collection fires.
    pub collect_at_fraction: f64,
    /// Pose to hold the player at until release. None disables the freeze.
    pub freeze: Option<Pose>,
}

/// What the owner must do after a sequencer tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GatherTick<T> {
    /// No sequence running.
    Idle,
    /// Sequence running; re-assert the freeze pose if present.
    Holding { freeze: Option<Pose> },
    /// Delay elapsed and all locks released: run the collectible contract on `target`.
    Collect { target: T },
}

#[derive(Debug)]
struct ActiveGather<T> {
    target: T,
    delay: f64,
    elapsed: f64,
    lock: MovementLock,
    freeze: Option<Pose>,
}

/// Single-writer gather state machine for one player.
#[derive(Debug)]
pub struct GatherSequencer<T: Copy> {
    handles: Vec<SuppressionHandle>,
    phase: GatherPhase,
    active: Option<ActiveGather<T>>,
}

impl<T: Copy> GatherSequencer<T> {
    /// `handles` are the movement-suppression handles registered by the
    /// player's locomotion controllers.
    pub fn new(handles: Vec<SuppressionHandle>) -> Self {
        Self {
            handles,
            phase: GatherPhase::Idle,
            active: None,
        }
    }

    pub fn register(&mut self, handle: SuppressionHandle) {
        if !self.handles.iter().any(|h| h.same_as(&handle)) {
            self.handles.push(handle);
        }
    }

    pub fn phase(&self) -> GatherPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == GatherPhase::Idle
    }

    pub fn target(&self) -> Option<T> {
        self.active.as_ref().map(|a| a.target)
    }

    pub fn elapsed(&self) -> f64 {
        self.active.as_ref().map_or(0.0, |a| a.elapsed)
    }

    pub fn delay(&self) -> f64 {
        self.active.as_ref().map_or(0.0, |a| a.delay)
    }

    /// Number of movement handles currently suppressed by this sequencer.
    pub fn held(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.lock.held())
    }

    pub fn freeze(&self) -> Option<Pose> {
        self.active.as_ref().and_then(|a| a.freeze)
    }

    /// Start a gather. A no-op returning false unless Idle, or if the clip is unknown.
    pub fn trigger<A: AnimationPlayback + ?Sized>(&mut self, request: GatherRequest<'_, T>, playback: &mut A) -> bool {
        if self.phase != GatherPhase::Idle {
            debug!(phase = ?self.phase, "gather trigger ignored");
            return false;
        }

        let Some(duration) = playback.play_segment(request.clip, request.frame_count) else {
            warn!(clip = request.clip, "gather clip unavailable");
            return false;
        };
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        let delay = duration * clamp01(request.collect_at_fraction);

        let lock = MovementLock::acquire(&self.handles);
        info!(delay, suppressed = lock.held(), "gather started");

        self.active = Some(ActiveGather {
            target: request.target,
            delay,
            elapsed: 0.0,
            lock,
            freeze: request.freeze,
        });
        self.phase = GatherPhase::Triggered;
        true
    }

    pub fn tick(&mut self, dt: f64) -> GatherTick<T> {
        let Some(active) = self.active.as_mut() else {
            self.phase = GatherPhase::Idle;
            return GatherTick::Idle;
        };

        if self.phase == GatherPhase::Triggered {
            self.phase = if active.freeze.is_some() {
                GatherPhase::Locked
            } else {
                GatherPhase::Playing
            };
        }

        active.elapsed += dt;
        if active.elapsed + TIME_EPSILON < active.delay {
            return GatherTick::Holding { freeze: active.freeze };
        }

        // Locks and freeze go before the contract runs.
        let target = active.target;
        let elapsed = active.elapsed;
        self.active = None;
        self.phase = GatherPhase::Idle;
        debug!(elapsed, "gather delay elapsed");
        GatherTick::Collect { target }
    }

    /// Abort the running sequence, releasing every lock. Returns the abandoned target.
    pub fn cancel(&mut self) -> Option<T> {
        let active = self.active.take()?;
        self.phase = GatherPhase::Idle;
        info!(elapsed = active.elapsed, "gather cancelled");
        Some(active.target)
    }
}

impl<T: Copy> Drop for GatherSequencer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
