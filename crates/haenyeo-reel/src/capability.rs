//! Capabilities the retrieval state machines consume.
//!
//! Controllers, renderers and physics bodies expose these instead of being
//! looked up by type name at runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::DVec3;
use tracing::debug;

/// Something a gather sequence can switch off while it runs.
pub trait Suppressible {
    fn label(&self) -> &str;
    fn enable(&self);
    fn disable(&self);
    fn is_enabled(&self) -> bool;
}

/// Shared enable flag registered by a locomotion controller.
///
/// Clones share the flag: the controller keeps one and polls
/// [`is_enabled`](Suppressible::is_enabled), the sequencer holds another.
#[derive(Debug, Clone)]
pub struct SuppressionHandle {
    label: Arc<str>,
    enabled: Arc<AtomicBool>,
}

impl SuppressionHandle {
    pub fn new(label: &str) -> Self {
        Self {
            label: Arc::from(label),
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether two handles share the same flag.
    pub fn same_as(&self, other: &SuppressionHandle) -> bool {
        Arc::ptr_eq(&self.enabled, &other.enabled)
    }
}

impl Suppressible for SuppressionHandle {
    fn label(&self) -> &str {
        &self.label
    }

    fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

/// Holds the handles it disabled and re-enables them exactly once.
///
/// Only handles that were enabled at acquisition are held, so a handle
/// already suppressed by someone else is left alone on release. Dropping
/// the lock releases it.
#[derive(Debug, Default)]
pub struct MovementLock {
    held: Vec<SuppressionHandle>,
}

impl MovementLock {
    pub fn acquire<'a>(handles: impl IntoIterator<Item = &'a SuppressionHandle>) -> Self {
        let mut held = Vec::new();
        for handle in handles {
            if handle.is_enabled() {
                handle.disable();
                debug!(handle = handle.label(), "movement suppressed");
                held.push(handle.clone());
            }
        }
        Self { held }
    }

    /// Number of handles currently held.
    pub fn held(&self) -> usize {
        self.held.len()
    }

    /// Re-enable every held handle. Idempotent.
    pub fn release(&mut self) {
        for handle in self.held.drain(..) {
            handle.enable();
            debug!(handle = handle.label(), "movement restored");
        }
    }
}

impl Drop for MovementLock {
    fn drop(&mut self) {
        self.release();
    }
}

/// A hooked entity as seen by the reel simulator.
pub trait HookTarget {
    /// False once the entity has been destroyed.
    fn is_alive(&self) -> bool;
    /// The collectible's single-use gate.
    fn is_available(&self) -> bool;
    fn position(&self) -> DVec3;
    /// Direct positional displacement, bypassing physics.
    fn move_to(&mut self, position: DVec3);
    /// Distance from `point` to the closest point on the target's colliders.
    fn surface_distance(&self, point: DVec3) -> f64;
    fn set_autonomous_motion_enabled(&mut self, enabled: bool);
    fn set_physics_gravity_owned(&mut self, owned: bool);
    /// Invoke the collectible contract. True only on the first success.
    fn try_collect(&mut self) -> bool;
}

/// Animation playback on the player rig.
pub trait AnimationPlayback {
    /// Start `frame_count` frames of `clip` from its beginning and return the
    /// segment duration in seconds, or None if the clip is unknown.
    fn play_segment(&mut self, clip: &str, frame_count: u32) -> Option<f64>;
    fn stop(&mut self);
}
