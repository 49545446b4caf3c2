//! Rope curve for the tether visual.
//!
//! A quadratic Bezier through anchor, control and target. The control point
//! is the span midpoint pushed down by a sag proportional to span length and
//! sideways by the target's lateral velocity, which reads as gravity droop
//! and whip without simulating the rope.

use glam::DVec3;

use haenyeo_core::config::TetherConfig;
use haenyeo_core::constants::WHIP_SCALE;

/// Quadratic Bezier: lerp(lerp(a, c, t), lerp(c, b, t), t).
pub fn bezier2(a: DVec3, control: DVec3, b: DVec3, t: f64) -> DVec3 {
    let p0 = a.lerp(control, t);
    let p1 = control.lerp(b, t);
    p0.lerp(p1, t)
}

/// Velocity minus its projection onto `axis` (unit).
pub fn lateral_component(velocity: DVec3, axis: DVec3) -> DVec3 {
    velocity - axis * velocity.dot(axis)
}

/// Middle control point of the rope between `anchor` and `target`.
pub fn control_point(anchor: DVec3, target: DVec3, target_velocity: DVec3, config: &TetherConfig) -> DVec3 {
    let span = target - anchor;
    let length = span.length();
    let mid = anchor + span * 0.5;

    let sag = DVec3::NEG_Y * (config.sag_ratio * length);

    let dir = if length > 1e-4 { span / length } else { DVec3::NEG_Z };
    let whip = lateral_component(target_velocity, dir) * config.whip_influence * WHIP_SCALE;

    mid + sag + whip
}

/// Sample the rope into `config.rope_segments` points (at least two).
pub fn rope_curve(anchor: DVec3, target: DVec3, target_velocity: DVec3, config: &TetherConfig) -> Vec<DVec3> {
    let n = config.rope_segments.max(2);
    let control = control_point(anchor, target, target_velocity, config);
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            bezier2(anchor, control, target, t)
        })
        .collect()
}
