//! Camera blend between the normal and aiming profiles.
//!
//! Uses exponential smoothing, `current += (target - current) * (1 - e^(-rate*dt))`,
//! which is frame-rate independent and cannot overshoot: the blend factor
//! stays in [0, 1) so every axis moves monotonically toward its target.

use glam::{DQuat, DVec3, EulerRot};

use haenyeo_core::config::CameraConfig;
use haenyeo_core::types::{clamp01, Ray};

/// One set of third-person camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraProfile {
    /// Vertical field of view (degrees).
    pub fov: f64,
    /// Follow distance behind the pivot (meters).
    pub distance: f64,
    /// Camera-local offset of the pivot (meters).
    pub shoulder: DVec3,
}

impl CameraProfile {
    fn lerp(&self, target: &CameraProfile, alpha: f64) -> CameraProfile {
        CameraProfile {
            fov: self.fov + (target.fov - self.fov) * alpha,
            distance: self.distance + (target.distance - self.distance) * alpha,
            shoulder: self.shoulder + (target.shoulder - self.shoulder) * alpha,
        }
    }
}

/// Blend state. Mutated only by its owner; everyone else reads [`current`](Self::current).
#[derive(Debug, Clone)]
pub struct CameraBlend {
    normal: CameraProfile,
    aim: CameraProfile,
    current: CameraProfile,
    aiming: bool,
    rate: f64,
}

impl CameraBlend {
    pub fn new(normal: CameraProfile, aim: CameraProfile, rate: f64) -> Self {
        Self {
            normal,
            aim,
            current: normal,
            aiming: false,
            rate,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            CameraProfile {
                fov: config.normal_fov,
                distance: config.normal_distance,
                shoulder: config.normal_shoulder,
            },
            CameraProfile {
                fov: config.aim_fov,
                distance: config.aim_distance,
                shoulder: config.aim_shoulder,
            },
            config.blend_rate,
        )
    }

    pub fn set_aiming(&mut self, aiming: bool) {
        self.aiming = aiming;
    }

    pub fn aiming(&self) -> bool {
        self.aiming
    }

    /// Profile the blend is converging toward.
    pub fn target(&self) -> &CameraProfile {
        if self.aiming {
            &self.aim
        } else {
            &self.normal
        }
    }

    pub fn current(&self) -> &CameraProfile {
        &self.current
    }

    /// Advance the blend by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        let alpha = clamp01(1.0 - (-self.rate * dt.max(0.0)).exp());
        self.current = self.current.lerp(self.target(), alpha);
    }
}

/// Orientation of an orbit camera from yaw (about +Y) and pitch (about +X).
pub fn orbit_rotation(yaw: f64, pitch: f64) -> DQuat {
    DQuat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
}

/// View-center ray of a third-person camera orbiting `pivot`.
///
/// The camera sits `profile.distance` behind the pivot, shifted by the
/// shoulder offset in camera space, and looks along its local -Z.
pub fn view_ray(pivot: DVec3, yaw: f64, pitch: f64, profile: &CameraProfile) -> Ray {
    let rotation = orbit_rotation(yaw, pitch);
    let forward = rotation * DVec3::NEG_Z;
    let origin = pivot + rotation * profile.shoulder - forward * profile.distance;
    Ray::new(origin, forward)
}
