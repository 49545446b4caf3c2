//! Target scanner: nearest eligible collectible along the view ray.

use glam::DVec3;
use hecs::{Entity, World};

use haenyeo_core::config::ScanConfig;
use haenyeo_core::types::Ray;

use crate::collectible;
use crate::components::ExclusionSet;
use crate::hierarchy;
use crate::spatial::{QueryHit, SpatialQuery};

/// Transient scan result, recomputed every tick while aiming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimTarget {
    /// Entity carrying the collectible.
    pub target: Entity,
    /// Collider that was hit.
    pub collider: Entity,
    pub distance: f64,
    pub point: DVec3,
    pub ray: Ray,
}

/// Scan limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanParams {
    pub assist_radius: f64,
    pub max_distance: f64,
    pub layer_mask: u32,
    pub include_triggers: bool,
}

impl From<&ScanConfig> for ScanParams {
    fn from(config: &ScanConfig) -> Self {
        Self {
            assist_radius: config.assist_radius,
            max_distance: config.reel_reach,
            layer_mask: config.layer_mask,
            include_triggers: config.include_triggers,
        }
    }
}

impl ExclusionSet {
    /// Whether `collider` is one of the owner's colliders or sits under an excluded root.
    pub fn excludes(&self, world: &World, collider: Entity) -> bool {
        self.colliders.contains(&collider) || self.roots.contains(&hierarchy::root_of(world, collider))
    }
}

/// Widened pass first, exact ray if it finds nothing eligible.
///
/// Pure query: no component is touched.
pub fn scan<Q: SpatialQuery + ?Sized>(
    world: &World,
    query: &Q,
    ray: &Ray,
    exclusion: &ExclusionSet,
    params: &ScanParams,
) -> Option<AimTarget> {
    if params.assist_radius > 0.0 {
        let hits = cast(query, ray, params.assist_radius, params);
        if let Some(found) = first_eligible(world, &hits, ray, exclusion, params) {
            return Some(found);
        }
    }
    let hits = cast(query, ray, 0.0, params);
    first_eligible(world, &hits, ray, exclusion, params)
}

fn cast<Q: SpatialQuery + ?Sized>(query: &Q, ray: &Ray, radius: f64, params: &ScanParams) -> Vec<QueryHit> {
    let mut hits = query.query(
        ray.origin,
        ray.direction,
        radius,
        params.max_distance,
        params.layer_mask,
        params.include_triggers,
    );
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

fn first_eligible(
    world: &World,
    hits: &[QueryHit],
    ray: &Ray,
    exclusion: &ExclusionSet,
    params: &ScanParams,
) -> Option<AimTarget> {
    hits.iter()
        .filter(|hit| hit.distance <= params.max_distance)
        .filter(|hit| !exclusion.excludes(world, hit.collider))
        .find_map(|hit| {
            let target = hierarchy::find_collectible(world, hit.collider)?;
            collectible::is_available(world, target).then_some(AimTarget {
                target,
                collider: hit.collider,
                distance: hit.distance,
                point: hit.point,
                ray: *ray,
            })
        })
}
