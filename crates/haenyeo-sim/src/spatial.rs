//! Spatial Query Adapter over the ECS colliders.
//!
//! Only two shapes exist: spheres and axis-aligned boxes. A widened query
//! sweeps a sphere of `radius` along the ray, which is exact for sphere
//! colliders and uses the radius-expanded slab for boxes (corners are
//! slightly generous). A collider already overlapping the cast origin is
//! reported at distance 0.

use glam::DVec3;
use hecs::{Entity, World};

use haenyeo_core::components::Collider;
use haenyeo_core::enums::ColliderShape;

use crate::hierarchy;

/// One query result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryHit {
    pub collider: Entity,
    /// Closest point on the collider at the moment of contact.
    pub point: DVec3,
    pub normal: DVec3,
    /// Distance travelled along the ray.
    pub distance: f64,
}

/// Ray and sphere casts against the world's colliders.
pub trait SpatialQuery {
    /// All hits within `max_distance`, ordered by ascending distance.
    /// `radius == 0` is an exact ray query.
    fn query(
        &self,
        origin: DVec3,
        direction: DVec3,
        radius: f64,
        max_distance: f64,
        layer_mask: u32,
        include_triggers: bool,
    ) -> Vec<QueryHit>;
}

/// [`SpatialQuery`] over enabled [`Collider`] components.
pub struct WorldSpatialQuery<'w> {
    world: &'w World,
}

impl<'w> WorldSpatialQuery<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }
}

pub fn layer_matches(layer: u32, mask: u32) -> bool {
    1u32.checked_shl(layer).is_some_and(|bit| mask & bit != 0)
}

impl SpatialQuery for WorldSpatialQuery<'_> {
    fn query(
        &self,
        origin: DVec3,
        direction: DVec3,
        radius: f64,
        max_distance: f64,
        layer_mask: u32,
        include_triggers: bool,
    ) -> Vec<QueryHit> {
        let Some(dir) = direction.try_normalize() else {
            return Vec::new();
        };
        let radius = radius.max(0.0);

        let mut hits: Vec<QueryHit> = self
            .world
            .query::<&Collider>()
            .iter()
            .filter(|(_, c)| c.enabled && layer_matches(c.layer, layer_mask))
            .filter(|(_, c)| include_triggers || !c.is_trigger)
            .filter_map(|(entity, collider)| {
                let center = hierarchy::world_pose(self.world, entity)?.position;
                let hit = match collider.shape {
                    ColliderShape::Sphere { radius: r } => cast_sphere(origin, dir, radius, center, r),
                    ColliderShape::Box { half_extents } => {
                        cast_box(origin, dir, radius, center, DVec3::from_array(half_extents))
                    }
                }?;
                (hit.0 <= max_distance).then_some(QueryHit {
                    collider: entity,
                    distance: hit.0,
                    point: hit.1,
                    normal: hit.2,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.collider.to_bits().cmp(&b.collider.to_bits()))
        });
        hits
    }
}

/// Sphere of radius `cast` swept along the ray against a sphere collider.
fn cast_sphere(origin: DVec3, dir: DVec3, cast: f64, center: DVec3, r: f64) -> Option<(f64, DVec3, DVec3)> {
    let reach = r + cast;
    let oc = origin - center;
    if oc.length_squared() <= reach * reach {
        let normal = oc.try_normalize().unwrap_or(-dir);
        return Some((0.0, center + normal * r, normal));
    }

    let b = oc.dot(dir);
    let c = oc.length_squared() - reach * reach;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    if t < 0.0 {
        return None;
    }
    let normal = (origin + dir * t - center).try_normalize().unwrap_or(-dir);
    Some((t, center + normal * r, normal))
}

/// Slab test against the box grown by `cast` on every side.
fn cast_box(origin: DVec3, dir: DVec3, cast: f64, center: DVec3, half: DVec3) -> Option<(f64, DVec3, DVec3)> {
    let min = center - half;
    let max = center + half;
    let grown_min = min - DVec3::splat(cast);
    let grown_max = max + DVec3::splat(cast);

    if origin.cmpge(grown_min).all() && origin.cmple(grown_max).all() {
        let point = origin.clamp(min, max);
        let normal = (origin - point).try_normalize().unwrap_or(-dir);
        return Some((0.0, point, normal));
    }

    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;
    let mut normal = DVec3::ZERO;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        if d.abs() < 1e-12 {
            if o < grown_min[axis] || o > grown_max[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (grown_min[axis] - o) / d;
        let mut t1 = (grown_max[axis] - o) / d;
        let mut n = DVec3::ZERO;
        n[axis] = -d.signum();
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = n;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }
    if t_enter < 0.0 {
        return None;
    }
    let point = (origin + dir * t_enter).clamp(min, max);
    Some((t_enter, point, normal))
}

/// Distance from `point` to the closest enabled collider in `root`'s subtree.
/// Falls back to the root's position when the subtree has no enabled collider.
pub fn surface_distance(world: &World, root: Entity, point: DVec3) -> f64 {
    let closest = hierarchy::subtree(world, root)
        .into_iter()
        .filter_map(|entity| {
            let collider = *world.get::<&Collider>(entity).ok()?;
            if !collider.enabled {
                return None;
            }
            let center = hierarchy::world_pose(world, entity)?.position;
            Some(match collider.shape {
                ColliderShape::Sphere { radius } => (point.distance(center) - radius).max(0.0),
                ColliderShape::Box { half_extents } => {
                    let half = DVec3::from_array(half_extents);
                    point.distance(point.clamp(center - half, center + half))
                }
            })
        })
        .reduce(f64::min);

    match closest {
        Some(d) => d,
        None => hierarchy::world_pose(world, root)
            .map_or(f64::INFINITY, |pose| pose.position.distance(point)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_cast_widens_ray() {
        let center = DVec3::new(0.2, 0.0, -5.0);
        assert!(cast_sphere(DVec3::ZERO, DVec3::NEG_Z, 0.0, center, 0.1).is_none());
        let (t, point, _) = cast_sphere(DVec3::ZERO, DVec3::NEG_Z, 0.15, center, 0.1).unwrap();
        assert!(t > 4.7 && t < 5.0);
        assert!((point.distance(center) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_box_cast_reports_entry_face() {
        let (t, point, normal) =
            cast_box(DVec3::ZERO, DVec3::NEG_Z, 0.0, DVec3::new(0.0, 0.0, -5.0), DVec3::splat(0.5)).unwrap();
        assert!((t - 4.5).abs() < 1e-12);
        assert!((point.z + 4.5).abs() < 1e-12);
        assert_eq!(normal, DVec3::Z);
    }

    #[test]
    fn test_overlap_at_origin_is_distance_zero() {
        let (t, _, _) = cast_sphere(DVec3::ZERO, DVec3::NEG_Z, 0.0, DVec3::new(0.0, 0.0, -0.2), 0.4).unwrap();
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_layer_mask() {
        assert!(layer_matches(6, 1 << 6));
        assert!(!layer_matches(6, 1 << 3));
        assert!(!layer_matches(40, u32::MAX));
    }
}
