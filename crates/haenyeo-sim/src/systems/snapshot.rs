//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: never modifies the world.

use hecs::{Entity, World};

use haenyeo_core::components::{Collectible, Highlight, Visible};
use haenyeo_core::enums::GatherPhase;
use haenyeo_core::events::{AudioEvent, GameEvent};
use haenyeo_core::state::*;
use haenyeo_core::types::{Ray, SimTime};
use haenyeo_reel::camera::CameraBlend;
use haenyeo_reel::gather::GatherSequencer;
use haenyeo_reel::tether::ReelSimulator;

use crate::components::{CameraRig, Transform};
use crate::hierarchy;
use crate::scanner::AimTarget;

/// Engine-owned state the snapshot reads alongside the world.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub aiming: bool,
    pub camera: &'a CameraBlend,
    pub view_ray: Option<Ray>,
    pub aim_target: Option<AimTarget>,
    pub gather_distance: f64,
    pub highlighted: Option<Entity>,
    pub player: Option<Entity>,
    pub reel: &'a ReelSimulator,
    pub reel_target: Option<Entity>,
    pub gather: &'a GatherSequencer<Entity>,
    /// The gather collected during this tick.
    pub gather_collected: bool,
}

pub fn id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: &SnapshotContext<'_>,
    events: Vec<GameEvent>,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: ctx.time,
        aiming: ctx.aiming,
        camera: build_camera(ctx),
        aim_target: build_aim_target(world, ctx),
        highlighted: ctx.highlighted.map(id),
        player: build_player(world, ctx),
        reel: build_reel(ctx),
        gather: build_gather(ctx),
        collectibles: build_collectibles(world),
        events,
        audio_events,
    }
}

fn build_camera(ctx: &SnapshotContext<'_>) -> Option<CameraView> {
    let ray = ctx.view_ray?;
    let current = ctx.camera.current();
    Some(CameraView {
        fov: current.fov,
        distance: current.distance,
        shoulder: current.shoulder,
        view_ray: ray,
    })
}

fn build_aim_target(world: &World, ctx: &SnapshotContext<'_>) -> Option<AimTargetView> {
    let target = ctx.aim_target?;
    let within = ctx
        .player
        .and_then(|p| hierarchy::world_pose(world, p))
        .is_some_and(|pose| pose.position.distance(target.point) <= ctx.gather_distance);
    Some(AimTargetView {
        target: id(target.target),
        distance: target.distance,
        point: target.point,
        within_gather_distance: within,
    })
}

fn build_player(world: &World, ctx: &SnapshotContext<'_>) -> Option<PlayerView> {
    let player = ctx.player?;
    let transform = *world.get::<&Transform>(player).ok()?;
    let (yaw, pitch) = match world.get::<&CameraRig>(player) {
        Ok(rig) => (rig.yaw, rig.pitch),
        Err(_) => (transform.0.rotation.to_euler(glam::EulerRot::YXZ).0, 0.0),
    };
    Some(PlayerView {
        position: transform.0.position,
        yaw,
        pitch,
        frozen: ctx.gather.freeze().is_some(),
    })
}

fn build_reel(ctx: &SnapshotContext<'_>) -> ReelView {
    let state = ctx.reel.state();
    ReelView {
        phase: ctx.reel.phase(),
        target: ctx.reel_target.map(id),
        rest_length: state.map_or(0.0, |s| s.rest_length),
        elapsed: state.map_or(0.0, |s| s.elapsed),
        rope: ctx.reel.rope().to_vec(),
        outcome: ctx.reel.last_outcome(),
    }
}

fn build_gather(ctx: &SnapshotContext<'_>) -> GatherView {
    let phase = if ctx.gather_collected {
        GatherPhase::Collected
    } else {
        ctx.gather.phase()
    };
    GatherView {
        phase,
        target: ctx.gather.target().map(id),
        elapsed: ctx.gather.elapsed(),
        delay: ctx.gather.delay(),
        suppressed_handles: ctx.gather.held(),
        frozen: ctx.gather.freeze().is_some(),
    }
}

/// Collectibles sorted by id for a stable wire order.
fn build_collectibles(world: &World) -> Vec<CollectibleView> {
    let mut views: Vec<CollectibleView> = world
        .query::<(&Collectible, Option<&Visible>, Option<&Highlight>)>()
        .iter()
        .map(|(entity, (collectible, visible, highlight))| CollectibleView {
            id: id(entity),
            item: collectible.item.clone(),
            position: hierarchy::world_pose(world, entity)
                .map(|p| p.position)
                .unwrap_or_default(),
            available: collectible.available,
            highlighted: highlight.is_some_and(|h| h.on),
            visible: visible.map_or(true, |v| v.0),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}
