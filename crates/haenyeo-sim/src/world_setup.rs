//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player rig, static and swimming collectibles, and the
//! spawners that track them.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use haenyeo_core::components::*;
use haenyeo_core::constants::*;
use haenyeo_core::enums::ColliderShape;

use crate::components::*;

/// Player construction options.
#[derive(Debug, Clone)]
pub struct PlayerSetup {
    pub position: DVec3,
    pub yaw: f64,
    /// Attach an orbit camera. Without one, scanning and the reel are disabled.
    pub camera: bool,
    /// Tether origin in the player's yaw frame. None disables the reel.
    pub reel_anchor: Option<DVec3>,
    pub freeze_pose: bool,
    pub clips: Vec<ClipInfo>,
}

impl Default for PlayerSetup {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            yaw: 0.0,
            camera: true,
            reel_anchor: Some(DVec3::new(0.3, 1.2, -0.4)),
            freeze_pose: true,
            clips: vec![ClipInfo {
                name: GATHER_CLIP.to_string(),
                frame_rate: CLIP_FRAME_RATE,
                frame_count: 90,
            }],
        }
    }
}

/// Entities and handles created by [`spawn_player`].
#[derive(Debug, Clone)]
pub struct SpawnedPlayer {
    pub root: Entity,
    pub hands: Entity,
    pub locomotion: Locomotion,
}

/// Spawn the player body, its hand collider and its capability components.
pub fn spawn_player(world: &mut World, setup: &PlayerSetup) -> SpawnedPlayer {
    let locomotion = Locomotion::default();
    let mut transform = Transform::at(setup.position);
    transform.0.rotation = glam::DQuat::from_rotation_y(setup.yaw);

    let root = world.spawn((
        Player,
        transform,
        Velocity::default(),
        Collider {
            shape: ColliderShape::Sphere { radius: 0.4 },
            layer: LAYER_PLAYER,
            is_trigger: false,
            enabled: true,
        },
        Intent::default(),
        locomotion.clone(),
        Gatherer {
            freeze_pose: setup.freeze_pose,
        },
        Animator::with_clips(setup.clips.clone()),
    ));

    let hands = world.spawn((
        Transform::at(DVec3::new(0.3, 1.0, -0.5)),
        Parent(root),
        Collider {
            shape: ColliderShape::Sphere { radius: 0.25 },
            layer: LAYER_PLAYER,
            is_trigger: true,
            enabled: true,
        },
    ));

    let _ = world.insert_one(
        root,
        ExclusionSet {
            colliders: vec![root, hands],
            roots: vec![root],
        },
    );
    if setup.camera {
        let _ = world.insert_one(
            root,
            CameraRig {
                yaw: setup.yaw,
                pitch: 0.0,
            },
        );
    }
    if let Some(offset) = setup.reel_anchor {
        let _ = world.insert_one(root, ReelAnchor { offset });
    }

    SpawnedPlayer { root, hands, locomotion }
}

/// Static collectible construction options.
#[derive(Debug, Clone)]
pub struct CollectibleSetup {
    pub item: String,
    pub amount: u32,
    pub position: DVec3,
    pub shape: ColliderShape,
    pub effects: Vec<CollectEffect>,
    pub spawner: Option<Entity>,
}

impl CollectibleSetup {
    pub fn new(item: &str, position: DVec3) -> Self {
        Self {
            item: item.to_string(),
            amount: 1,
            position,
            shape: ColliderShape::Sphere { radius: 0.25 },
            effects: vec![CollectEffect::Sound {
                cue: "pickup".to_string(),
            }],
            spawner: None,
        }
    }
}

/// Spawn a collectible with its collider on the root entity.
pub fn spawn_collectible(world: &mut World, setup: CollectibleSetup) -> Entity {
    let mut collectible = Collectible::new(setup.item, setup.amount);
    collectible.on_collected = setup.effects;

    let entity = world.spawn((
        Transform::at(setup.position),
        collectible,
        Collider {
            shape: setup.shape,
            layer: LAYER_COLLECTIBLE,
            is_trigger: false,
            enabled: true,
        },
        Visible(true),
        Highlight::default(),
    ));
    link_spawner(world, entity, setup.spawner);
    entity
}

/// Spawn a swimming collectible: a wandering root with its body collider on a child.
pub fn spawn_fish(
    world: &mut World,
    item: &str,
    position: DVec3,
    bounds: (DVec3, DVec3),
    spawner: Option<Entity>,
) -> Entity {
    let mut collectible = Collectible::new(item, 1);
    collectible.on_collected = vec![
        CollectEffect::Sound {
            cue: "fish_catch".to_string(),
        },
        CollectEffect::Vfx {
            name: "bubbles".to_string(),
        },
    ];

    let root = world.spawn((
        Transform::at(position),
        Velocity::default(),
        collectible,
        Visible(true),
        Highlight::default(),
        Wander::new(bounds.0, bounds.1),
        PhysicsBody {
            use_gravity: false,
            kinematic: false,
        },
    ));
    world.spawn((
        Transform::at(DVec3::new(0.0, 0.0, 0.15)),
        Parent(root),
        Collider {
            shape: ColliderShape::Sphere { radius: 0.3 },
            layer: LAYER_FISH,
            is_trigger: false,
            enabled: true,
        },
    ));
    link_spawner(world, root, spawner);
    root
}

pub fn spawn_spawner(world: &mut World) -> Entity {
    world.spawn((Spawner::default(),))
}

fn link_spawner(world: &mut World, entity: Entity, spawner: Option<Entity>) {
    let Some(spawner) = spawner else {
        return;
    };
    if let Ok(mut s) = world.get::<&mut Spawner>(spawner) {
        s.alive += 1;
    }
    let _ = world.insert_one(entity, SpawnerLink(spawner));
}

/// Populate a dive site: a spawner with abalone on the seabed and a few fish.
pub fn setup_dive_site(world: &mut World, rng: &mut ChaCha8Rng, abalone: usize, fish: usize) -> Entity {
    let spawner = spawn_spawner(world);
    let bounds = (DVec3::new(-15.0, -6.0, -30.0), DVec3::new(15.0, 4.0, -5.0));

    for _ in 0..abalone {
        let position = DVec3::new(rng.gen_range(-10.0..10.0), -2.0, rng.gen_range(-25.0..-4.0));
        let mut setup = CollectibleSetup::new("abalone", position);
        setup.spawner = Some(spawner);
        spawn_collectible(world, setup);
    }
    for _ in 0..fish {
        let position = DVec3::new(
            rng.gen_range(bounds.0.x..bounds.1.x),
            rng.gen_range(bounds.0.y..bounds.1.y),
            rng.gen_range(bounds.0.z..bounds.1.z),
        );
        spawn_fish(world, "fish", position, bounds, Some(spawner));
    }
    spawner
}
