//! The collectible contract and the reward sink it reports to.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use tracing::{debug, info};

use haenyeo_core::components::{CollectEffect, Collectible, Collider, Highlight, Visible};
use haenyeo_core::enums::RetrievalMode;
use haenyeo_core::events::{AudioEvent, GameEvent};

use crate::components::{Despawn, Spawner, SpawnerLink};
use crate::hierarchy;

/// Inventory service injected into the engine.
pub trait RewardSink {
    fn grant(&mut self, item: &str, amount: u32);
}

/// Default in-memory inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    items: BTreeMap<String, u32>,
}

impl Ledger {
    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.items.values().sum()
    }
}

impl RewardSink for Ledger {
    fn grant(&mut self, item: &str, amount: u32) {
        *self.items.entry(item.to_string()).or_insert(0) += amount;
    }
}

/// Where collection side effects are delivered.
pub struct CollectOutput<'a> {
    pub rewards: &'a mut dyn RewardSink,
    pub events: &'a mut Vec<GameEvent>,
    pub audio_events: &'a mut Vec<AudioEvent>,
}

/// Whether `entity` is a collectible whose gate is still open.
pub fn is_available(world: &World, entity: Entity) -> bool {
    world.get::<&Collectible>(entity).is_ok_and(|c| c.available)
}

/// Consume `entity`'s single-use gate on behalf of `by`.
///
/// Returns true exactly once per collectible. Reward, effects, hiding and
/// spawner notification happen only on that call.
pub fn try_collect(
    world: &mut World,
    entity: Entity,
    by: Entity,
    mode: RetrievalMode,
    out: &mut CollectOutput<'_>,
) -> bool {
    let (item, amount, effects, hide) = {
        let Ok(mut collectible) = world.get::<&mut Collectible>(entity) else {
            return false;
        };
        if !collectible.available {
            debug!(?entity, "collect refused: already taken");
            return false;
        }
        collectible.available = false;
        (
            collectible.item.clone(),
            collectible.amount,
            collectible.on_collected.clone(),
            collectible.hide_on_collected,
        )
    };

    out.rewards.grant(&item, amount);

    let position = hierarchy::world_pose(world, entity)
        .map(|p| p.position)
        .unwrap_or_default();
    for effect in effects {
        match effect {
            CollectEffect::Sound { cue } => out.audio_events.push(AudioEvent::Pickup { cue, position }),
            CollectEffect::Vfx { name } => out.events.push(GameEvent::Vfx { name, position }),
        }
    }
    out.events.push(GameEvent::Collected {
        target: entity.to_bits().get(),
        item: item.clone(),
        amount,
        mode,
    });

    if hide {
        hide_subtree(world, entity);
    }

    let spawner = world.get::<&SpawnerLink>(entity).ok().map(|link| link.0);
    if let Some(spawner) = spawner {
        let notified = match world.get::<&mut Spawner>(spawner) {
            Ok(mut s) => {
                s.alive = s.alive.saturating_sub(1);
                s.collected += 1;
                true
            }
            Err(_) => false,
        };
        if notified {
            let _ = world.insert_one(entity, Despawn);
        }
    }

    info!(?entity, ?by, item = item.as_str(), amount, ?mode, "collected");
    true
}

/// Turn off renderables, highlight and every collider under `root`.
fn hide_subtree(world: &mut World, root: Entity) {
    for entity in hierarchy::subtree(world, root) {
        if let Ok(mut visible) = world.get::<&mut Visible>(entity) {
            visible.0 = false;
        }
        if let Ok(mut highlight) = world.get::<&mut Highlight>(entity) {
            highlight.on = false;
        }
        if let Ok(mut collider) = world.get::<&mut Collider>(entity) {
            collider.enabled = false;
        }
    }
}
