//! Scan system: refreshes the aim target and relays the highlight.

use hecs::{Entity, World};
use tracing::debug;

use haenyeo_core::components::Highlight;
use haenyeo_core::config::ScanConfig;
use haenyeo_core::events::GameEvent;
use haenyeo_core::types::Ray;
use haenyeo_reel::highlight::HighlightRelay;

use crate::components::ExclusionSet;
use crate::scanner::{self, AimTarget, ScanParams};
use crate::spatial::WorldSpatialQuery;

/// Scan only while aiming; otherwise the target and highlight are cleared.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    view_ray: Option<Ray>,
    aiming: bool,
    player: Option<Entity>,
    config: &ScanConfig,
    previous: Option<AimTarget>,
    relay: &mut HighlightRelay<Entity>,
    events: &mut Vec<GameEvent>,
) -> Option<AimTarget> {
    let next = match (aiming, view_ray) {
        (true, Some(ray)) => {
            let exclusion = player
                .and_then(|p| world.get::<&ExclusionSet>(p).ok().map(|set| (*set).clone()))
                .unwrap_or_default();
            let query = WorldSpatialQuery::new(world);
            scanner::scan(world, &query, &ray, &exclusion, &ScanParams::from(config))
        }
        _ => None,
    };

    let before = previous.map(|t| t.target);
    let after = next.map(|t| t.target);
    if before != after {
        match next {
            Some(target) => {
                debug!(entity = ?target.target, distance = target.distance, "target acquired");
                events.push(GameEvent::TargetAcquired {
                    target: target.target.to_bits().get(),
                    distance: target.distance,
                });
            }
            None => events.push(GameEvent::TargetCleared),
        }
    }

    relay.update(after, |entity, on| set_highlight(world, entity, on));
    next
}

/// Highlight capability toggle.
pub fn set_highlight(world: &mut World, entity: Entity, on: bool) {
    if let Ok(mut highlight) = world.get::<&mut Highlight>(entity) {
        highlight.on = on;
    }
}
