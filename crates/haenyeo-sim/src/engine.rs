//! Simulation engine, the core of the retrieval sandbox.
//!
//! `SimulationEngine` owns the hecs ECS world and the single-writer state
//! machines (camera blend, highlight relay, reel, gather), processes player
//! commands, runs all systems in a fixed order and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use haenyeo_core::commands::PlayerCommand;
use haenyeo_core::config::TuningConfig;
use haenyeo_core::constants::{GATHER_CLIP, MAX_PITCH};
use haenyeo_core::enums::{GatherPhase, RetrievalMode, TetherOutcome, TetherPhase};
use haenyeo_core::events::{AudioEvent, GameEvent};
use haenyeo_core::state::GameStateSnapshot;
use haenyeo_core::types::{Ray, SimTime};
use haenyeo_reel::camera::CameraBlend;
use haenyeo_reel::gather::{GatherRequest, GatherSequencer};
use haenyeo_reel::highlight::HighlightRelay;
use haenyeo_reel::tether::ReelSimulator;

use crate::collectible::{self, CollectOutput, Ledger, RewardSink};
use crate::components::{Animator, ExclusionSet, Gatherer, Intent};
use crate::diagnostics::{Diagnostics, Missing};
use crate::hierarchy;
use crate::hook::WorldHookTarget;
use crate::scanner::{self, AimTarget, ScanParams};
use crate::spatial::WorldSpatialQuery;
use crate::systems;
use crate::world_setup::{self, PlayerSetup};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: TuningConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: TuningConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    tuning: TuningConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    audio_events: Vec<AudioEvent>,
    rewards: Box<dyn RewardSink>,
    diagnostics: Diagnostics,

    player: Option<Entity>,
    aiming: bool,
    camera: CameraBlend,
    view_ray: Option<Ray>,
    aim_target: Option<AimTarget>,
    highlight: HighlightRelay<Entity>,
    reel: ReelSimulator,
    reel_target: Option<Entity>,
    gather: GatherSequencer<Entity>,
    gather_collected: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config and an in-memory ledger.
    pub fn new(config: SimConfig) -> Self {
        Self::with_rewards(config, Box::<Ledger>::default())
    }

    /// Create an engine that reports rewards to `rewards`.
    pub fn with_rewards(config: SimConfig, rewards: Box<dyn RewardSink>) -> Self {
        let tuning = config.tuning;
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            audio_events: Vec::new(),
            rewards,
            diagnostics: Diagnostics::default(),
            player: None,
            aiming: false,
            camera: CameraBlend::from_config(&tuning.camera),
            view_ray: None,
            aim_target: None,
            highlight: HighlightRelay::new(),
            reel: ReelSimulator::new(tuning.tether.clone()),
            reel_target: None,
            gather: GatherSequencer::new(Vec::new()),
            gather_collected: false,
            tuning,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.gather_collected = false;
        self.process_commands();
        self.run_systems();
        self.time.advance(self.tuning.tick_dt);
        self.snapshot()
    }

    /// Spawn the player and register its locomotion handles with the gather sequencer.
    pub fn spawn_player(&mut self, setup: PlayerSetup) -> Entity {
        if let Some(previous) = self.player {
            self.despawn(previous);
        }
        let spawned = world_setup::spawn_player(&mut self.world, &setup);
        self.gather.register(spawned.locomotion.swim.clone());
        self.gather.register(spawned.locomotion.look.clone());
        self.player = Some(spawned.root);
        info!(player = ?spawned.root, "player spawned");
        spawned.root
    }

    /// Remove `entity` and its subtree. Any reel or gather that depends on it
    /// is released before this returns.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.world.contains(entity) {
            return false;
        }
        let is_player = self.player == Some(entity);

        if is_player || self.gather.target() == Some(entity) {
            systems::gather::cancel(&mut self.world, &mut self.gather, self.player, &mut self.events);
        }
        if is_player {
            if let Some(target) = self.reel_target {
                self.release_reel(target, TetherOutcome::Cancelled);
            }
        }

        let removed = hierarchy::subtree(&self.world, entity);
        hierarchy::despawn_recursive(&mut self.world, entity);

        if let Some(target) = self.reel_target {
            if removed.contains(&target) {
                self.release_reel(target, TetherOutcome::TargetLost);
            }
        }
        for e in &removed {
            self.highlight.forget(*e);
        }
        if self.aim_target.is_some_and(|t| removed.contains(&t.target)) {
            self.aim_target = None;
        }
        if is_player {
            self.player = None;
            self.view_ray = None;
        }
        debug!(?entity, count = removed.len(), "despawned");
        true
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &TuningConfig {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn aiming(&self) -> bool {
        self.aiming
    }

    pub fn aim_target(&self) -> Option<AimTarget> {
        self.aim_target
    }

    pub fn reel_phase(&self) -> TetherPhase {
        self.reel.phase()
    }

    pub fn reel_target(&self) -> Option<Entity> {
        self.reel_target
    }

    pub fn gather_phase(&self) -> GatherPhase {
        self.gather.phase()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetAiming { aiming } => {
                self.aiming = aiming;
                self.camera.set_aiming(aiming);
            }
            PlayerCommand::Look { yaw, pitch } => {
                if let Some(mut intent) = self.player_intent() {
                    intent.pending_yaw += yaw;
                    intent.pending_pitch = (intent.pending_pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
                }
            }
            PlayerCommand::Move { forward, right, up } => {
                if let Some(mut intent) = self.player_intent() {
                    let axes = DVec3::new(right, up, forward);
                    intent.movement = if axes.length_squared() > 1.0 {
                        axes.normalize()
                    } else {
                        axes
                    };
                }
            }
            PlayerCommand::CollectTarget => self.collect_immediately(),
            PlayerCommand::FireReel => self.fire_reel(),
            PlayerCommand::CancelReel => {
                if let Some(target) = self.reel_target {
                    self.release_reel(target, TetherOutcome::Cancelled);
                }
            }
            PlayerCommand::Gather => self.start_gather(),
            PlayerCommand::CancelGather => {
                systems::gather::cancel(&mut self.world, &mut self.gather, self.player, &mut self.events);
            }
        }
    }

    fn player_intent(&mut self) -> Option<hecs::RefMut<'_, Intent>> {
        let player = self.player?;
        self.world.get::<&mut Intent>(player).ok()
    }

    /// Current aim target if it is close enough to the player for hand collection.
    fn target_in_reach(&self) -> Option<AimTarget> {
        let target = self.aim_target?;
        let player = hierarchy::world_pose(&self.world, self.player?)?;
        (player.position.distance(target.point) <= self.tuning.scan.gather_distance).then_some(target)
    }

    /// The target is already claimed by the reel or the gather.
    fn is_busy(&self, target: Entity) -> bool {
        self.reel_target == Some(target) || self.gather.target() == Some(target)
    }

    fn collect_immediately(&mut self) {
        let (Some(player), Some(target)) = (self.player, self.target_in_reach()) else {
            return;
        };
        if self.is_busy(target.target) {
            return;
        }
        let mut out = CollectOutput {
            rewards: self.rewards.as_mut(),
            events: &mut self.events,
            audio_events: &mut self.audio_events,
        };
        if collectible::try_collect(&mut self.world, target.target, player, RetrievalMode::Immediate, &mut out) {
            let world = &mut self.world;
            self.highlight
                .clear(|entity, on| systems::scan::set_highlight(world, entity, on));
            self.aim_target = None;
        }
    }

    fn fire_reel(&mut self) {
        if !self.aiming || self.reel.is_hooked() {
            return;
        }
        let Some(player) = self.player else {
            self.diagnostics.warn_once(Missing::Player, "no player spawned");
            return;
        };
        let Some(anchor) = systems::reel::anchor_position(&self.world, player) else {
            self.diagnostics.warn_once(Missing::ReelAnchor, "player has no reel anchor");
            return;
        };
        let Some(target) = self.aim_target.or_else(|| self.exact_ray_target(player)) else {
            return;
        };
        if self.is_busy(target.target) {
            return;
        }

        let mut out = CollectOutput {
            rewards: self.rewards.as_mut(),
            events: &mut self.events,
            audio_events: &mut self.audio_events,
        };
        let mut hooked = WorldHookTarget {
            world: &mut self.world,
            entity: target.target,
            by: player,
            out: &mut out,
        };
        if !self.reel.hook(&mut hooked, anchor) {
            return;
        }

        let rest_length = self.reel.state().map_or(0.0, |s| s.rest_length);
        self.events.push(GameEvent::Hooked {
            target: target.target.to_bits().get(),
            rest_length,
        });
        self.audio_events.push(AudioEvent::ReelFire { position: target.point });
        self.reel_target = Some(target.target);
    }

    /// Exact ray along the current view, out to the reel's reach.
    fn exact_ray_target(&self, player: Entity) -> Option<AimTarget> {
        let ray = self.view_ray?;
        let exclusion = self
            .world
            .get::<&ExclusionSet>(player)
            .map(|set| (*set).clone())
            .unwrap_or_default();
        let params = ScanParams {
            assist_radius: 0.0,
            ..ScanParams::from(&self.tuning.scan)
        };
        let query = WorldSpatialQuery::new(&self.world);
        scanner::scan(&self.world, &query, &ray, &exclusion, &params)
    }

    fn release_reel(&mut self, target: Entity, outcome: TetherOutcome) {
        let mut out = CollectOutput {
            rewards: self.rewards.as_mut(),
            events: &mut self.events,
            audio_events: &mut self.audio_events,
        };
        let mut hooked = WorldHookTarget {
            world: &mut self.world,
            entity: target,
            by: self.player.unwrap_or(target),
            out: &mut out,
        };
        if let Some(outcome) = self.reel.release(&mut hooked, outcome) {
            systems::reel::publish_outcome(target, outcome, hooked.out);
        }
        self.reel_target = None;
    }

    fn start_gather(&mut self) {
        if !self.gather.is_idle() {
            return;
        }
        let (Some(player), Some(target)) = (self.player, self.target_in_reach()) else {
            return;
        };
        if self.is_busy(target.target) || !collectible::is_available(&self.world, target.target) {
            return;
        }

        let freeze = match self.world.get::<&Gatherer>(player) {
            Ok(gatherer) if gatherer.freeze_pose => hierarchy::world_pose(&self.world, player),
            _ => None,
        };
        let Ok(mut animator) = self.world.get::<&mut Animator>(player) else {
            self.diagnostics.warn_once(Missing::Animator, "player has no animator");
            return;
        };
        if !animator.has_clip(GATHER_CLIP) {
            drop(animator);
            self.diagnostics.warn_once(Missing::GatherClip, "gather clip missing");
            return;
        }

        let request = GatherRequest {
            target: target.target,
            clip: GATHER_CLIP,
            frame_count: self.tuning.gather.frames,
            collect_at_fraction: self.tuning.gather.collect_at_fraction,
            freeze,
        };
        if self.gather.trigger(request, &mut *animator) {
            drop(animator);
            self.events.push(GameEvent::GatherStarted {
                target: target.target.to_bits().get(),
                delay: self.gather.delay(),
            });
            self.audio_events.push(AudioEvent::GatherSwing);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.tuning.tick_dt;

        // 1. Autonomous wander
        systems::wander::run(&mut self.world, &mut self.rng, dt);
        // 2. Locomotion from intent, gated by suppression handles
        systems::locomotion::run(&mut self.world, &self.tuning.movement, self.aiming);
        // 3. Kinematic integration
        systems::movement::run(&mut self.world, dt);
        // 4. Camera blend, finalized before the scan
        self.view_ray = systems::camera::run(
            &self.world,
            &mut self.camera,
            self.player,
            self.tuning.camera.pivot_height,
            dt,
            &mut self.diagnostics,
        );
        // 5. Target scan + highlight relay
        self.aim_target = systems::scan::run(
            &mut self.world,
            self.view_ray,
            self.aiming,
            self.player,
            &self.tuning.scan,
            self.aim_target,
            &mut self.highlight,
            &mut self.events,
        );

        let mut out = CollectOutput {
            rewards: self.rewards.as_mut(),
            events: &mut self.events,
            audio_events: &mut self.audio_events,
        };
        // 6. Reel
        systems::reel::run(
            &mut self.world,
            &mut self.reel,
            &mut self.reel_target,
            self.player,
            dt,
            &mut out,
            &mut self.diagnostics,
        );
        // 7. Gather + freeze
        self.gather_collected = systems::gather::run(&mut self.world, &mut self.gather, self.player, dt, &mut out);
        // 8. Animation playback
        systems::animator::run(&mut self.world, dt);
        // 9. Cleanup of collected entities
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        for entity in self.despawn_buffer.drain(..) {
            self.highlight.forget(entity);
            if self.aim_target.is_some_and(|t| t.target == entity) {
                self.aim_target = None;
            }
        }
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let ctx = systems::snapshot::SnapshotContext {
            time: self.time,
            aiming: self.aiming,
            camera: &self.camera,
            view_ray: self.view_ray,
            aim_target: self.aim_target,
            gather_distance: self.tuning.scan.gather_distance,
            highlighted: self.highlight.current(),
            player: self.player,
            reel: &self.reel,
            reel_target: self.reel_target,
            gather: &self.gather,
            gather_collected: self.gather_collected,
        };
        let events = std::mem::take(&mut self.events);
        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(&self.world, &ctx, events, audio_events)
    }
}
