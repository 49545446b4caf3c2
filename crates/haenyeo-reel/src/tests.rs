#[cfg(test)]
mod tests {
    use glam::DVec3;

    use haenyeo_core::config::{CameraConfig, TetherConfig};
    use haenyeo_core::constants::*;
    use haenyeo_core::enums::{GatherPhase, TetherOutcome, TetherPhase};
    use haenyeo_core::types::Pose;

    use crate::camera::{view_ray, CameraBlend};
    use crate::capability::{AnimationPlayback, HookTarget, MovementLock, Suppressible, SuppressionHandle};
    use crate::curve::{bezier2, rope_curve};
    use crate::gather::{GatherRequest, GatherSequencer, GatherTick};
    use crate::highlight::HighlightRelay;
    use crate::tether::ReelSimulator;

    /// Spherical target with observable capability state.
    struct MockTarget {
        position: DVec3,
        radius: f64,
        alive: bool,
        available: bool,
        autonomous: bool,
        gravity_owned: bool,
        collect_calls: u32,
        rewards: u32,
    }

    impl MockTarget {
        fn at(position: DVec3) -> Self {
            Self {
                position,
                radius: 0.0,
                alive: true,
                available: true,
                autonomous: true,
                gravity_owned: true,
                collect_calls: 0,
                rewards: 0,
            }
        }
    }

    impl HookTarget for MockTarget {
        fn is_alive(&self) -> bool {
            self.alive
        }
        fn is_available(&self) -> bool {
            self.available
        }
        fn position(&self) -> DVec3 {
            self.position
        }
        fn move_to(&mut self, position: DVec3) {
            self.position = position;
        }
        fn surface_distance(&self, point: DVec3) -> f64 {
            (point.distance(self.position) - self.radius).max(0.0)
        }
        fn set_autonomous_motion_enabled(&mut self, enabled: bool) {
            self.autonomous = enabled;
        }
        fn set_physics_gravity_owned(&mut self, owned: bool) {
            self.gravity_owned = owned;
        }
        fn try_collect(&mut self) -> bool {
            self.collect_calls += 1;
            if !self.available {
                return false;
            }
            self.available = false;
            self.rewards += 1;
            true
        }
    }

    /// Clip library where every clip runs at 30 fps.
    struct MockPlayback {
        playing: Option<String>,
        known: bool,
    }

    impl MockPlayback {
        fn new() -> Self {
            Self { playing: None, known: true }
        }
    }

    impl AnimationPlayback for MockPlayback {
        fn play_segment(&mut self, clip: &str, frame_count: u32) -> Option<f64> {
            if !self.known {
                return None;
            }
            self.playing = Some(clip.to_string());
            Some(frame_count as f64 / CLIP_FRAME_RATE)
        }
        fn stop(&mut self) {
            self.playing = None;
        }
    }

    fn run_until_resolved(reel: &mut ReelSimulator, target: &mut MockTarget, max_ticks: usize) -> (Option<TetherOutcome>, Vec<f64>) {
        let mut rests = Vec::new();
        for _ in 0..max_ticks {
            let outcome = reel.tick(target, DVec3::ZERO, DT);
            if let Some(state) = reel.state() {
                rests.push(state.rest_length);
            }
            if outcome.is_some() {
                return (outcome, rests);
            }
        }
        (None, rests)
    }

    // ---- Camera blend ----

    #[test]
    fn test_camera_blend_converges_monotonically() {
        let mut blend = CameraBlend::from_config(&CameraConfig::default());
        blend.set_aiming(true);

        let mut prev = *blend.current();
        for _ in 0..100 {
            blend.tick(DT);
            let cur = *blend.current();
            assert!(cur.fov <= prev.fov && cur.fov >= AIM_FOV);
            assert!(cur.distance <= prev.distance && cur.distance >= AIM_DISTANCE);
            assert!(cur.shoulder.x >= prev.shoulder.x && cur.shoulder.x <= AIM_SHOULDER[0]);
            prev = cur;
        }
        // 2 s at rate 12: residual is e^-24 of the gap.
        assert!((prev.fov - AIM_FOV).abs() < 1e-6);
        assert!((prev.distance - AIM_DISTANCE).abs() < 1e-6);
    }

    #[test]
    fn test_camera_blend_is_frame_rate_independent() {
        let mut coarse = CameraBlend::from_config(&CameraConfig::default());
        let mut fine = CameraBlend::from_config(&CameraConfig::default());
        coarse.set_aiming(true);
        fine.set_aiming(true);
        for _ in 0..10 {
            coarse.tick(0.02);
        }
        for _ in 0..20 {
            fine.tick(0.01);
        }
        assert!((coarse.current().fov - fine.current().fov).abs() < 1e-9);
    }

    #[test]
    fn test_view_ray_faces_negative_z_at_rest() {
        let blend = CameraBlend::from_config(&CameraConfig::default());
        let ray = view_ray(DVec3::new(0.0, 1.5, 0.0), 0.0, 0.0, blend.current());
        assert!((ray.direction - DVec3::NEG_Z).length() < 1e-12);
        // Behind the pivot by the follow distance, offset to the right shoulder.
        assert!((ray.origin - DVec3::new(0.5, 1.5, NORMAL_DISTANCE)).length() < 1e-9);
    }

    // ---- Tether ----

    #[test]
    fn test_reel_collects_within_schedule() {
        let mut reel = ReelSimulator::new(TetherConfig::default());
        let mut target = MockTarget::at(DVec3::new(0.0, 0.0, -10.0));

        assert!(reel.hook(&mut target, DVec3::ZERO));
        assert_eq!(reel.phase(), TetherPhase::Hooked);
        assert!(!target.autonomous);
        assert!(!target.gravity_owned);

        let (outcome, rests) = run_until_resolved(&mut reel, &mut target, 1000);
        assert_eq!(outcome, Some(TetherOutcome::Collected));
        let ticks = rests.len() + 1;
        let elapsed = ticks as f64 * DT;
        assert!((0.9..=1.2).contains(&elapsed), "collected at {elapsed}");
        assert!(elapsed < MAX_HOOK_TIME);
        assert!(rests.windows(2).all(|w| w[1] <= w[0]));

        assert_eq!(target.rewards, 1);
        assert!(target.autonomous);
        assert!(target.gravity_owned);
        assert_eq!(reel.phase(), TetherPhase::Resolved);
        assert!(reel.rope().is_empty());
        assert!(reel.state().is_none());

        // Resolved decays to Idle on the next tick.
        assert_eq!(reel.tick(&mut target, DVec3::ZERO, DT), None);
        assert_eq!(reel.phase(), TetherPhase::Idle);
    }

    #[test]
    fn test_reel_never_passes_rest_length() {
        let mut reel = ReelSimulator::new(TetherConfig::default());
        let mut target = MockTarget::at(DVec3::new(3.0, 0.0, -9.0));
        reel.hook(&mut target, DVec3::ZERO);
        for _ in 0..200 {
            if reel.tick(&mut target, DVec3::ZERO, DT).is_some() {
                break;
            }
            let rest = reel.state().map(|s| s.rest_length).unwrap_or(STOP_DISTANCE);
            assert!(target.position.length() >= rest - 1e-9);
        }
        assert!(target.position.length() >= STOP_DISTANCE - 1e-9);
    }

    #[test]
    fn test_larger_target_collects_earlier() {
        let mut reel = ReelSimulator::new(TetherConfig::default());
        let mut small = MockTarget::at(DVec3::new(0.0, 0.0, -10.0));
        reel.hook(&mut small, DVec3::ZERO);
        let (_, small_rests) = run_until_resolved(&mut reel, &mut small, 1000);

        let mut reel = ReelSimulator::new(TetherConfig::default());
        let mut big = MockTarget::at(DVec3::new(0.0, 0.0, -10.0));
        big.radius = 0.5;
        reel.hook(&mut big, DVec3::ZERO);
        let (outcome, big_rests) = run_until_resolved(&mut reel, &mut big, 1000);

        assert_eq!(outcome, Some(TetherOutcome::Collected));
        assert!(big_rests.len() < small_rests.len());
    }

    #[test]
    fn test_reel_times_out_without_reel_in() {
        let config = TetherConfig {
            reel_in_rate: 0.0,
            max_hook_time: 5.0,
            ..TetherConfig::default()
        };
        let mut reel = ReelSimulator::new(config);
        let mut target = MockTarget::at(DVec3::new(0.0, 0.0, -10.0));
        reel.hook(&mut target, DVec3::ZERO);

        let mut ticks = 0;
        let mut outcome = None;
        while outcome.is_none() && ticks < 1000 {
            outcome = reel.tick(&mut target, DVec3::ZERO, DT);
            ticks += 1;
        }
        assert_eq!(outcome, Some(TetherOutcome::TimedOut));
        assert_eq!(ticks, 250);
        assert_eq!(target.collect_calls, 0);
        assert!(target.available);
        assert!(target.autonomous);
        assert!(target.gravity_owned);
    }

    #[test]
    fn test_destroyed_target_resolves_immediately() {
        let mut reel = ReelSimulator::new(TetherConfig::default());
        let mut target = MockTarget::at(DVec3::new(0.0, 0.0, -10.0));
        reel.hook(&mut target, DVec3::ZERO);
        reel.tick(&mut target, DVec3::ZERO, DT);
        assert!(!reel.rope().is_empty());

        target.alive = false;
        assert_eq!(reel.tick(&mut target, DVec3::ZERO, DT), Some(TetherOutcome::TargetLost));
        assert!(reel.state().is_none());
        assert!(reel.rope().is_empty());
        assert_eq!(target.collect_calls, 0);
    }

    #[test]
    fn test_hook_rejected_when_unavailable_or_busy() {
        let mut reel = ReelSimulator::new(TetherConfig::default());
        let mut spent = MockTarget::at(DVec3::new(0.0, 0.0, -5.0));
        spent.available = false;
        assert!(!reel.hook(&mut spent, DVec3::ZERO));
        assert!(spent.autonomous);
        assert_eq!(reel.phase(), TetherPhase::Idle);

        let mut first = MockTarget::at(DVec3::new(0.0, 0.0, -5.0));
        let mut second = MockTarget::at(DVec3::new(0.0, 0.0, -6.0));
        assert!(reel.hook(&mut first, DVec3::ZERO));
        assert!(!reel.hook(&mut second, DVec3::ZERO));
        assert!(second.autonomous);
    }

    #[test]
    fn test_reel_forfeits_when_gate_already_taken() {
        let mut reel = ReelSimulator::new(TetherConfig::default());
        let mut target = MockTarget::at(DVec3::new(0.0, 0.0, -3.0));
        reel.hook(&mut target, DVec3::ZERO);
        // Another path consumes the gate while the hook is in flight.
        target.available = false;

        let (outcome, _) = run_until_resolved(&mut reel, &mut target, 500);
        assert_eq!(outcome, Some(TetherOutcome::Forfeited));
        assert_eq!(target.rewards, 0);
        assert!(target.autonomous);
    }

    #[test]
    fn test_cancel_releases_target() {
        let mut reel = ReelSimulator::new(TetherConfig::default());
        let mut target = MockTarget::at(DVec3::new(0.0, 0.0, -8.0));
        assert_eq!(reel.cancel(&mut target), None);

        reel.hook(&mut target, DVec3::ZERO);
        assert_eq!(reel.cancel(&mut target), Some(TetherOutcome::Cancelled));
        assert!(target.autonomous);
        assert!(target.gravity_owned);
        assert_eq!(reel.last_outcome(), Some(TetherOutcome::Cancelled));
    }

    // ---- Rope ----

    #[test]
    fn test_rope_endpoints_and_sag() {
        let config = TetherConfig::default();
        let anchor = DVec3::new(0.0, 1.0, 0.0);
        let target = DVec3::new(0.0, 1.0, -10.0);
        let rope = rope_curve(anchor, target, DVec3::ZERO, &config);

        assert_eq!(rope.len(), config.rope_segments);
        assert_eq!(rope[0], anchor);
        assert!((rope[rope.len() - 1] - target).length() < 1e-12);
        // Droops below the straight line, never above it.
        assert!(rope.iter().all(|p| p.y <= 1.0 + 1e-12));
        let mid = bezier2(anchor, DVec3::new(0.0, 1.0 - 1.2, -5.0), target, 0.5);
        assert!((mid.y - (1.0 - 0.6)).abs() < 1e-9);
    }

    #[test]
    fn test_rope_whip_ignores_axial_velocity() {
        let config = TetherConfig::default();
        let target = DVec3::new(0.0, 0.0, -10.0);
        let still = rope_curve(DVec3::ZERO, target, DVec3::ZERO, &config);
        let axial = rope_curve(DVec3::ZERO, target, DVec3::new(0.0, 0.0, 6.0), &config);
        let lateral = rope_curve(DVec3::ZERO, target, DVec3::new(6.0, 0.0, 0.0), &config);

        let mid = config.rope_segments / 2;
        assert!((still[mid] - axial[mid]).length() < 1e-12);
        assert!(lateral[mid].x > still[mid].x);
    }

    #[test]
    fn test_rope_has_at_least_two_samples() {
        let config = TetherConfig {
            rope_segments: 0,
            ..TetherConfig::default()
        };
        assert_eq!(rope_curve(DVec3::ZERO, DVec3::ONE, DVec3::ZERO, &config).len(), 2);
    }

    // ---- Gather ----

    fn request(target: u32, freeze: Option<Pose>) -> GatherRequest<'static, u32> {
        GatherRequest {
            target,
            clip: GATHER_CLIP,
            frame_count: GATHER_FRAMES,
            collect_at_fraction: COLLECT_AT_FRACTION,
            freeze,
        }
    }

    #[test]
    fn test_gather_collects_after_delay_and_releases() {
        let swim = SuppressionHandle::new("swim");
        let look = SuppressionHandle::new("look");
        let mut seq = GatherSequencer::new(vec![swim.clone(), look.clone()]);
        let mut playback = MockPlayback::new();

        assert!(seq.trigger(request(7, None), &mut playback));
        assert_eq!(seq.phase(), GatherPhase::Triggered);
        assert!((seq.delay() - 1.8).abs() < 1e-12);
        assert_eq!(playback.playing.as_deref(), Some(GATHER_CLIP));
        assert!(!swim.is_enabled());
        assert!(!look.is_enabled());

        let mut ticks = 0;
        let collected = loop {
            ticks += 1;
            match seq.tick(DT) {
                GatherTick::Collect { target } => break target,
                GatherTick::Holding { .. } => {
                    assert_eq!(seq.phase(), GatherPhase::Playing);
                    assert!(!swim.is_enabled());
                }
                GatherTick::Idle => panic!("sequence ended without collecting"),
            }
            assert!(ticks < 500);
        };
        assert_eq!(collected, 7);
        assert_eq!(ticks, 90);
        assert!(ticks as f64 * DT + TIME_EPSILON >= 1.8);
        assert!(swim.is_enabled());
        assert!(look.is_enabled());
        assert!(seq.is_idle());
    }

    #[test]
    fn test_gather_trigger_is_reentrancy_safe() {
        let swim = SuppressionHandle::new("swim");
        let mut seq = GatherSequencer::new(vec![swim.clone()]);
        let mut playback = MockPlayback::new();

        seq.trigger(request(1, None), &mut playback);
        for _ in 0..10 {
            seq.tick(DT);
        }
        let elapsed = seq.elapsed();

        assert!(!seq.trigger(request(2, None), &mut playback));
        assert_eq!(seq.target(), Some(1));
        assert!((seq.elapsed() - elapsed).abs() < 1e-12);
        assert_eq!(seq.held(), 1);
    }

    #[test]
    fn test_gather_freeze_holds_pose() {
        let mut seq = GatherSequencer::new(Vec::new());
        let mut playback = MockPlayback::new();
        let pose = Pose::from_position(DVec3::new(1.0, 2.0, 3.0));

        seq.trigger(request(3, Some(pose)), &mut playback);
        assert_eq!(seq.tick(DT), GatherTick::Holding { freeze: Some(pose) });
        assert_eq!(seq.phase(), GatherPhase::Locked);
    }

    #[test]
    fn test_gather_cancel_and_drop_release_handles() {
        let swim = SuppressionHandle::new("swim");
        let mut seq = GatherSequencer::new(vec![swim.clone()]);
        let mut playback = MockPlayback::new();

        seq.trigger(request(4, None), &mut playback);
        seq.tick(DT);
        assert_eq!(seq.cancel(), Some(4));
        assert!(swim.is_enabled());
        assert_eq!(seq.cancel(), None);

        seq.trigger(request(5, None), &mut playback);
        assert!(!swim.is_enabled());
        drop(seq);
        assert!(swim.is_enabled());
    }

    #[test]
    fn test_gather_leaves_foreign_suppression_alone() {
        let swim = SuppressionHandle::new("swim");
        let look = SuppressionHandle::new("look");
        // Someone else already holds the look handle.
        look.disable();

        let mut seq = GatherSequencer::new(vec![swim.clone(), look.clone()]);
        seq.trigger(request(6, None), &mut MockPlayback::new());
        assert_eq!(seq.held(), 1);
        seq.cancel();
        assert!(swim.is_enabled());
        assert!(!look.is_enabled());
    }

    #[test]
    fn test_gather_unknown_clip_is_rejected() {
        let swim = SuppressionHandle::new("swim");
        let mut seq: GatherSequencer<u32> = GatherSequencer::new(vec![swim.clone()]);
        let mut playback = MockPlayback { playing: None, known: false };
        assert!(!seq.trigger(request(8, None), &mut playback));
        assert!(swim.is_enabled());
        assert!(seq.is_idle());
    }

    #[test]
    fn test_gather_zero_fraction_collects_on_first_tick() {
        let mut seq = GatherSequencer::new(Vec::new());
        let mut req = request(9, None);
        req.collect_at_fraction = -2.0;
        seq.trigger(req, &mut MockPlayback::new());
        assert_eq!(seq.delay(), 0.0);
        assert_eq!(seq.tick(DT), GatherTick::Collect { target: 9 });
    }

    #[test]
    fn test_movement_lock_release_is_idempotent() {
        let swim = SuppressionHandle::new("swim");
        let mut lock = MovementLock::acquire([&swim]);
        assert_eq!(lock.held(), 1);
        lock.release();
        assert!(swim.is_enabled());
        // A later disable by another owner survives a second release.
        swim.disable();
        lock.release();
        assert!(!swim.is_enabled());
    }

    // ---- Highlight ----

    #[test]
    fn test_highlight_relay_toggles_on_change_only() {
        let mut relay = HighlightRelay::new();
        let mut log: Vec<(u32, bool)> = Vec::new();

        relay.update(Some(1), |t, on| log.push((t, on)));
        relay.update(Some(1), |t, on| log.push((t, on)));
        relay.update(Some(2), |t, on| log.push((t, on)));
        relay.clear(|t, on| log.push((t, on)));

        assert_eq!(log, vec![(1, true), (1, false), (2, true), (2, false)]);
        assert_eq!(relay.current(), None);
    }
}
