//! The timed game loop: Idle -> Running -> Ended -> (Running on next start).
//!
//! All entry points are plain methods driven by the host: the countdown and
//! spawn intervals, target expiry timers, banner hide timers and clicks.
//! Timer callbacks carry the session generation they were armed under; a
//! callback from an older generation is ignored.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::difficulty::{Difficulty, DifficultySetting};
use crate::host::GameHost;
use crate::milestones::{Banner, MilestoneReached, MilestoneTracker};
use crate::target::{Removal, SpawnRequest, TargetId, TargetKind, TargetSpawner};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Running,
    Ended,
}

/// What a scoring click did.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickOutcome {
    pub id: TargetId,
    pub kind: TargetKind,
    pub delta: i64,
    pub score: i64,
    pub milestones: Vec<MilestoneReached>,
}

pub struct GameSession<R: Rng = StdRng> {
    config: GameConfig,
    state: GameState,
    score: i64,
    started_at_ms: f64,
    difficulty: Difficulty,
    setting: DifficultySetting,
    generation: u64,
    spawner: TargetSpawner,
    milestones: MilestoneTracker,
    banner: Banner,
    rng: R,
}

impl GameSession<StdRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameSession<R> {
    /// The config is run through [`GameConfig::sanitized`] first.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            config: config.sanitized(),
            state: GameState::Idle,
            score: 0,
            started_at_ms: 0.0,
            difficulty: Difficulty::Normal,
            setting: Difficulty::Normal.setting(),
            generation: 0,
            spawner: TargetSpawner::new(),
            milestones: MilestoneTracker::new(),
            banner: Banner::default(),
            rng,
        }
    }

    /// Begin a new session. Refused (returns false) while one is running.
    /// Unknown difficulty names silently resolve to Normal.
    pub fn start<H: GameHost + ?Sized>(
        &mut self,
        difficulty_name: &str,
        now_ms: f64,
        host: &mut H,
    ) -> bool {
        if self.state == GameState::Running {
            console_warn!("start ignored: session {} still running", self.generation);
            return false;
        }

        self.generation = self.generation.wrapping_add(1);
        self.score = 0;
        self.milestones.reset();
        if self.banner.dismiss() {
            host.hide_banner();
        }
        self.spawner.clear(host);
        host.clear_targets();

        self.difficulty = Difficulty::from_name(difficulty_name);
        self.setting = self.difficulty.setting();
        self.started_at_ms = now_ms;
        self.state = GameState::Running;

        host.show_score(self.score);
        host.show_time_left(self.config.duration_secs);
        host.set_controls_locked(true);
        host.start_ticks(
            self.generation,
            self.config.countdown_tick_ms,
            self.setting.spawn_interval_ms,
        );
        console_log!(
            "session {} started ({}, {}s)",
            self.generation,
            self.difficulty,
            self.config.duration_secs
        );
        true
    }

    pub fn on_countdown_tick<H: GameHost + ?Sized>(
        &mut self,
        generation: u64,
        now_ms: f64,
        host: &mut H,
    ) {
        if !self.accepts(generation) {
            console_log!("stale countdown tick from session {generation} ignored");
            return;
        }
        let remaining = self.time_left(now_ms);
        host.show_time_left(remaining);
        if remaining == 0 {
            self.end(host);
        }
    }

    /// Roll the target kind and spawn one. Returns the new target's id.
    pub fn on_spawn_tick<H: GameHost + ?Sized>(
        &mut self,
        generation: u64,
        now_ms: f64,
        host: &mut H,
    ) -> Option<TargetId> {
        if !self.accepts(generation) {
            console_log!("stale spawn tick from session {generation} ignored");
            return None;
        }
        let kind = if self.rng.gen_bool(self.setting.good_chance.clamp(0.0, 1.0)) {
            TargetKind::Good
        } else {
            TargetKind::Bad
        };
        let req = SpawnRequest {
            generation,
            kind,
            lifetime_ms: self.setting.target_lifetime_ms,
            area: host.play_area(),
            target_size: self.config.target_size,
            now_ms,
        };
        let target = self.spawner.spawn(req, &mut self.rng, host);
        host.show_target(&target);
        Some(target.id)
    }

    /// Score a click. Ignored unless running and the target is still live.
    /// Order: sound, score, milestones, removal, score display.
    pub fn on_target_clicked<H: GameHost + ?Sized>(
        &mut self,
        id: TargetId,
        host: &mut H,
    ) -> Option<ClickOutcome> {
        if self.state != GameState::Running {
            return None;
        }
        let kind = self.spawner.get(id)?.kind;

        host.play(kind);

        let delta = self.config.score_delta(kind);
        self.score = self.score.saturating_add(delta);

        let milestones = self.milestones.check(self.score, &mut self.rng);
        for m in &milestones {
            let token = self.banner.show();
            host.show_banner(m.message);
            host.schedule_banner_hide(token, self.config.banner_display_ms);
        }

        self.spawner.remove(id, Removal::Clicked, host);
        host.remove_target(id);
        host.show_score(self.score);

        Some(ClickOutcome { id, kind, delta, score: self.score, milestones })
    }

    /// Lifetime ran out. Returns true if the target was still live.
    pub fn on_target_expired<H: GameHost + ?Sized>(
        &mut self,
        generation: u64,
        id: TargetId,
        host: &mut H,
    ) -> bool {
        if !self.accepts(generation) {
            console_log!("stale expiry for target {id} (session {generation}) ignored");
            return false;
        }
        if self.spawner.remove(id, Removal::Expired, host).is_none() {
            return false;
        }
        host.remove_target(id);
        true
    }

    pub fn on_banner_expired<H: GameHost + ?Sized>(&mut self, token: u64, host: &mut H) {
        if self.banner.expire(token) {
            host.hide_banner();
        }
    }

    /// Stop the session. Only meaningful while running; returns false otherwise.
    pub fn end<H: GameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        host.stop_ticks();
        self.state = GameState::Ended;
        self.spawner.clear(host);
        host.clear_targets();
        self.milestones.reset();

        host.show_time_left(0);
        host.show_score(self.score);
        host.set_controls_locked(false);
        console_log!("session {} ended with score {}", self.generation, self.score);
        host.announce_game_over(self.score);
        true
    }

    /// Whole seconds left at `now_ms`, never below zero.
    pub fn time_left(&self, now_ms: f64) -> u32 {
        let elapsed = ((now_ms - self.started_at_ms) / 1000.0).floor().max(0.0);
        let duration = self.config.duration_secs as f64;
        (duration - elapsed).max(0.0) as u32
    }

    fn accepts(&self, generation: u64) -> bool {
        self.state == GameState::Running && generation == self.generation
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn setting(&self) -> DifficultySetting {
        self.setting
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn live_targets(&self) -> usize {
        self.spawner.live_count()
    }

    pub fn is_target_live(&self, id: TargetId) -> bool {
        self.spawner.is_live(id)
    }

    pub fn milestone_shown(&self, threshold: i64) -> bool {
        self.milestones.has_shown(threshold)
    }

    pub fn banner_visible(&self) -> bool {
        self.banner.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Renderer, Scheduler};
    use crate::position::PlayArea;
    use crate::sound::SoundEmitter;
    use crate::target::Target;

    #[derive(Default)]
    struct Quiet {
        ticks_running: bool,
        sounds: usize,
    }

    impl Renderer for Quiet {
        fn play_area(&self) -> PlayArea {
            PlayArea::new(300.0, 300.0)
        }
        fn show_score(&mut self, _: i64) {}
        fn show_time_left(&mut self, _: u32) {}
        fn show_target(&mut self, _: &Target) {}
        fn remove_target(&mut self, _: TargetId) {}
        fn clear_targets(&mut self) {}
        fn show_banner(&mut self, _: &str) {}
        fn hide_banner(&mut self) {}
        fn set_controls_locked(&mut self, _: bool) {}
        fn announce_game_over(&mut self, _: i64) {}
    }

    impl Scheduler for Quiet {
        fn start_ticks(&mut self, _: u64, _: u32, _: u32) {
            self.ticks_running = true;
        }
        fn stop_ticks(&mut self) {
            self.ticks_running = false;
        }
        fn schedule_expiry(&mut self, _: u64, _: TargetId, _: u32) {}
        fn cancel_expiry(&mut self, _: TargetId) {}
        fn schedule_banner_hide(&mut self, _: u64, _: u32) {}
    }

    impl SoundEmitter for Quiet {
        fn play(&mut self, _: TargetKind) {
            self.sounds += 1;
        }
    }

    fn session() -> GameSession<StdRng> {
        GameSession::with_rng(GameConfig::default(), StdRng::seed_from_u64(42))
    }

    #[test]
    fn time_left_floors_elapsed_seconds() {
        let mut s = session();
        let mut host = Quiet::default();
        s.start("normal", 1_000.0, &mut host);
        assert_eq!(s.time_left(1_000.0), 30);
        assert_eq!(s.time_left(1_999.0), 30);
        assert_eq!(s.time_left(2_000.0), 29);
        assert_eq!(s.time_left(31_000.0), 0);
        assert_eq!(s.time_left(99_000.0), 0);
        // clock going backwards never adds time
        assert_eq!(s.time_left(0.0), 30);
    }

    #[test]
    fn restart_is_refused_while_running() {
        let mut s = session();
        let mut host = Quiet::default();
        assert!(s.start("hard", 0.0, &mut host));
        let generation = s.generation();
        assert!(!s.start("easy", 10.0, &mut host));
        assert_eq!(s.generation(), generation);
        assert_eq!(s.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn end_only_from_running() {
        let mut s = session();
        let mut host = Quiet::default();
        assert!(!s.end(&mut host));
        s.start("normal", 0.0, &mut host);
        assert!(s.end(&mut host));
        assert!(!host.ticks_running);
        assert!(!s.end(&mut host));
        assert_eq!(s.state(), GameState::Ended);
    }

    #[test]
    fn clicks_ignored_outside_running() {
        let mut s = session();
        let mut host = Quiet::default();
        s.start("normal", 0.0, &mut host);
        let id = s.on_spawn_tick(s.generation(), 0.0, &mut host).unwrap();
        s.end(&mut host);
        assert!(s.on_target_clicked(id, &mut host).is_none());
        assert_eq!(host.sounds, 0);
    }

    #[test]
    fn hostile_config_plays_without_overflow() {
        let config = GameConfig {
            duration_secs: 0,
            good_points: i64::MAX,
            bad_penalty: i64::MIN,
            ..GameConfig::default()
        };
        let mut s = GameSession::with_rng(config, StdRng::seed_from_u64(7));
        assert_eq!(s.config().duration_secs, 1);
        let mut host = Quiet::default();
        s.start("normal", 0.0, &mut host);
        for _ in 0..6 {
            let id = s.on_spawn_tick(s.generation(), 0.0, &mut host).unwrap();
            let outcome = s.on_target_clicked(id, &mut host).unwrap();
            if outcome.kind == TargetKind::Bad {
                assert_eq!(outcome.delta, 0);
            }
        }
        assert!(s.score() >= 0);
        assert!(s.score() <= 6 * crate::config::MAX_POINTS);
    }
}
