//! Seams between the game core and whatever hosts it (the browser shell in
//! `web`, or a recording double in tests).

use crate::position::PlayArea;
use crate::sound::SoundEmitter;
use crate::target::{Target, TargetId};

/// Reflects session and target state into visible UI.
pub trait Renderer {
    /// Current size of the target surface.
    fn play_area(&self) -> PlayArea;
    fn show_score(&mut self, score: i64);
    fn show_time_left(&mut self, seconds: u32);
    fn show_target(&mut self, target: &Target);
    fn remove_target(&mut self, id: TargetId);
    /// Drop every target element still on the surface.
    fn clear_targets(&mut self);
    fn show_banner(&mut self, text: &str);
    fn hide_banner(&mut self);
    /// Disable (or re-enable) the start button and difficulty selector.
    fn set_controls_locked(&mut self, locked: bool);
    fn announce_game_over(&mut self, final_score: i64);
}

/// Timer plumbing. Implementations call back into the session with the
/// generation / id / token they were handed so stale callbacks can be told
/// apart from live ones.
pub trait Scheduler {
    /// Begin the countdown and spawn intervals for session `generation`.
    fn start_ticks(&mut self, generation: u64, countdown_ms: u32, spawn_ms: u32);
    fn stop_ticks(&mut self);
    fn schedule_expiry(&mut self, generation: u64, id: TargetId, after_ms: u32);
    /// Must be harmless for ids whose expiry already fired or was never scheduled.
    fn cancel_expiry(&mut self, id: TargetId);
    fn schedule_banner_hide(&mut self, token: u64, after_ms: u32);
}

/// Everything a [`crate::session::GameSession`] needs from its surroundings.
pub trait GameHost: Renderer + Scheduler + SoundEmitter {}

impl<T: Renderer + Scheduler + SoundEmitter> GameHost for T {}
