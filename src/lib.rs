//! Drop Dash core crate.
//!
//! A timed clicking game: good and bad drops pop up at random spots inside the
//! play area, clicking a good drop scores a point, clicking a bad one costs
//! two, and score milestones flash a banner. The game loop (`session`) and
//! everything it touches are plain Rust driven through the seams in `host`;
//! the `web` module plugs those seams into the DOM, Web Audio and browser
//! timers.

use wasm_bindgen::prelude::*;

#[macro_use]
mod log;

pub mod config;
pub mod difficulty;
pub mod host;
pub mod milestones;
pub mod position;
pub mod session;
pub mod sound;
pub mod target;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::GameConfig;
pub use difficulty::{DIFFICULTY_TABLE, Difficulty, DifficultySetting};
pub use host::{GameHost, Renderer, Scheduler};
pub use milestones::{MILESTONES, Milestone, MilestoneReached, MilestoneTracker};
pub use position::{PlayArea, Position, next_position};
pub use session::{ClickOutcome, GameSession, GameState};
pub use sound::{SoundEmitter, ToneSpec, Waveform};
pub use target::{Target, TargetId, TargetKind, TargetSpawner};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Mount the game on the page with the default rules.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::mount(GameConfig::default())
}

/// Mount the game with a (possibly partial) JSON config, e.g.
/// `{"duration_secs": 60}`.
#[cfg(all(target_arch = "wasm32", feature = "serde_json"))]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    web::mount(config)
}
