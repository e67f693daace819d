//! Browser shell: wires a [`GameSession`] to the page.
//!
//! The session and its host live in one thread-local slot. Every browser
//! callback (button click, target click, interval, timeout) borrows that slot,
//! dispatches one session method and returns, so callbacks never interleave.

mod audio;
mod dom;
mod timers;

pub use audio::WebAudioSound;
pub use dom::DomRenderer;
pub use timers::BrowserScheduler;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, window};

use crate::config::GameConfig;
use crate::host::{Renderer, Scheduler};
use crate::position::PlayArea;
use crate::session::GameSession;
use crate::sound::SoundEmitter;
use crate::target::{Target, TargetId, TargetKind};

/// Browser implementation of every host seam.
pub struct WebHost {
    pub dom: DomRenderer,
    pub audio: WebAudioSound,
    pub timers: BrowserScheduler,
}

struct App {
    session: GameSession,
    host: WebHost,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

/// Run `f` against the mounted game. Silently does nothing before `mount`;
/// a re-entrant call is dropped with a warning rather than panicking.
pub(crate) fn with_app<F>(f: F)
where
    F: FnOnce(&mut GameSession, &mut WebHost),
{
    APP.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            console_warn!("game busy, event dropped");
            return;
        };
        if let Some(App { session, host }) = slot.as_mut() {
            f(session, host);
        }
    });
}

pub(crate) fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Attach to the page and install the start/click listeners. Calling it again
/// once mounted is a no-op.
pub fn mount(config: GameConfig) -> Result<(), JsValue> {
    if APP.with(|cell| cell.borrow().is_some()) {
        return Ok(());
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let config = config.sanitized();
    let dom = DomRenderer::attach(win.clone(), doc, config.target_size)?;
    let container = dom.container().clone();
    let start_button = dom.start_button().clone();

    let session = GameSession::new(config);
    let mut host = WebHost {
        dom,
        audio: WebAudioSound::new(),
        timers: BrowserScheduler::new(win),
    };
    host.show_score(0);
    host.show_time_left(session.config().duration_secs);

    APP.with(|cell| *cell.borrow_mut() = Some(App { session, host }));

    // Start button: read the difficulty once, then lock the controls.
    {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            with_app(|session, host| {
                let difficulty = host.dom.selected_difficulty();
                session.start(&difficulty, performance_now(), host);
            });
        }) as Box<dyn FnMut(_)>);
        start_button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // One delegated listener for every target in the container.
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let Some(id) = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| dom::target_id_of(&el))
            else {
                return;
            };
            with_app(|session, host| {
                session.on_target_clicked(id, host);
            });
        }) as Box<dyn FnMut(_)>);
        container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    console_log!("drop-dash mounted");
    Ok(())
}

impl Renderer for WebHost {
    fn play_area(&self) -> PlayArea {
        self.dom.play_area()
    }
    fn show_score(&mut self, score: i64) {
        self.dom.show_score(score)
    }
    fn show_time_left(&mut self, seconds: u32) {
        self.dom.show_time_left(seconds)
    }
    fn show_target(&mut self, target: &Target) {
        self.dom.show_target(target)
    }
    fn remove_target(&mut self, id: TargetId) {
        self.dom.remove_target(id)
    }
    fn clear_targets(&mut self) {
        self.dom.clear_targets()
    }
    fn show_banner(&mut self, text: &str) {
        self.dom.show_banner(text)
    }
    fn hide_banner(&mut self) {
        self.dom.hide_banner()
    }
    fn set_controls_locked(&mut self, locked: bool) {
        self.dom.set_controls_locked(locked)
    }
    fn announce_game_over(&mut self, final_score: i64) {
        self.dom.announce_game_over(final_score)
    }
}

impl Scheduler for WebHost {
    fn start_ticks(&mut self, generation: u64, countdown_ms: u32, spawn_ms: u32) {
        self.timers.start_ticks(generation, countdown_ms, spawn_ms)
    }
    fn stop_ticks(&mut self) {
        self.timers.stop_ticks()
    }
    fn schedule_expiry(&mut self, generation: u64, id: TargetId, after_ms: u32) {
        self.timers.schedule_expiry(generation, id, after_ms)
    }
    fn cancel_expiry(&mut self, id: TargetId) {
        self.timers.cancel_expiry(id)
    }
    fn schedule_banner_hide(&mut self, token: u64, after_ms: u32) {
        self.timers.schedule_banner_hide(token, after_ms)
    }
}

impl SoundEmitter for WebHost {
    fn play(&mut self, kind: TargetKind) {
        self.audio.play(kind)
    }
}
