// Browser timers backing the `Scheduler` seam.
//
// Every closure handed to the browser is owned here. Interval closures are
// retired (not dropped) on stop, because `stop_ticks` usually runs from inside
// the countdown closure itself; retired closures are released on the next
// `start_ticks`, which always comes from the start button handler.
//
// Expiry closures sit next to their timeout handle. Cancelling one clears the
// timeout and drops the closure on the spot (cancels come from click, start
// and end handlers, never from the expiry itself). A fired expiry is moved to
// `fired` and released on the next `schedule_expiry`, which runs from the
// spawn interval. Banner hides always fire, so they stay `once_into_js`.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::host::Scheduler;
use crate::target::TargetId;

use super::{performance_now, with_app};

struct Ticks {
    countdown_handle: i32,
    spawn_handle: i32,
    countdown: Closure<dyn FnMut()>,
    spawn: Closure<dyn FnMut()>,
}

struct Expiry {
    handle: i32,
    callback: Closure<dyn FnMut()>,
}

pub struct BrowserScheduler {
    window: Window,
    ticks: Option<Ticks>,
    retired: Vec<Closure<dyn FnMut()>>,
    expiries: HashMap<TargetId, Expiry>,
    fired: Vec<Closure<dyn FnMut()>>,
}

/// Browser timers take a signed 32-bit delay.
fn delay(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            ticks: None,
            retired: Vec::new(),
            expiries: HashMap::new(),
            fired: Vec::new(),
        }
    }

    /// Called from inside a firing expiry: keep its closure alive until the
    /// callback has returned.
    pub fn settle_expiry(&mut self, id: TargetId) {
        if let Some(expiry) = self.expiries.remove(&id) {
            self.fired.push(expiry.callback);
        }
    }

    /// Number of expiry closures currently held, armed or fired.
    pub fn held_expiries(&self) -> usize {
        self.expiries.len() + self.fired.len()
    }

    fn interval(&self, cb: &Closure<dyn FnMut()>, ms: u32) -> Result<i32, JsValue> {
        self.window
            .set_interval_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay(ms))
    }

    fn timeout(&self, cb: &JsValue, ms: u32) -> Result<i32, JsValue> {
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay(ms))
    }
}

impl Scheduler for BrowserScheduler {
    fn start_ticks(&mut self, generation: u64, countdown_ms: u32, spawn_ms: u32) {
        self.stop_ticks();
        self.retired.clear();
        self.fired.clear();

        let countdown = Closure::wrap(Box::new(move || {
            with_app(|session, host| session.on_countdown_tick(generation, performance_now(), host));
        }) as Box<dyn FnMut()>);
        let spawn = Closure::wrap(Box::new(move || {
            with_app(|session, host| {
                session.on_spawn_tick(generation, performance_now(), host);
            });
        }) as Box<dyn FnMut()>);

        match (self.interval(&countdown, countdown_ms), self.interval(&spawn, spawn_ms)) {
            (Ok(countdown_handle), Ok(spawn_handle)) => {
                self.ticks = Some(Ticks { countdown_handle, spawn_handle, countdown, spawn });
            }
            (countdown_res, spawn_res) => {
                console_warn!("failed to start session {generation} timers");
                for handle in [countdown_res, spawn_res].into_iter().flatten() {
                    self.window.clear_interval_with_handle(handle);
                }
                self.retired.push(countdown);
                self.retired.push(spawn);
            }
        }
    }

    fn stop_ticks(&mut self) {
        if let Some(ticks) = self.ticks.take() {
            self.window.clear_interval_with_handle(ticks.countdown_handle);
            self.window.clear_interval_with_handle(ticks.spawn_handle);
            self.retired.push(ticks.countdown);
            self.retired.push(ticks.spawn);
        }
    }

    fn schedule_expiry(&mut self, generation: u64, id: TargetId, after_ms: u32) {
        self.fired.clear();
        let callback = Closure::once(move || {
            with_app(|session, host| {
                host.timers.settle_expiry(id);
                session.on_target_expired(generation, id, host);
            });
        });
        match self.timeout(callback.as_ref(), after_ms) {
            Ok(handle) => {
                if let Some(stale) = self.expiries.insert(id, Expiry { handle, callback }) {
                    self.window.clear_timeout_with_handle(stale.handle);
                }
            }
            Err(e) => console_warn!("could not arm expiry for target {id}: {e:?}"),
        }
    }

    fn cancel_expiry(&mut self, id: TargetId) {
        if let Some(expiry) = self.expiries.remove(&id) {
            self.window.clear_timeout_with_handle(expiry.handle);
        }
    }

    fn schedule_banner_hide(&mut self, token: u64, after_ms: u32) {
        let cb = Closure::once_into_js(move || {
            with_app(|session, host| session.on_banner_expired(token, host));
        });
        if let Err(e) = self.timeout(&cb, after_ms) {
            console_warn!("could not arm banner hide: {e:?}");
        }
    }
}
