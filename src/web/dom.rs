// DOM renderer: score / countdown text, target elements, the milestone banner
// and the start controls. Elements are looked up by id and created with inline
// styling when the page does not provide them.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlSelectElement, Window};

use crate::difficulty::Difficulty;
use crate::host::Renderer;
use crate::position::PlayArea;
use crate::target::{Target, TargetId};

pub const CONTAINER_ID: &str = "game-container";
pub const SCORE_ID: &str = "score";
pub const TIME_ID: &str = "time";
pub const START_BUTTON_ID: &str = "start-btn";
pub const DIFFICULTY_ID: &str = "difficulty";
pub const BANNER_ID: &str = "milestone-banner";
pub const TARGET_ID_ATTR: &str = "data-target-id";

pub struct DomRenderer {
    window: Window,
    document: Document,
    container: HtmlElement,
    score: Element,
    time: Element,
    start_button: HtmlButtonElement,
    difficulty: HtmlSelectElement,
    banner: HtmlElement,
    target_size: f64,
    targets: HashMap<TargetId, Element>,
}

impl DomRenderer {
    pub fn attach(window: Window, document: Document, target_size: f64) -> Result<Self, JsValue> {
        let container: HtmlElement = ensure_element(
            &document,
            CONTAINER_ID,
            "div",
            "position:relative; width:600px; height:400px; margin:12px auto; overflow:hidden; border:2px solid #2e9df7; border-radius:10px; background:#eaf6ff;",
        )?
        .dyn_into()?;
        let score = ensure_element(&document, SCORE_ID, "span", "font-family:'Fira Code', monospace; font-size:18px; margin:0 8px;")?;
        let time = ensure_element(&document, TIME_ID, "span", "font-family:'Fira Code', monospace; font-size:18px; margin:0 8px;")?;

        let difficulty: HtmlSelectElement = match document.get_element_by_id(DIFFICULTY_ID) {
            Some(el) => el.dyn_into()?,
            None => {
                let select: HtmlSelectElement = document.create_element("select")?.dyn_into()?;
                select.set_id(DIFFICULTY_ID);
                for d in Difficulty::ALL {
                    let option = document.create_element("option")?;
                    option.set_attribute("value", d.name())?;
                    option.set_text_content(Some(d.name()));
                    select.append_child(&option)?;
                }
                select.set_value(Difficulty::default().name());
                body(&document)?.append_child(&select)?;
                select
            }
        };

        let start_button: HtmlButtonElement = match document.get_element_by_id(START_BUTTON_ID) {
            Some(el) => el.dyn_into()?,
            None => {
                let button: HtmlButtonElement = document.create_element("button")?.dyn_into()?;
                button.set_id(START_BUTTON_ID);
                button.set_text_content(Some("Start Game"));
                body(&document)?.append_child(&button)?;
                button
            }
        };

        let banner: HtmlElement = ensure_element(
            &document,
            BANNER_ID,
            "div",
            "position:fixed; top:16px; left:50%; transform:translateX(-50%); padding:8px 18px; font-family:'Fira Code', monospace; font-size:20px; background:rgba(0,0,0,0.6); color:#ffd166; border-radius:8px; z-index:50;",
        )?
        .dyn_into()?;
        banner.set_hidden(true);

        Ok(Self {
            window,
            document,
            container,
            score,
            time,
            start_button,
            difficulty,
            banner,
            target_size,
            targets: HashMap::new(),
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn start_button(&self) -> &HtmlButtonElement {
        &self.start_button
    }

    pub fn selected_difficulty(&self) -> String {
        self.difficulty.value()
    }

    fn create_target(&self, target: &Target) -> Result<Element, JsValue> {
        let el = self.document.create_element("div")?;
        let class = if target.kind.is_good() { "drop good-drop" } else { "drop bad-drop" };
        el.set_class_name(class);
        el.set_attribute("title", target.kind.label())?;
        el.set_attribute(TARGET_ID_ATTR, &target.id.to_string())?;
        let color = if target.kind.is_good() { "#2e9df7" } else { "#8a5a2b" };
        el.set_attribute(
            "style",
            &format!(
                "position:absolute; left:{:.0}px; top:{:.0}px; width:{s:.0}px; height:{s:.0}px; border-radius:50% 50% 50% 0; transform:rotate(-45deg); background:{color}; cursor:pointer;",
                target.position.x,
                target.position.y,
                s = self.target_size,
            ),
        )?;
        self.container.append_child(&el)?;
        Ok(el)
    }
}

/// Parse the target id off a clicked element, if it is a target.
pub fn target_id_of(el: &Element) -> Option<TargetId> {
    el.get_attribute(TARGET_ID_ATTR)?.parse().ok().map(TargetId)
}

fn body(document: &Document) -> Result<HtmlElement, JsValue> {
    document.body().ok_or_else(|| JsValue::from_str("no body"))
}

fn ensure_element(document: &Document, id: &str, tag: &str, style: &str) -> Result<Element, JsValue> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el);
    }
    let el = document.create_element(tag)?;
    el.set_id(id);
    el.set_attribute("style", style).ok();
    body(document)?.append_child(&el)?;
    Ok(el)
}

impl Renderer for DomRenderer {
    fn play_area(&self) -> PlayArea {
        PlayArea::new(self.container.offset_width() as f64, self.container.offset_height() as f64)
    }

    fn show_score(&mut self, score: i64) {
        self.score.set_text_content(Some(&score.to_string()));
    }

    fn show_time_left(&mut self, seconds: u32) {
        self.time.set_text_content(Some(&seconds.to_string()));
    }

    fn show_target(&mut self, target: &Target) {
        match self.create_target(target) {
            Ok(el) => {
                self.targets.insert(target.id, el);
            }
            Err(e) => console_warn!("could not render target {}: {e:?}", target.id),
        }
    }

    fn remove_target(&mut self, id: TargetId) {
        if let Some(el) = self.targets.remove(&id) {
            el.remove();
        }
    }

    fn clear_targets(&mut self) {
        for (_, el) in self.targets.drain() {
            el.remove();
        }
        self.container.set_inner_html("");
    }

    fn show_banner(&mut self, text: &str) {
        self.banner.set_text_content(Some(text));
        self.banner.set_hidden(false);
    }

    fn hide_banner(&mut self) {
        self.banner.set_hidden(true);
    }

    fn set_controls_locked(&mut self, locked: bool) {
        self.start_button.set_disabled(locked);
        self.difficulty.set_disabled(locked);
    }

    fn announce_game_over(&mut self, final_score: i64) {
        if let Err(e) = self.window.alert_with_message(&format!("Game Over! Your score: {final_score}")) {
            console_warn!("alert failed: {e:?}");
        }
    }
}
