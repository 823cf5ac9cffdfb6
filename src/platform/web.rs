//! Browser implementations of the platform ports, plus small DOM helpers

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

use super::{PlayArea, ResultSink};
use crate::outcome::GameResult;

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Look up an element by id, as an error if it is missing
pub fn by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
}

/// Look up an element by id and cast it
pub fn by_id_as<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    by_id(document, id)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has the wrong element type", id)))
}

pub fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Set an element's inline `display`
pub fn set_display(document: &Document, id: &str, display: &str) {
    if let Some(el) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let _ = el.style().set_property("display", display);
    }
}

/// The game canvas as a play area. The drawing buffer tracks the CSS box.
pub struct CanvasArea {
    canvas: HtmlCanvasElement,
}

impl CanvasArea {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    /// Match the drawing buffer to the laid-out size (call before start/resize)
    pub fn sync_size(&self) {
        self.canvas.set_width(self.canvas.offset_width().max(0) as u32);
        self.canvas.set_height(self.canvas.offset_height().max(0) as u32);
    }
}

impl PlayArea for CanvasArea {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }
}

/// Writes score, timer and the result panel into the page
pub struct DomResultSink {
    document: Document,
}

impl DomResultSink {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ResultSink for DomResultSink {
    fn finished(&mut self, result: &GameResult) {
        set_display(&self.document, "gameArea", "none");
        set_display(&self.document, "gameEnd", "block");
        set_text(&self.document, "gameResultText", result.title);
        set_text(&self.document, "gameResultMessage", &result.detail);
    }

    fn score_changed(&mut self, score: u32) {
        set_text(&self.document, "score", &score.to_string());
    }

    fn time_changed(&mut self, time_left: u32) {
        set_text(&self.document, "timer", &time_left.to_string());
    }
}
