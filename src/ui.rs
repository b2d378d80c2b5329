//! DOM presentation
//!
//! The arena is drawn with plain elements: an absolutely positioned button for
//! the target, one div per obstacle, a palette bar and a modal. This module
//! only reads [`ArenaState`]; input wiring lives in the binary.

use web_sys::{Document, Element};

use crate::sim::{ArenaState, GameMode, ShapeKind};

/// Handles to the static page elements
pub struct DomView {
    document: Document,
    arena: Element,
    target: Element,
    preview: Element,
    modal: Element,
    modal_text: Option<Element>,
    mode_label: Option<Element>,
    /// Obstacles already turned into elements
    rendered_obstacles: usize,
}

impl DomView {
    /// Look up the page elements. None if the page is missing the arena markup.
    pub fn new(document: Document) -> Option<Self> {
        let arena = document.get_element_by_id("arena")?;
        let target = document.get_element_by_id("target")?;
        let preview = document.get_element_by_id("drag-preview")?;
        let modal = document.get_element_by_id("modal")?;
        let modal_text = document.get_element_by_id("modal-text");
        let mode_label = document.get_element_by_id("mode-label");
        Some(Self {
            document,
            arena,
            target,
            preview,
            modal,
            modal_text,
            mode_label,
            rendered_obstacles: 0,
        })
    }

    /// Bring the DOM in line with the arena state
    pub fn sync(&mut self, state: &ArenaState) {
        self.sync_target(state);
        self.sync_obstacles(state);
        self.sync_preview(state);
        self.sync_palette(state);
        self.sync_modal(state);
    }

    fn sync_target(&self, state: &ArenaState) {
        let fx = &state.abilities;
        let style = format!(
            "left: {:.3}%; top: {:.3}%; transform: translate(-50%, -50%) scale({}); opacity: {};",
            state.position.x, state.position.y, fx.scale, fx.opacity
        );
        let _ = self.target.set_attribute("style", &style);
        let label = match state.mode {
            GameMode::Evade => "Click Me",
            GameMode::Chase => "Run!",
        };
        self.target.set_text_content(Some(label));
    }

    fn sync_obstacles(&mut self, state: &ArenaState) {
        let size = state.tuning.obstacle_size_px;
        for obstacle in &state.obstacles.as_slice()[self.rendered_obstacles..] {
            let Ok(el) = self.document.create_element("div") else {
                log::warn!("Could not create element for obstacle #{}", obstacle.id);
                return;
            };
            let _ = el.set_attribute("class", &format!("obstacle shape-{}", obstacle.kind.as_str()));
            let _ = el.set_attribute(
                "style",
                &format!(
                    "left: {}px; top: {}px; width: {size}px; height: {size}px; transform: translate(-50%, -50%) rotate({}deg);",
                    obstacle.pos.x, obstacle.pos.y, obstacle.rotation
                ),
            );
            if self.arena.append_child(&el).is_err() {
                log::warn!("Could not attach obstacle #{}", obstacle.id);
                return;
            }
            self.rendered_obstacles += 1;
        }
    }

    fn sync_preview(&self, state: &ArenaState) {
        match &state.drag {
            Some(drag) => {
                let size = state.tuning.obstacle_size_px;
                let _ = self
                    .preview
                    .set_attribute("class", &format!("obstacle preview shape-{}", drag.kind.as_str()));
                let _ = self.preview.set_attribute(
                    "style",
                    &format!(
                        "left: {}px; top: {}px; width: {size}px; height: {size}px; transform: translate(-50%, -50%) rotate({}deg);",
                        drag.pos.x, drag.pos.y, drag.rotation
                    ),
                );
            }
            None => {
                let _ = self.preview.set_attribute("class", "hidden");
            }
        }
    }

    fn sync_palette(&self, state: &ArenaState) {
        for kind in ShapeKind::ALL {
            let Some(item) = self.palette_item(kind) else {
                continue;
            };
            let remaining = state.inventory.remaining(kind);
            let class = if remaining > 0 {
                "palette-item"
            } else {
                "palette-item empty"
            };
            let _ = item.set_attribute("class", class);
            if let Ok(Some(count)) = item.query_selector(".count") {
                count.set_text_content(Some(&remaining.to_string()));
            }
        }
    }

    fn sync_modal(&self, state: &ArenaState) {
        if state.is_captured() {
            let _ = self.modal.set_attribute("class", "");
            if let Some(text) = &self.modal_text {
                let msg = match state.mode {
                    GameMode::Evade => "You caught me! 🎉",
                    GameMode::Chase => "Gotcha! I caught you!",
                };
                text.set_text_content(Some(msg));
            }
        } else {
            let _ = self.modal.set_attribute("class", "hidden");
        }

        if let Some(label) = &self.mode_label {
            label.set_text_content(Some(state.mode.as_str()));
        }
    }

    /// Palette element for a shape (`data-shape` attribute)
    pub fn palette_item(&self, kind: ShapeKind) -> Option<Element> {
        self.document
            .query_selector(&format!("[data-shape=\"{}\"]", kind.as_str()))
            .ok()
            .flatten()
    }
}
