//! Browser bindings
//!
//! The JavaScript front end owns rendering, sounds and popups. It keeps one
//! `WebPuzzle`, forwards clicks and frame times to it, and redraws the cells
//! it reports as flipped.

use wasm_bindgen::prelude::*;

use crate::clock_seed;
use crate::engine::{EngineError, PuzzleEvent, Session};
use crate::settings::{GridSize, Settings};

fn js_err(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("The Black starting...");
}

/// One puzzle run plus the player's preferences
#[wasm_bindgen]
pub struct WebPuzzle {
    session: Session,
    settings: Settings,
}

#[wasm_bindgen]
impl WebPuzzle {
    /// Start a run at the saved grid size
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebPuzzle, JsValue> {
        let settings = Settings::load();
        let session = Session::new(settings.grid_size.dimension(), clock_seed()).map_err(js_err)?;
        Ok(Self { session, settings })
    }

    /// Start a reproducible run; the size becomes the saved preference
    pub fn with_seed(grid_size: usize, seed: u64) -> Result<WebPuzzle, JsValue> {
        let mut settings = Settings::load();
        let size = GridSize::from_dimension(grid_size)
            .ok_or_else(|| JsValue::from_str(&format!("unsupported grid size {}", grid_size)))?;
        if settings.select_grid_size(size) {
            settings.save();
        }
        let session = Session::new(size.dimension(), seed).map_err(js_err)?;
        Ok(Self { session, settings })
    }

    /// Start a fresh run at the current grid size ("new" button)
    pub fn restart(&mut self) -> Result<(), JsValue> {
        let seed = clock_seed();
        self.session
            .restart(self.settings.grid_size.dimension(), seed)
            .map_err(js_err)
    }

    /// Apply a click; returns row-major indices of the flipped cells
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Vec<u32>, JsValue> {
        let size = self.session.board().size();
        let events = self.session.toggle(row, col).map_err(js_err)?;
        let mut flipped = Vec::new();
        for event in events {
            if let PuzzleEvent::CellsFlipped(coords) = event {
                flipped.extend(coords.iter().map(|c| (c.row * size + c.col) as u32));
            }
        }
        Ok(flipped)
    }

    /// Feed frame time (seconds); true if the countdown ran out during this call
    pub fn advance(&mut self, dt: f32) -> bool {
        self.session
            .advance(dt)
            .iter()
            .any(|e| *e == PuzzleEvent::TimedOut)
    }

    pub fn is_black(&self, row: usize, col: usize) -> bool {
        self.session
            .board()
            .get(row, col)
            .map(|c| c.is_black())
            .unwrap_or(false)
    }

    pub fn size(&self) -> usize {
        self.session.board().size()
    }

    pub fn is_solved(&self) -> bool {
        self.session.is_solved()
    }

    /// "in_progress", "solved" or "timed_out"
    pub fn phase(&self) -> String {
        self.session.phase().as_str().to_string()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.session.remaining_seconds()
    }

    pub fn moves(&self) -> u32 {
        self.session.moves()
    }

    pub fn audio_on(&self) -> bool {
        self.settings.audio_on
    }

    /// Set and persist the audio preference
    pub fn set_audio_on(&mut self, on: bool) {
        if self.settings.set_audio(on) {
            self.settings.save();
        }
    }

    /// Flip and persist the audio preference
    pub fn toggle_audio(&mut self) -> bool {
        let on = self.settings.toggle_audio();
        self.settings.save();
        on
    }

    /// Current size label ("3X3" / "4X4")
    pub fn grid_size(&self) -> String {
        self.settings.grid_size.as_str().to_string()
    }

    /// Pick a grid size by label, persist it and restart the run
    pub fn set_grid_size(&mut self, label: &str) -> Result<(), JsValue> {
        let size = GridSize::from_str(label)
            .ok_or_else(|| JsValue::from_str(&format!("unknown grid size '{}'", label)))?;
        if self.settings.select_grid_size(size) {
            self.settings.save();
        }
        self.restart()
    }
}
