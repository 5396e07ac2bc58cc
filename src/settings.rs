//! Player preferences
//!
//! Persisted separately from any puzzle state in LocalStorage.

use serde::{Deserialize, Serialize};

/// Grid sizes offered by the size picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GridSize {
    #[default]
    ThreeByThree,
    FourByFour,
}

impl GridSize {
    pub const ALL: [GridSize; 2] = [GridSize::ThreeByThree, GridSize::FourByFour];

    /// Button label
    pub fn as_str(&self) -> &'static str {
        match self {
            GridSize::ThreeByThree => "3X3",
            GridSize::FourByFour => "4X4",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "3x3" | "3" => Some(GridSize::ThreeByThree),
            "4x4" | "4" => Some(GridSize::FourByFour),
            _ => None,
        }
    }

    /// Grid dimension N
    pub fn dimension(&self) -> usize {
        match self {
            GridSize::ThreeByThree => 3,
            GridSize::FourByFour => 4,
        }
    }

    pub fn from_dimension(n: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.dimension() == n)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Play flip/win sounds (off until the player opts in)
    #[serde(default)]
    pub audio_on: bool,
    /// Last grid size picked
    #[serde(default)]
    pub grid_size: GridSize,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "the_black_settings";

    /// Flip the audio preference, returning the new value
    pub fn toggle_audio(&mut self) -> bool {
        self.audio_on = !self.audio_on;
        self.audio_on
    }

    /// Set the audio preference; true if it changed
    pub fn set_audio(&mut self, on: bool) -> bool {
        let changed = self.audio_on != on;
        self.audio_on = on;
        changed
    }

    /// Pick a grid size; true if it changed
    pub fn select_grid_size(&mut self, size: GridSize) -> bool {
        let changed = self.grid_size != size;
        self.grid_size = size;
        changed
    }

    /// Parse stored JSON, falling back to defaults when it is unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    report_write(storage.set_item(Self::STORAGE_KEY, &json));
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Log the outcome of a storage write; true when it landed
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn report_write<E: std::fmt::Debug>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => {
            log::info!("Settings saved");
            true
        }
        Err(e) => {
            log::warn!("Could not write settings: {:?}", e);
            false
        }
    }
}
