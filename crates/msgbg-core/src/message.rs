//! In-flight message state: who is speaking and how the box background
//! is drawn.

use std::sync::Arc;

use crate::registry::BackgroundRegistry;

/// Message box background setting (host indices 0, 1, 2)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BackgroundMode {
    /// Window frame with dimmed contents
    #[default]
    Window,
    /// Dimmer strip only
    Dim,
    /// No frame; the only mode a speaker picture can replace
    Transparent,
}

impl BackgroundMode {
    /// Map a host background index. Unknown values fall back to `Window`.
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => BackgroundMode::Dim,
            2 => BackgroundMode::Transparent,
            _ => BackgroundMode::Window,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            BackgroundMode::Window => 0,
            BackgroundMode::Dim => 1,
            BackgroundMode::Transparent => 2,
        }
    }
}

/// Speaker and background mode of the current message.
///
/// Both fields may change mid-message, so nothing derived from them is
/// cached here.
#[derive(Debug, Clone)]
pub struct MessageState {
    registry: Arc<BackgroundRegistry>,
    speaker_name: String,
    background: BackgroundMode,
}

impl MessageState {
    pub fn new(registry: Arc<BackgroundRegistry>) -> Self {
        Self {
            registry,
            speaker_name: String::new(),
            background: BackgroundMode::default(),
        }
    }

    pub fn speaker_name(&self) -> &str {
        &self.speaker_name
    }

    pub fn set_speaker_name(&mut self, name: &str) {
        self.speaker_name.clear();
        self.speaker_name.push_str(name);
    }

    pub fn background(&self) -> BackgroundMode {
        self.background
    }

    pub fn set_background(&mut self, mode: BackgroundMode) {
        self.background = mode;
    }

    /// Reset to an empty message (no speaker, window background)
    pub fn clear(&mut self) {
        self.speaker_name.clear();
        self.background = BackgroundMode::default();
    }

    /// Picture registered for the current speaker, regardless of mode
    pub fn background_picture_name(&self) -> Option<&str> {
        self.registry.lookup(&self.speaker_name)
    }

    /// Picture to draw for this message, if the custom background applies.
    /// An empty registered picture counts as none.
    pub fn custom_background_picture(&self) -> Option<&str> {
        if self.background == BackgroundMode::Transparent {
            self.background_picture_name().filter(|p| !p.is_empty())
        } else {
            None
        }
    }

    pub fn uses_custom_background(&self) -> bool {
        self.custom_background_picture().is_some()
    }
}
