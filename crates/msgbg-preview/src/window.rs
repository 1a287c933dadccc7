//! Minimal stand-in for the host's message window.
//!
//! Owns what the real framework owns (openness animation, text cursor,
//! line height) and calls the plugin at the same extension points.

use msgbg_common::Point;
use msgbg_core::{
    framework_pause_sign, AssetProvider, MessageBackground, MessageState, MessageWindowHooks,
    RenderState, TextState,
};

/// Openness change per frame
const OPEN_SPEED: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Animation {
    Idle,
    Opening,
    Closing,
}

pub struct PreviewWindow {
    hooks: MessageBackground,
    openness: u8,
    animation: Animation,
    text: TextState,
    line_height: i32,
}

impl PreviewWindow {
    pub fn new(hooks: MessageBackground) -> Self {
        let line_height = hooks.settings().layout.line_height;
        Self {
            hooks,
            openness: 0,
            animation: Animation::Idle,
            text: TextState::default(),
            line_height,
        }
    }

    pub fn openness(&self) -> u8 {
        self.openness
    }

    pub fn is_open(&self) -> bool {
        self.openness == u8::MAX
    }

    pub fn is_closed(&self) -> bool {
        self.openness == 0
    }

    pub fn render_state(&self) -> &RenderState {
        self.hooks.render_state()
    }

    /// Place the window for a new message and begin opening it
    pub fn start_message(&mut self, message: &MessageState, assets: &mut dyn AssetProvider) {
        self.hooks
            .update_placement(message, assets, &framework_pause_sign);
        self.new_page(message);
        self.animation = Animation::Opening;
    }

    /// True while the bound background picture has no size yet
    pub fn awaiting_picture(&self) -> bool {
        self.render_state()
            .background
            .image()
            .is_some_and(|image| !image.is_ready())
    }

    /// Reposition without restarting the message (e.g. picture finished
    /// loading, background changed)
    pub fn refresh_placement(&mut self, message: &MessageState, assets: &mut dyn AssetProvider) {
        self.hooks
            .update_placement(message, assets, &framework_pause_sign);
    }

    pub fn close(&mut self) {
        self.animation = Animation::Closing;
    }

    /// One frame of the open/close animation. Returns true while animating.
    pub fn update(&mut self) -> bool {
        match self.animation {
            Animation::Idle => return false,
            Animation::Opening => {
                self.openness = self.openness.saturating_add(OPEN_SPEED);
                if self.is_open() {
                    self.animation = Animation::Idle;
                }
            }
            Animation::Closing => {
                self.openness = self.openness.saturating_sub(OPEN_SPEED);
                if self.is_closed() {
                    self.animation = Animation::Idle;
                }
            }
        }
        self.hooks.update_background_dimmer(self.openness);
        true
    }

    pub fn new_page(&mut self, message: &MessageState) {
        self.text.start_x = self.hooks.new_line_x(message, 0);
        self.hooks.new_page(message, &mut self.text);
        self.text.height = self.line_height;
    }

    /// Lay out lines from the current cursor; returns each line's origin
    pub fn lay_out_lines(&mut self, message: &MessageState, lines: &[String]) -> Vec<Point> {
        let mut origins = Vec::with_capacity(lines.len());
        for (i, _line) in lines.iter().enumerate() {
            if i > 0 {
                self.text.x = self.hooks.new_line_x(message, 0);
                self.text.y += self.text.height;
            }
            origins.push(Point::new(self.text.x, self.text.y));
        }
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use msgbg_common::{BackgroundEntry, PluginConfig, Rect};
    use msgbg_core::{BackgroundMode, MemoryAssets, Settings};

    fn setup() -> (PreviewWindow, MessageState, MemoryAssets) {
        let config = PluginConfig {
            backgrounds: vec![BackgroundEntry::new("Alice", "alice_bg")],
            ..PluginConfig::default()
        };
        let mut assets = MemoryAssets::new();
        assets.insert_pending("alice_bg", 400, 300);
        let settings = Settings::boot(&config, &mut assets);
        let window = PreviewWindow::new(MessageBackground::new(Arc::clone(&settings)));

        let mut message = settings.new_message();
        message.set_speaker_name("Alice");
        message.set_background(BackgroundMode::Transparent);
        (window, message, assets)
    }

    #[test]
    fn test_opacity_tracks_open_and_close() {
        let (mut window, message, mut assets) = setup();
        window.start_message(&message, &mut assets);

        while window.update() {
            assert_eq!(window.render_state().background.opacity(), window.openness());
        }
        assert!(window.is_open());
        assert_eq!(window.render_state().background.opacity(), 255);

        window.close();
        while window.update() {
            assert_eq!(window.render_state().background.opacity(), window.openness());
        }
        assert!(window.is_closed());
        assert_eq!(window.render_state().background.opacity(), 0);
    }

    #[test]
    fn test_late_picture_corrects_on_refresh() {
        let (mut window, message, mut assets) = setup();
        window.start_message(&message, &mut assets);
        assert_eq!(window.render_state().bounds, Rect::new(408, 0, 0, 0));
        assert!(window.awaiting_picture());

        assets.mark_ready("alice_bg");
        window.refresh_placement(&message, &mut assets);
        assert!(!window.awaiting_picture());
        assert_eq!(window.render_state().bounds, Rect::new(208, 0, 400, 300));
        assert_eq!(window.render_state().pause_sign, Point::new(200, 276));
    }

    #[test]
    fn test_default_layout_never_awaits_picture() {
        let (mut window, mut message, mut assets) = setup();
        message.set_background(BackgroundMode::Window);
        window.start_message(&message, &mut assets);
        assert!(!window.awaiting_picture());
        assert_eq!(window.render_state().background.image(), None);
    }

    #[test]
    fn test_lines_start_at_offset() {
        let (mut window, message, mut assets) = setup();
        assets.mark_ready("alice_bg");
        window.start_message(&message, &mut assets);

        let lines = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        let origins = window.lay_out_lines(&message, &lines);
        assert_eq!(
            origins,
            vec![Point::new(64, 64), Point::new(64, 100), Point::new(64, 136)]
        );
    }
}
