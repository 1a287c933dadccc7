//! Extension points called by the host's message window, and the plugin
//! object that implements them.
//!
//! The host framework owns the window, its open/close animation and its
//! text engine. At each extension point it calls into
//! [`MessageWindowHooks`] and then reads back the returned values.

use std::sync::Arc;

use msgbg_common::{LayoutConfig, OffsetConfig, PluginConfig, Point, Rect, ScreenSize};

use crate::assets::AssetProvider;
use crate::geometry::{GeometryResolver, LayoutMetrics};
use crate::message::MessageState;
use crate::registry::BackgroundRegistry;
use crate::sync::{RenderState, RenderStateSynchronizer};
use crate::text_layout::{TextLayoutOffsets, TextState};

/// Immutable configuration, built once at boot and shared by every window
#[derive(Debug, Clone)]
pub struct Settings {
    pub offsets: OffsetConfig,
    pub registry: Arc<BackgroundRegistry>,
    pub screen: ScreenSize,
    pub layout: LayoutConfig,
}

impl Settings {
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            offsets: config.offsets.clamped(),
            registry: Arc::new(BackgroundRegistry::from_entries(&config.backgrounds)),
            screen: config.screen,
            layout: config.layout,
        }
    }

    /// Build settings and warm every registered picture
    pub fn boot(config: &PluginConfig, assets: &mut dyn AssetProvider) -> Arc<Self> {
        let settings = Self::from_config(config);
        settings.registry.preload_all(assets);
        Arc::new(settings)
    }

    /// Fresh message state bound to this registry
    pub fn new_message(&self) -> MessageState {
        MessageState::new(Arc::clone(&self.registry))
    }
}

pub trait MessageWindowHooks {
    /// Window placement refresh (message start, reposition)
    fn update_placement(
        &mut self,
        message: &MessageState,
        assets: &mut dyn AssetProvider,
        default_pause_sign: &dyn Fn(&Rect) -> Point,
    ) -> &RenderState;

    /// Pause sign refresh; `default` is the framework's own placement
    fn refresh_pause_sign(&mut self, message: &MessageState, default: Point) -> Point;

    /// Line-start x for the text engine
    fn new_line_x(&self, message: &MessageState, base_x: i32) -> i32;

    /// Page reset of the text cursor
    fn new_page(&self, message: &MessageState, text: &mut TextState);

    /// Per-tick dimmer update while the window opens or closes
    fn update_background_dimmer(&mut self, openness: u8);
}

/// Speaker picture backgrounds for one message window
#[derive(Debug, Clone)]
pub struct MessageBackground {
    settings: Arc<Settings>,
    sync: RenderStateSynchronizer,
    text: TextLayoutOffsets,
}

impl MessageBackground {
    pub fn new(settings: Arc<Settings>) -> Self {
        let resolver = GeometryResolver::new(settings.screen, &settings.layout);
        Self::with_resolver(settings, resolver)
    }

    /// Window whose default height comes from the host's line metrics
    pub fn with_metrics(settings: Arc<Settings>, metrics: &dyn LayoutMetrics) -> Self {
        let resolver = GeometryResolver::with_metrics(settings.screen, &settings.layout, metrics);
        Self::with_resolver(settings, resolver)
    }

    fn with_resolver(settings: Arc<Settings>, resolver: GeometryResolver) -> Self {
        let sync = RenderStateSynchronizer::new(resolver, settings.offsets);
        let text = TextLayoutOffsets::new(&settings.offsets);
        Self {
            settings,
            sync,
            text,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn render_state(&self) -> &RenderState {
        self.sync.state()
    }
}

impl MessageWindowHooks for MessageBackground {
    fn update_placement(
        &mut self,
        message: &MessageState,
        assets: &mut dyn AssetProvider,
        default_pause_sign: &dyn Fn(&Rect) -> Point,
    ) -> &RenderState {
        self.sync.apply_placement(message, assets, default_pause_sign)
    }

    fn refresh_pause_sign(&mut self, message: &MessageState, default: Point) -> Point {
        self.sync.refresh_pause_sign(message, default)
    }

    fn new_line_x(&self, message: &MessageState, base_x: i32) -> i32 {
        self.text.new_line_x(message, base_x)
    }

    fn new_page(&self, message: &MessageState, text: &mut TextState) {
        self.text.new_page(message, text)
    }

    fn update_background_dimmer(&mut self, openness: u8) {
        self.sync.update_openness(openness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ImageHandle, MemoryAssets};
    use crate::message::BackgroundMode;
    use crate::sync::framework_pause_sign;
    use msgbg_common::BackgroundEntry;

    fn config() -> PluginConfig {
        PluginConfig {
            backgrounds: vec![
                BackgroundEntry::new("Alice", "alice_bg"),
                BackgroundEntry::new("Bob", "bob_bg"),
                BackgroundEntry::new("Alice", "alice_bg2"),
            ],
            ..PluginConfig::default()
        }
    }

    #[test]
    fn test_boot_preloads_registered_pictures() {
        let mut assets = MemoryAssets::new();
        let settings = Settings::boot(&config(), &mut assets);
        assert_eq!(settings.registry.len(), 2);
        assert_eq!(
            assets.preload_requests(),
            ["alice_bg2".to_string(), "bob_bg".to_string()]
        );
    }

    #[test]
    fn test_full_message_cycle() {
        let mut assets = MemoryAssets::new();
        assets.insert("alice_bg2", 400, 300);
        let settings = Settings::boot(&config(), &mut assets);
        let mut window = MessageBackground::new(Arc::clone(&settings));

        let mut message = settings.new_message();
        message.set_speaker_name("Alice");
        message.set_background(BackgroundMode::Transparent);

        let state = window
            .update_placement(&message, &mut assets, &framework_pause_sign)
            .clone();
        assert_eq!(state.bounds, Rect::new(208, 0, 400, 300));
        assert_eq!(
            state.background.image(),
            Some(&ImageHandle::new("alice_bg2", 400, 300))
        );

        let mut text = TextState::default();
        window.new_page(&message, &mut text);
        assert_eq!(text.y, 64);
        assert_eq!(window.new_line_x(&message, 0), 64);

        for openness in [0u8, 32, 64, 255] {
            window.update_background_dimmer(openness);
            assert_eq!(window.render_state().background.opacity(), openness);
        }

        // Next message: no speaker
        message.clear();
        let state = window.update_placement(&message, &mut assets, &framework_pause_sign);
        assert_eq!(state.bounds, Rect::new(0, 0, 816, 176));
        assert!(state.background.image().is_none());
        assert_eq!(window.new_line_x(&message, 0), 0);
    }

    #[test]
    fn test_windows_share_settings() {
        let mut assets = MemoryAssets::new();
        let settings = Settings::boot(&config(), &mut assets);
        let a = MessageBackground::new(Arc::clone(&settings));
        let b = MessageBackground::new(Arc::clone(&settings));
        assert!(Arc::ptr_eq(&a.settings().registry, &b.settings().registry));
    }
}
