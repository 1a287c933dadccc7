//! Render-state synchronizer
//!
//! Sole writer of the message box's presentation state: bounds, the
//! background sprite, and the pause sign position. The window framework
//! reads [`RenderState`] every frame.
//!
//! Within one placement pass the update order is fixed:
//!   1. bounds
//!   2. background sprite picture
//!   3. pause sign offset (after the framework's own placement)
//! so no frame shows new bounds with a stale picture.

use msgbg_common::{OffsetConfig, Point, Rect};

use crate::assets::{AssetProvider, ImageHandle};
use crate::geometry::GeometryResolver;
use crate::message::MessageState;

/// Sprite drawn behind the window contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackgroundSprite {
    image: Option<ImageHandle>,
    opacity: u8,
}

impl BackgroundSprite {
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    /// Tracks the window's openness (0 closed, 255 open)
    pub fn opacity(&self) -> u8 {
        self.opacity
    }
}

/// Everything the window framework needs to draw the box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub bounds: Rect,
    pub background: BackgroundSprite,
    /// Pause sign position, window-local
    pub pause_sign: Point,
}

/// The framework's own pause sign placement: bottom center of the window
pub fn framework_pause_sign(bounds: &Rect) -> Point {
    Point::new(bounds.width / 2, bounds.height)
}

#[derive(Debug, Clone)]
pub struct RenderStateSynchronizer {
    resolver: GeometryResolver,
    offsets: OffsetConfig,
    state: RenderState,
}

impl RenderStateSynchronizer {
    pub fn new(resolver: GeometryResolver, offsets: OffsetConfig) -> Self {
        let state = RenderState {
            bounds: resolver.default_bounds(),
            ..RenderState::default()
        };
        Self {
            resolver,
            offsets,
            state,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Refresh bounds, background picture and pause sign for `message`.
    ///
    /// `default_pause_sign` is the framework's placement for the new bounds;
    /// the configured offset is added on top of it.
    pub fn apply_placement(
        &mut self,
        message: &MessageState,
        assets: &mut dyn AssetProvider,
        default_pause_sign: &dyn Fn(&Rect) -> Point,
    ) -> &RenderState {
        let placement = self.resolver.resolve_bounds(message, assets);

        if placement.bounds != self.state.bounds {
            tracing::debug!(
                "Message box bounds {:?} -> {:?}",
                self.state.bounds,
                placement.bounds
            );
        }
        self.state.bounds = placement.bounds;

        if placement.image.as_ref().map(|i| &i.id) != self.state.background.image.as_ref().map(|i| &i.id) {
            match &placement.image {
                Some(image) => tracing::debug!("Binding background picture '{}'", image.id),
                None => tracing::debug!("Unbinding background picture"),
            }
        }
        self.state.background.image = placement.image;

        let base = default_pause_sign(&self.state.bounds);
        self.refresh_pause_sign(message, base);

        &self.state
    }

    /// Apply the pause sign offset to the framework's placement.
    /// Leaves the default untouched unless the custom background is active.
    pub fn refresh_pause_sign(&mut self, message: &MessageState, default: Point) -> Point {
        let position = if message.uses_custom_background() {
            default.offset(self.offsets.pause_sign_x, self.offsets.pause_sign_y)
        } else {
            default
        };
        self.state.pause_sign = position;
        position
    }

    /// Follow the window's open/close animation
    pub fn update_openness(&mut self, openness: u8) {
        self.state.background.opacity = openness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::assets::MemoryAssets;
    use crate::message::BackgroundMode;
    use crate::registry::BackgroundRegistry;
    use msgbg_common::{BackgroundEntry, LayoutConfig, ScreenSize};

    fn setup() -> (RenderStateSynchronizer, MessageState, MemoryAssets) {
        let registry = BackgroundRegistry::from_entries(&[BackgroundEntry::new("Alice", "alice_bg")]);
        let mut message = MessageState::new(Arc::new(registry));
        message.set_speaker_name("Alice");
        message.set_background(BackgroundMode::Transparent);

        let mut assets = MemoryAssets::new();
        assets.insert("alice_bg", 400, 300);

        let resolver = GeometryResolver::new(ScreenSize::new(816, 624), &LayoutConfig::default());
        let sync = RenderStateSynchronizer::new(resolver, OffsetConfig::default());
        (sync, message, assets)
    }

    #[test]
    fn test_custom_placement_binds_picture_and_offsets_pause_sign() {
        let (mut sync, message, mut assets) = setup();
        let state = sync.apply_placement(&message, &mut assets, &framework_pause_sign).clone();

        assert_eq!(state.bounds, Rect::new(208, 0, 400, 300));
        assert_eq!(state.background.image(), Some(&ImageHandle::new("alice_bg", 400, 300)));
        // bottom center (200, 300) + (0, -24)
        assert_eq!(state.pause_sign, Point::new(200, 276));
    }

    #[test]
    fn test_reverting_to_default_unbinds_picture() {
        let (mut sync, mut message, mut assets) = setup();
        sync.apply_placement(&message, &mut assets, &framework_pause_sign);

        message.set_background(BackgroundMode::Window);
        let state = sync.apply_placement(&message, &mut assets, &framework_pause_sign);
        assert_eq!(state.bounds, Rect::new(0, 0, 816, 176));
        assert!(state.background.image().is_none());
        assert_eq!(state.pause_sign, Point::new(408, 176));
    }

    #[test]
    fn test_apply_placement_is_idempotent() {
        let (mut sync, message, mut assets) = setup();
        sync.update_openness(128);
        let first = sync.apply_placement(&message, &mut assets, &framework_pause_sign).clone();
        let second = sync.apply_placement(&message, &mut assets, &framework_pause_sign).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_opacity_follows_openness() {
        let (mut sync, message, mut assets) = setup();
        sync.apply_placement(&message, &mut assets, &framework_pause_sign);
        for openness in (0..=255u8).step_by(32).chain([255, 224, 0]) {
            sync.update_openness(openness);
            assert_eq!(sync.state().background.opacity(), openness);
        }
    }

    #[test]
    fn test_placement_keeps_opacity() {
        let (mut sync, message, mut assets) = setup();
        sync.update_openness(96);
        sync.apply_placement(&message, &mut assets, &framework_pause_sign);
        assert_eq!(sync.state().background.opacity(), 96);
    }

    #[test]
    fn test_pause_sign_untouched_without_custom_background() {
        let (mut sync, mut message, _) = setup();
        message.set_speaker_name("Nobody");
        let p = sync.refresh_pause_sign(&message, Point::new(10, 20));
        assert_eq!(p, Point::new(10, 20));
    }
}
