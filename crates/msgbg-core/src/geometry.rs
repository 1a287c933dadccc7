//! Message box geometry: picture-sized or the default fixed layout.

use msgbg_common::{LayoutConfig, Rect, ScreenSize};

use crate::assets::{AssetProvider, ImageHandle};
use crate::message::MessageState;

/// Host conversion from a text line count to a window height
pub trait LayoutMetrics {
    fn fitting_height(&self, lines: u32) -> i32;
}

/// `lines * line_height + 2 * window_padding`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMetrics {
    pub line_height: i32,
    pub window_padding: i32,
}

impl From<&LayoutConfig> for WindowMetrics {
    fn from(layout: &LayoutConfig) -> Self {
        Self {
            line_height: layout.line_height,
            window_padding: layout.window_padding,
        }
    }
}

impl LayoutMetrics for WindowMetrics {
    fn fitting_height(&self, lines: u32) -> i32 {
        let lines = i32::try_from(lines).unwrap_or(i32::MAX);
        lines
            .saturating_mul(self.line_height)
            .saturating_add(self.window_padding.saturating_mul(2))
    }
}

/// Result of one geometry pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub bounds: Rect,
    /// Picture to bind behind the box; `None` for the default layout
    pub image: Option<ImageHandle>,
}

impl Placement {
    pub fn uses_picture(&self) -> bool {
        self.image.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryResolver {
    screen: ScreenSize,
    default_height: i32,
}

impl GeometryResolver {
    /// Resolver using the built-in window metrics from `layout`
    pub fn new(screen: ScreenSize, layout: &LayoutConfig) -> Self {
        Self::with_metrics(screen, layout, &WindowMetrics::from(layout))
    }

    /// Resolver with host-provided line metrics
    pub fn with_metrics(
        screen: ScreenSize,
        layout: &LayoutConfig,
        metrics: &dyn LayoutMetrics,
    ) -> Self {
        let default_height = metrics
            .fitting_height(layout.line_count)
            .saturating_add(layout.extra_padding);
        Self {
            screen,
            default_height,
        }
    }

    pub fn default_height(&self) -> i32 {
        self.default_height
    }

    /// Full-width box at the top of the screen
    pub fn default_bounds(&self) -> Rect {
        let width = self.screen.width;
        Rect::new(self.screen.centered_x(width), 0, width, self.default_height)
    }

    /// Compute the box for the current message.
    ///
    /// Never fails: a picture that is still loading yields a zero-sized box
    /// centered on the screen, and the next call picks up the real size.
    pub fn resolve_bounds(
        &self,
        message: &MessageState,
        assets: &mut dyn AssetProvider,
    ) -> Placement {
        let Some(picture) = message.custom_background_picture() else {
            return Placement {
                bounds: self.default_bounds(),
                image: None,
            };
        };

        let image = assets.get(picture);
        if !image.is_ready() {
            tracing::trace!("Background '{}' not loaded yet, using empty bounds", picture);
        }
        let width = i32::try_from(image.width).unwrap_or(i32::MAX);
        let height = i32::try_from(image.height).unwrap_or(i32::MAX);

        Placement {
            bounds: Rect::new(self.screen.centered_x(width), 0, width, height),
            image: Some(image),
        }
    }
}
