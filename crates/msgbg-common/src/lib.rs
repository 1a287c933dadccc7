//! Common types shared across msgbg crates
//!
//! Screen-space geometry primitives used by the core and the preview host,
//! plus the configuration model (see [`config`]).

pub mod config;

use serde::{Deserialize, Serialize};

pub use config::{
    BackgroundEntry, ConfigError, LayoutConfig, OffsetConfig, PluginConfig, OFFSET_LIMIT,
};

/// A position in screen pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by a pixel offset, saturating at the `i32` range
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Size of the game screen (the host's `Graphics.width/height`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Left edge that horizontally centers a box of `width` on this screen.
    /// Floors, so a box wider than the screen hangs off both sides evenly.
    pub fn centered_x(&self, width: i32) -> i32 {
        self.width.saturating_sub(width).div_euclid(2)
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 816,
            height: 624,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_x_for_narrow_box() {
        let screen = ScreenSize::new(816, 624);
        assert_eq!(screen.centered_x(400), 208);
        assert_eq!(screen.centered_x(816), 0);
    }

    #[test]
    fn test_centered_x_floors_odd_and_oversized() {
        let screen = ScreenSize::new(816, 624);
        assert_eq!(screen.centered_x(401), 207);
        assert_eq!(screen.centered_x(1001), -93);
    }

    #[test]
    fn test_point_offset() {
        assert_eq!(Point::new(5, 5).offset(0, -24), Point::new(5, -19));
    }

    #[test]
    fn test_point_offset_saturates() {
        let p = Point::new(i32::MAX - 10, i32::MIN + 10);
        assert_eq!(p.offset(OFFSET_LIMIT, -OFFSET_LIMIT), Point::new(i32::MAX, i32::MIN));
    }
}
