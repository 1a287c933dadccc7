//! Speaker-keyed message box backgrounds
//!
//! A message box is normally a fixed-size panel across the top of the
//! screen. When the message is shown with the transparent background and
//! its speaker has a registered picture, the box instead takes the
//! picture's size, draws the picture behind the text, and shifts the text
//! cursor and pause sign by configured offsets.
//!
//! Layout:
//!   registry    : speaker name → picture id
//!   message     : speaker + background mode of the current message
//!   assets      : picture loader seam
//!   geometry    : box bounds
//!   sync        : single writer of bounds / background sprite / pause sign
//!   text_layout : per-line and per-page cursor offsets
//!   plugin      : host extension points and the plugin object

pub mod assets;
pub mod geometry;
pub mod message;
pub mod plugin;
pub mod registry;
pub mod sync;
pub mod text_layout;

pub use assets::{AssetProvider, ImageHandle, MemoryAssets};
pub use geometry::{GeometryResolver, LayoutMetrics, Placement, WindowMetrics};
pub use message::{BackgroundMode, MessageState};
pub use plugin::{MessageBackground, MessageWindowHooks, Settings};
pub use registry::BackgroundRegistry;
pub use sync::{framework_pause_sign, BackgroundSprite, RenderState, RenderStateSynchronizer};
pub use text_layout::{TextLayoutOffsets, TextState};
