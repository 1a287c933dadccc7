//! Text cursor offsets for picture backgrounds.
//!
//! The host's text engine recomputes line starts on every new line, so the
//! offset is applied per line (x) and per page reset (y), never once per box.

use msgbg_common::OffsetConfig;

use crate::message::MessageState;

/// Cursor of the host's text engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextState {
    pub x: i32,
    pub y: i32,
    /// Line-start x for the current page
    pub start_x: i32,
    /// Height of the current line, owned by the host
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayoutOffsets {
    x: i32,
    y: i32,
}

impl TextLayoutOffsets {
    pub fn new(offsets: &OffsetConfig) -> Self {
        Self {
            x: offsets.message_x,
            y: offsets.message_y,
        }
    }

    pub fn new_line_x(&self, message: &MessageState, base_x: i32) -> i32 {
        if message.uses_custom_background() {
            base_x.saturating_add(self.x)
        } else {
            base_x
        }
    }

    pub fn new_page_y(&self, message: &MessageState, base_y: i32) -> i32 {
        if message.uses_custom_background() {
            base_y.saturating_add(self.y)
        } else {
            base_y
        }
    }

    /// Cursor reset at the top of a page. `height` is left to the host.
    pub fn new_page(&self, message: &MessageState, text: &mut TextState) {
        text.x = text.start_x;
        text.y = self.new_page_y(message, 0);
    }
}
