// Layout constants shared by the views

use ratatui::layout::Rect;

/// Horizontal padding for main content (left + right)
pub const CONTENT_PADDING_H: u16 = 2;

pub const HEADER_HEIGHT: u16 = 1;

/// Footer height (key hints)
pub const FOOTER_HEIGHT: u16 = 1;

pub const STATUSBAR_HEIGHT: u16 = 1;

/// Lines per call card: name, type and date, duration, spacer
pub const CARD_HEIGHT: u16 = 4;

pub const MODAL_WIDTH: u16 = 56;

pub const MODAL_HEIGHT: u16 = 7;

/// Apply horizontal content padding to an area
pub fn with_content_padding(area: Rect) -> Rect {
    Rect::new(
        area.x + CONTENT_PADDING_H,
        area.y,
        area.width.saturating_sub(CONTENT_PADDING_H * 2),
        area.height,
    )
}

/// Centered rect of at most `width` x `height` inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
