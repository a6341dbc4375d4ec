// Centralized theme for the call log screen
// All colors and styles live here

use ratatui::style::{Color, Modifier, Style};

use nosave_core::CallType;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// App background - pure black for contrast
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Card background - very subtle lift from black
pub const BG_CARD: Color = Color::Rgb(18, 18, 18);

/// Selected card background
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Status bar background
pub const BG_SIDEBAR: Color = Color::Rgb(12, 12, 12);

/// Modal background
pub const BG_MODAL: Color = Color::Rgb(23, 23, 23);

/// Dimmed backdrop behind modals
pub const BG_MODAL_OVERLAY: Color = Color::Rgb(8, 8, 8);

// -----------------------------------------------------------------------------
// Text Colors
// -----------------------------------------------------------------------------

pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);

pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Hints, placeholders
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

// -----------------------------------------------------------------------------
// Accent Colors
// -----------------------------------------------------------------------------

/// Primary accent - muted blue (focus, selection bar)
pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);

pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);

pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);

pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

/// Chat action - the chat app's brand green, toned down
pub const ACCENT_CHAT: Color = Color::Rgb(72, 170, 110);

pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

// =============================================================================
// STYLES
// =============================================================================

pub fn text_primary() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn text_dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn text_bold() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn status_error() -> Style {
    Style::default().fg(ACCENT_ERROR)
}

pub fn card_bg() -> Style {
    Style::default().bg(BG_CARD)
}

pub fn card_bg_selected() -> Style {
    Style::default().bg(BG_SELECTED)
}

pub fn chat_hint() -> Style {
    Style::default().fg(ACCENT_CHAT)
}

/// Color for the call-type label on a card
pub fn call_type_color(call_type: CallType) -> Color {
    match call_type {
        CallType::Incoming => ACCENT_SUCCESS,
        CallType::Outgoing => ACCENT_PRIMARY,
        CallType::Missed | CallType::Rejected => ACCENT_ERROR,
        CallType::Blocked => ACCENT_WARNING,
        CallType::Unknown => TEXT_MUTED,
    }
}
