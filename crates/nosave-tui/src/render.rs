use nosave_core::presentation::ScreenState;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui;
use crate::ui::components::render_statusbar;
use crate::ui::format::call_count;
use crate::ui::layout;
use crate::ui::App;

pub(crate) fn render(f: &mut Frame, app: &mut App) {
    // Fill entire frame with app background
    let bg_block = Block::default().style(Style::default().bg(ui::theme::BG_APP));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(f.area());

    let header = Paragraph::new(Line::from(Span::styled(
        "Recent Calls",
        Style::default()
            .fg(ui::theme::ACCENT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(header, chunks[0]);

    ui::views::render_call_log(f, app, chunks[1]);

    let hints = match app.screen() {
        ScreenState::Records(_) => "↑↓ select · enter chat · r reload · q quit",
        _ => "r reload · q quit",
    };
    let footer = Paragraph::new(Span::styled(hints, ui::theme::text_dim()));
    f.render_widget(footer, layout::with_content_padding(chunks[2]));

    let summary = match app.screen() {
        ScreenState::Records(records) => call_count(records.len()),
        _ => String::new(),
    };
    render_statusbar(f, chunks[3], app.current_notification(), &summary);

    if app.permission_prompt {
        ui::views::render_permission_prompt(f, f.area());
    }
}
