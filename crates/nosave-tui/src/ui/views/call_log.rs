use nosave_core::presentation::{ScreenState, EMPTY_MESSAGE, PERMISSION_REQUIRED_MESSAGE};
use nosave_core::CallRecord;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::format::truncate_with_ellipsis;
use crate::ui::{layout, theme, App};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Body of the call log screen, one branch per presentation state.
pub fn render_call_log(f: &mut Frame, app: &mut App, area: Rect) {
    let area = layout::with_content_padding(area);
    match app.screen() {
        ScreenState::Loading => {
            let frame = SPINNER_FRAMES[(app.frame_counter / 2) as usize % SPINNER_FRAMES.len()];
            render_centered(
                f,
                area,
                vec![Line::from(Span::styled(
                    format!("{} Loading call history", frame),
                    theme::text_muted(),
                ))],
            );
        }
        ScreenState::Error(message) => render_centered(
            f,
            area,
            vec![
                Line::from(Span::styled(message.to_string(), theme::status_error())),
                Line::from(""),
                Line::from(Span::styled("Press r to retry", theme::text_dim())),
            ],
        ),
        ScreenState::PermissionDenied => render_centered(
            f,
            area,
            vec![
                Line::from(Span::styled(
                    PERMISSION_REQUIRED_MESSAGE,
                    theme::status_error(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Restart with --grant to allow access",
                    theme::text_dim(),
                )),
            ],
        ),
        ScreenState::Empty => render_centered(
            f,
            area,
            vec![Line::from(Span::styled(EMPTY_MESSAGE, theme::text_muted()))],
        ),
        ScreenState::Records(_) => render_records(f, app, area),
    }
}

fn render_centered(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    let text_area = Rect::new(area.x, top, area.width, height);
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        text_area,
    );
}

fn render_records(f: &mut Frame, app: &mut App, area: Rect) {
    let visible = (area.height / layout::CARD_HEIGHT).max(1) as usize;
    let selected = app.selected_index();
    if selected < app.scroll_offset {
        app.scroll_offset = selected;
    } else if selected >= app.scroll_offset + visible {
        app.scroll_offset = selected + 1 - visible;
    }

    let chat_hint = format!("↵ {}", app.chat_app_name());
    let records = app.records();
    let shown = records.iter().enumerate().skip(app.scroll_offset).take(visible);

    let constraints = vec![Constraint::Length(layout::CARD_HEIGHT); visible];
    let slots = Layout::vertical(constraints).split(area);

    for ((index, record), slot) in shown.zip(slots.iter()) {
        let is_selected = index == selected;
        render_card(f, record, *slot, is_selected, &chat_hint);
    }
}

/// Card: name/number, "<Type> • <date>", duration when the call connected.
fn render_card(f: &mut Frame, record: &CallRecord, area: Rect, is_selected: bool, chat_hint: &str) {
    let card_area = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
    let bg = if is_selected {
        theme::card_bg_selected()
    } else {
        theme::card_bg()
    };
    f.render_widget(Block::default().style(bg), card_area);

    let indicator = if is_selected {
        Span::styled("▌", Style::default().fg(theme::ACCENT_PRIMARY))
    } else {
        Span::raw(" ")
    };

    let hint_width = if is_selected { chat_hint.chars().count() + 1 } else { 0 };
    let name_width = (card_area.width as usize).saturating_sub(2 + hint_width);
    let name = truncate_with_ellipsis(record.display_name(), name_width);
    let padding = name_width.saturating_sub(unicode_width::UnicodeWidthStr::width(name.as_str()));

    let mut title = vec![
        indicator.clone(),
        Span::raw(" "),
        Span::styled(name, theme::text_bold()),
    ];
    if is_selected {
        title.push(Span::raw(" ".repeat(padding + 1)));
        title.push(Span::styled(chat_hint.to_string(), theme::chat_hint()));
    }

    let call_type = record.call_type();
    let mut lines = vec![
        Line::from(title),
        Line::from(vec![
            indicator.clone(),
            Span::raw(" "),
            Span::styled(
                call_type.label(),
                Style::default().fg(theme::call_type_color(call_type)),
            ),
            Span::styled(" • ", theme::text_dim()),
            Span::styled(record.formatted_timestamp().to_string(), theme::text_muted()),
        ]),
    ];
    let duration = record.duration_label();
    if !duration.is_empty() {
        lines.push(Line::from(vec![
            indicator,
            Span::raw(" "),
            Span::styled(duration, theme::text_dim()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), card_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app::tests::{app_with, records, settle};
    use nosave_core::PermissionState;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_call_log(f, app, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_permission_denied_message() {
        let mut app = app_with(records(), PermissionState::Denied, Arc::default());
        let screen = draw(&mut app, 60, 10);
        assert!(screen.contains(PERMISSION_REQUIRED_MESSAGE));
    }

    #[tokio::test]
    async fn test_empty_message() {
        let mut app = app_with(Vec::new(), PermissionState::Granted, Arc::default());
        app.start();
        settle(&mut app).await;
        let screen = draw(&mut app, 60, 10);
        assert!(screen.contains(EMPTY_MESSAGE));
    }

    #[tokio::test]
    async fn test_cards_show_name_type_and_duration() {
        let mut app = app_with(records(), PermissionState::Granted, Arc::default());
        app.start();
        settle(&mut app).await;
        let screen = draw(&mut app, 60, 16);
        assert!(screen.contains("Carol"));
        assert!(screen.contains("Missed • "));
        assert!(screen.contains("Duration: 1 min 5 sec"));
        assert!(screen.contains("↵ WhatsApp"));
    }

    #[tokio::test]
    async fn test_scroll_follows_selection() {
        let mut app = app_with(records(), PermissionState::Granted, Arc::default());
        app.start();
        settle(&mut app).await;

        // Room for a single card
        app.select_last();
        let screen = draw(&mut app, 60, layout::CARD_HEIGHT);
        assert_eq!(app.scroll_offset, 2);
        assert!(!screen.contains("Carol"));
    }
}
