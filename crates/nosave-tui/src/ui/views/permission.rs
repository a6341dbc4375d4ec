use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use crate::ui::{layout, theme};

/// Dims whatever is already drawn so the modal stands out
struct DimOverlay;

impl Widget for DimOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(
                        Style::default()
                            .add_modifier(Modifier::DIM)
                            .bg(theme::BG_MODAL_OVERLAY),
                    );
                }
            }
        }
    }
}

/// Modal asking whether the call history may be read.
pub fn render_permission_prompt(f: &mut Frame, area: Rect) {
    f.render_widget(DimOverlay, area);

    let popup = layout::centered(area, layout::MODAL_WIDTH, layout::MODAL_HEIGHT);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            " Call history access ",
            Style::default()
                .fg(theme::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_INACTIVE))
        .style(Style::default().bg(theme::BG_MODAL));

    let lines = vec![
        Line::from(Span::styled(
            "Allow NoSave to read your recent calls?",
            theme::text_primary(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme::ACCENT_SUCCESS)),
            Span::styled(" allow   ", theme::text_muted()),
            Span::styled("n", Style::default().fg(theme::ACCENT_ERROR)),
            Span::styled(" deny", theme::text_muted()),
        ]),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_prompt_dims_background() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| render_permission_prompt(f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();

        // Outside the popup
        assert_eq!(buffer[(0u16, 0u16)].bg, theme::BG_MODAL_OVERLAY);

        let text: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(text.contains("Allow NoSave to read your recent calls?"));
    }
}
