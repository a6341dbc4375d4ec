use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::format::truncate_with_ellipsis;
use crate::ui::notifications::{Notification, NotificationLevel};
use crate::ui::theme;

/// Width reserved for the right-hand summary
const SUMMARY_WIDTH: u16 = 16;

/// Bottom line: current notification on the left, summary right-aligned.
pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    notification: Option<&Notification>,
    summary: &str,
) {
    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(SUMMARY_WIDTH)])
        .split(area);
    let notification_area = chunks[0];
    let summary_area = chunks[1];

    let notification_paragraph = if let Some(notification) = notification {
        let color = match notification.level {
            NotificationLevel::Info => theme::ACCENT_PRIMARY,
            NotificationLevel::Success => theme::ACCENT_SUCCESS,
            NotificationLevel::Warning => theme::ACCENT_WARNING,
            NotificationLevel::Error => theme::ACCENT_ERROR,
        };
        let icon = notification.level.icon();

        // " icon " takes the icon plus two spaces
        let icon_width = icon.width() + 2;
        let available = (notification_area.width as usize).saturating_sub(icon_width);
        let message = truncate_with_ellipsis(&notification.message, available);

        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(color)),
            Span::styled(message, Style::default().fg(color)),
        ]))
        .style(Style::default().bg(theme::BG_SIDEBAR))
    } else {
        Paragraph::new("").style(Style::default().bg(theme::BG_SIDEBAR))
    };
    f.render_widget(notification_paragraph, notification_area);

    let padding = (summary_area.width as usize).saturating_sub(summary.width() + 1);
    let summary_paragraph = Paragraph::new(format!("{}{} ", " ".repeat(padding), summary))
        .style(Style::default().fg(theme::TEXT_MUTED).bg(theme::BG_SIDEBAR));
    f.render_widget(summary_paragraph, summary_area);
}
