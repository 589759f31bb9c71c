use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::notify::{Notification, NotificationSink};
use crate::theme::THEME;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Stack of notifications drawn in the bottom-right corner, newest at the bottom.
pub fn render(frame: &mut Frame, area: Rect, sink: &NotificationSink) {
    let width = TOAST_WIDTH.min(area.width);
    let fits = (area.height / TOAST_HEIGHT) as usize;
    let visible = sink.visible();
    let shown = &visible[visible.len().saturating_sub(fits)..];

    let mut y = area.bottom();
    for notification in shown.iter().rev() {
        if y < area.y + TOAST_HEIGHT {
            break;
        }
        y -= TOAST_HEIGHT;
        let rect = Rect::new(area.right().saturating_sub(width), y, width, TOAST_HEIGHT);
        render_toast(frame, rect, notification);
    }
}

fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification) {
    frame.render_widget(Clear, area);
    let style = THEME.notification_style(notification.variant);
    let block = Block::default()
        .title(format!(" {} ", notification.title))
        .title(
            Line::from(Span::styled(
                format!(" {} ", notification.shown_at),
                THEME.muted_style(),
            ))
            .alignment(Alignment::Right),
        )
        .borders(Borders::ALL)
        .border_style(style)
        .style(Style::default().bg(THEME.surface));
    let paragraph = Paragraph::new(Span::styled(
        notification.description.as_str(),
        Style::default().fg(THEME.text),
    ))
    .block(block)
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
