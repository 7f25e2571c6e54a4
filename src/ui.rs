pub mod cards;
pub mod condensed;
pub mod table_mode;
pub mod timeline;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style as RatStyle,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, MessageKind};
use crate::layout::LayoutMode;
use crate::sizing::stylevars;

pub fn render(frame: &mut Frame, app: &App) {
    if let Some(bg) = app.style.background() {
        frame.render_widget(
            Block::default().style(RatStyle::default().bg(bg)),
            frame.size(),
        );
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    match app.mode {
        LayoutMode::Table => table_mode::render(frame, app, chunks[0]),
        LayoutMode::Condensed => condensed::render(frame, app, chunks[0]),
        LayoutMode::Cards | LayoutMode::Grid | LayoutMode::Masonry => {
            cards::render(frame, app, chunks[0])
        }
        LayoutMode::Timeline | LayoutMode::Accordion | LayoutMode::Feed => {
            timeline::render(frame, app, chunks[0])
        }
    }

    render_status_bar(frame, app, chunks[1]);
    render_message_line(frame, app, chunks[2]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let first = app
        .style_vars
        .get(stylevars::FIRST_COLUMN_WIDTH)
        .unwrap_or("-");
    let other = app
        .style_vars
        .get(stylevars::OTHER_COLUMN_WIDTH)
        .unwrap_or("-");

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.mode.display_name()),
            app.style.status_mode(),
        ),
        Span::styled(
            format!(
                " {} | {} | {} rows x {} cols | w {} / {} ",
                app.file_io.file_name(),
                app.width_class.display_name(),
                app.table.row_count(),
                app.table.col_count(),
                first,
                other,
            ),
            app.style.status_bar(),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).style(app.style.status_bar()), area);
}

fn render_message_line(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match &app.message {
        Some(msg) => {
            let style = match msg.kind {
                MessageKind::Info => app.style.message_info(),
                MessageKind::Warning => app.style.message_warning(),
                MessageKind::Error => app.style.message_error(),
            };
            (msg.text.clone(), style)
        }
        None => (
            "q:quit  m:layout  \u{21b5}:expand  r:remeasure  R:reload".to_string(),
            app.style.message_info(),
        ),
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Fit content into `width` cells, ellipsizing on overflow
pub(crate) fn fit(content: &str, width: u16) -> String {
    let width = width as usize;
    if content.width() <= width {
        return content.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in content.chars() {
        let w = ch.to_string().width();
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}

/// Pad content on the right out to `width` cells
pub(crate) fn pad_to(content: &str, width: u16) -> String {
    let mut out = fit(content, width);
    let missing = (width as usize).saturating_sub(out.width());
    out.extend(std::iter::repeat(' ').take(missing));
    out
}
