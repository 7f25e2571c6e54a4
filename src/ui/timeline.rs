use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::layout::LayoutMode;
use crate::ui::fit;

/// Fields a feed entry shows without expansion
const FEED_FIELDS: usize = 3;

/// Vertical list rendering for the mobile modes. Timeline draws a
/// marker rail with expandable detail, Accordion drops the rail in
/// favor of fold markers, Feed always shows its lead fields.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.table.row_count() == 0 {
        frame.render_widget(Paragraph::new("(no rows)"), area);
        return;
    }

    let groups = app.table.column_groups();
    let generation = app.table.generation();
    let max_lines = area.height as usize;
    let mut lines: Vec<Line> = Vec::with_capacity(max_lines);

    for row in app.scroll_row..app.table.row_count() {
        if lines.len() >= max_lines {
            break;
        }

        let expanded = match app.mode {
            LayoutMode::Feed => false,
            _ => app.expanded.is_expanded(row, generation),
        };
        let row_style = if row == app.cursor_row {
            app.style.cell_cursor()
        } else {
            app.style.cell()
        };

        let lead = match app.mode {
            LayoutMode::Accordion => {
                if expanded {
                    "\u{25be} "
                } else {
                    "\u{25b8} "
                }
            }
            _ => "\u{25cf} ",
        };
        let lead_style = match app.mode {
            LayoutMode::Accordion => app.style.expand_hint(),
            _ => app.style.timeline_marker(),
        };

        let title = title_line(app, row, &groups.primary);
        lines.push(Line::from(vec![
            Span::styled(lead, lead_style),
            Span::styled(fit(&title, area.width.saturating_sub(2)), row_style),
        ]));

        let detail: Vec<usize> = if expanded {
            groups.secondary.iter().chain(groups.tertiary.iter()).copied().collect()
        } else if app.mode == LayoutMode::Feed {
            groups.secondary.iter().take(FEED_FIELDS).copied().collect()
        } else {
            Vec::new()
        };

        for col in detail {
            if lines.len() >= max_lines {
                break;
            }
            let value = app.table.cell(row, col).unwrap_or("");
            let rail = match app.mode {
                LayoutMode::Timeline => "\u{2502} ",
                _ => "  ",
            };
            lines.push(Line::from(vec![
                Span::styled(rail, app.style.timeline_marker()),
                Span::styled(
                    format!("{}: ", app.table.header(col)),
                    app.style.field_label(),
                ),
                Span::styled(
                    fit(value, area.width.saturating_sub(8)),
                    app.style.cell(),
                ),
            ]));
        }

        for _ in 0..app.config.density.row_gap() {
            if lines.len() >= max_lines {
                break;
            }
            lines.push(Line::from(""));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn title_line(app: &App, row: usize, primary: &[usize]) -> String {
    primary
        .iter()
        .filter_map(|&c| app.table.cell(row, c))
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join("  ")
}
