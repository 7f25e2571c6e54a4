use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::fit;

/// Condensed rows: primary columns on one line, secondary and tertiary
/// groups revealed under the row when it is expanded.
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

        let expanded = app.expanded.is_expanded(row, generation);
        let marker = if expanded { "\u{25be} " } else { "\u{25b8} " };
        let row_style = if row == app.cursor_row {
            app.style.cell_cursor()
        } else {
            app.style.cell()
        };

        let primary = groups
            .primary
            .iter()
            .filter_map(|&c| app.table.cell(row, c))
            .collect::<Vec<_>>()
            .join("  ");

        lines.push(Line::from(vec![
            Span::styled(marker, app.style.expand_hint()),
            Span::styled(fit(&primary, area.width.saturating_sub(2)), row_style),
        ]));

        if expanded {
            for &col in groups.secondary.iter().chain(groups.tertiary.iter()) {
                if lines.len() >= max_lines {
                    break;
                }
                let value = app.table.cell(row, col).unwrap_or("");
                lines.push(Line::from(vec![
                    Span::raw("    "),
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
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}
