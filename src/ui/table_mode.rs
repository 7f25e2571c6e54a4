use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::pad_to;

/// Full-grid rendering: frozen columns pinned at their computed
/// offsets, the remaining columns scrolling horizontally behind them.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.table.col_count() == 0 || area.width == 0 {
        frame.render_widget(Paragraph::new("(no columns)"), area);
        return;
    }

    let advance = app.font().advance();
    let pad = app.config.density.cell_padding();

    // pinned strip first; never let it eat more than half the viewport
    let pinned_width =
        ((app.offsets.total_width() / advance).round() as u16).min(area.width / 2);

    for (col, offset_px) in app.offsets.iter() {
        if col >= app.table.col_count() {
            continue;
        }
        let x = (offset_px / advance).round() as u16;
        if x >= pinned_width {
            break;
        }
        let width = column_width(app, col).min(pinned_width - x);
        render_column(frame, app, area, x, width, pad, col, true);
    }

    // scrollable strips for the rest, starting at the column scroll
    let mut x = pinned_width;
    let scrollable: Vec<usize> = (0..app.table.col_count())
        .filter(|c| !app.offsets.is_frozen(*c))
        .collect();

    for &col in scrollable.iter().skip(app.scroll_col.min(scrollable.len())) {
        if x >= area.width {
            break;
        }
        let width = column_width(app, col).min(area.width - x);
        render_column(frame, app, area, x, width, pad, col, false);
        x += width;
    }
}

/// Width of one column in character cells, from the published sizing
fn column_width(app: &App, col: usize) -> u16 {
    let px = if col == 0 {
        app.sizing.first_column_width
    } else {
        app.sizing.other_column_width
    };
    app.px_to_cols(px)
}

fn render_column(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    x: u16,
    width: u16,
    pad: u16,
    col: usize,
    frozen: bool,
) {
    if width == 0 {
        return;
    }
    let inner = width.saturating_sub(pad * 2).max(1);
    let pad_str = " ".repeat(pad as usize);

    let header_style = if frozen {
        app.style.frozen_header()
    } else {
        app.style.header()
    };
    let base_style = if frozen {
        app.style.frozen_cell()
    } else {
        app.style.cell()
    };

    let rows_visible = area.height.saturating_sub(1) as usize;
    let mut lines: Vec<Line> = Vec::with_capacity(rows_visible + 1);

    lines.push(Line::from(Span::styled(
        format!("{}{}{}", pad_str, pad_to(app.table.header(col), inner), pad_str),
        header_style,
    )));

    for row in app.scroll_row..(app.scroll_row + rows_visible) {
        let Some(content) = app.table.cell(row, col) else {
            break;
        };
        let style = if row == app.cursor_row {
            app.style.cell_cursor()
        } else {
            base_style
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}{}", pad_str, pad_to(content, inner), pad_str),
            style,
        )));
    }

    let strip = Rect {
        x: area.x + x,
        y: area.y,
        width,
        height: (lines.len() as u16).min(area.height),
    };
    frame.render_widget(Paragraph::new(lines), strip);
}
