use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::layout::LayoutMode;
use crate::ui::fit;

/// Fields shown inside a card beyond the title
const CARD_FIELDS: usize = 4;

/// Card-based rendering for the tablet modes. Cards lays two cards per
/// row, Grid three, Masonry packs variable-height cards into the
/// shortest column.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.table.row_count() == 0 {
        frame.render_widget(Paragraph::new("(no rows)"), area);
        return;
    }

    let per_row = match app.mode {
        LayoutMode::Grid => 3,
        _ => 2,
    };
    let gap = app.config.density.row_gap();
    let card_width = (area.width / per_row).max(10);

    // one running y per card column, so masonry can stagger
    let mut col_y = vec![0u16; per_row as usize];

    for row in app.scroll_row..app.table.row_count() {
        let fields = card_fields(app, row);
        let height = fields.len() as u16 + 2; // borders

        // shortest column takes the next card
        let slot = (0..per_row as usize)
            .min_by_key(|i| col_y[*i])
            .unwrap_or(0);
        let y = col_y[slot];
        if y + height > area.height {
            break;
        }
        col_y[slot] = y + height + gap;

        // non-masonry modes advance all columns together per rank
        if app.mode != LayoutMode::Masonry && slot == per_row as usize - 1 {
            let bottom = col_y.iter().copied().max().unwrap_or(0);
            col_y.iter_mut().for_each(|v| *v = bottom);
        }

        let card = Rect {
            x: area.x + slot as u16 * card_width,
            y: area.y + y,
            width: card_width,
            height,
        };

        render_card(frame, app, card, row, &fields);
    }
}

fn card_fields(app: &App, row: usize) -> Vec<(String, String)> {
    (1..app.table.col_count())
        .take(CARD_FIELDS)
        .filter_map(|col| {
            app.table
                .cell(row, col)
                .filter(|v| !v.is_empty())
                .map(|v| (app.table.header(col).to_string(), v.to_string()))
        })
        .collect()
}

fn render_card(frame: &mut Frame, app: &App, card: Rect, row: usize, fields: &[(String, String)]) {
    let title = app.table.cell(row, 0).unwrap_or("");
    let title_style = if row == app.cursor_row {
        app.style.cell_cursor()
    } else {
        app.style.card_title()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style.card_border())
        .title(Span::styled(
            fit(title, card.width.saturating_sub(4)),
            title_style,
        ));

    let inner_width = card.width.saturating_sub(2);
    let lines: Vec<Line> = fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), app.style.field_label()),
                Span::styled(
                    fit(value, inner_width.saturating_sub(label.len() as u16 + 3)),
                    app.style.cell(),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), card);
}
