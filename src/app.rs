use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use tracing::{info, warn};

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::expand::ExpandedRows;
use crate::fileio::FileIO;
use crate::layout::{self, LayoutMode, WidthClass};
use crate::measure::{CellMetrics, FontSpec, Measurement};
use crate::sizing::core::SizingResult;
use crate::sizing::frozen::FrozenOffsets;
use crate::sizing::stylevars::StyleVars;
use crate::style::{Style, Theme};
use crate::table::Table;
use crate::ui;

/// Poll timeout when no debounce deadline is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// Status-line message with a severity for styling
#[derive(Debug, Clone)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Error, text: text.into() }
    }
}

/// Rows taken by chrome around the content area (header, status,
/// message line)
const CHROME_ROWS: usize = 4;

pub struct App {
    pub table: Table,
    pub config: Config,
    pub style: Style,
    pub file_io: FileIO,

    pub mode: LayoutMode,
    pub width_class: WidthClass,
    override_mode: Option<LayoutMode>,

    pub expanded: ExpandedRows,
    pub sizing: SizingResult,
    pub style_vars: StyleVars,
    pub offsets: FrozenOffsets,

    measurement: Measurement,
    measurer: CellMetrics,
    debouncer: Debouncer,

    pub cursor_row: usize,
    pub scroll_row: usize,
    pub scroll_col: usize,
    pub viewport_rows: usize,

    pub message: Option<Message>,
    pub should_quit: bool,

    viewport_px: f64,
}

impl App {
    pub fn new(table: Table, config: Config, file_io: FileIO) -> Self {
        let theme = match config.theme.as_deref() {
            // a name ending in .toml is a theme file, anything else a built-in
            Some(name) if name.ends_with(".toml") => Theme::from_file(&PathBuf::from(name))
                .unwrap_or_else(|e| {
                    warn!(error = %e, "falling back to default theme");
                    Theme::default()
                }),
            Some(name) => Theme::by_name(name).unwrap_or_else(|| {
                warn!(theme = name, "unknown theme, falling back to default");
                Theme::default()
            }),
            None => Theme::default(),
        };

        let sizing = SizingResult {
            first_column_width: config.sizing.first_column_min_width,
            other_column_width: config.sizing.other_columns_min_width,
            total_columns: table.col_count(),
            available_width: 0.0,
        };

        let debouncer = Debouncer::from_millis(config.sizing.measurement_debounce_ms);
        let measurement = Measurement::new(config.font.clone());

        Self {
            table,
            style: Style::with_theme(theme),
            file_io,
            mode: config.layouts.desktop,
            width_class: WidthClass::Desktop,
            override_mode: None,
            expanded: ExpandedRows::new(),
            sizing,
            style_vars: StyleVars::new(),
            offsets: FrozenOffsets::default(),
            measurement,
            measurer: CellMetrics,
            debouncer,
            cursor_row: 0,
            scroll_row: 0,
            scroll_col: 0,
            viewport_rows: 20,
            message: None,
            should_quit: false,
            viewport_px: 0.0,
            config,
        }
    }

    pub fn font(&self) -> &FontSpec {
        &self.measurement.font
    }

    /// Convert an engine width in px back to character cells
    pub fn px_to_cols(&self, px: f64) -> u16 {
        (px / self.font().advance()).round().max(1.0) as u16
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        // initial pass on mount, against the real terminal size
        let size = terminal.size()?;
        self.set_viewport(size.width, size.height);
        self.remeasure();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            let now = Instant::now();
            let timeout = self
                .debouncer
                .time_left(now)
                .unwrap_or(IDLE_POLL)
                .min(IDLE_POLL);

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            // measurement only ever runs here, from the debounced
            // callback, never inside the render path
            if self.debouncer.fire() {
                self.remeasure();
            }
        }
        Ok(())
    }

    fn set_viewport(&mut self, width_cols: u16, height_rows: u16) {
        self.viewport_px = width_cols as f64 * self.font().advance();
        self.viewport_rows = (height_rows as usize).saturating_sub(CHROME_ROWS).max(1);
    }

    /// Resize events arm the debouncer; the actual measurement happens
    /// once the burst has quieted.
    pub fn handle_resize(&mut self, width_cols: u16, height_rows: u16) {
        self.set_viewport(width_cols, height_rows);
        self.debouncer.trigger();
    }

    /// One full measurement pass: probe, derive, publish, reclassify.
    pub fn remeasure(&mut self) {
        let sizing = {
            let first_column = self.table.first_column_cells();
            self.measurement.run(
                &self.measurer,
                &first_column,
                self.table.col_count(),
                self.viewport_px,
                &self.config.sizing,
            )
        };
        self.style_vars = StyleVars::from_sizing(&sizing, &self.config.sizing);
        self.sizing = sizing;

        let config = &self.config;
        let sizing = &self.sizing;
        self.offsets = FrozenOffsets::compute(&config.frozen_columns, |col| {
            config.explicit_width(col).or(Some(if col == 0 {
                sizing.first_column_width
            } else {
                sizing.other_column_width
            }))
        });

        let class = self.config.breakpoints.classify(self.viewport_px);
        if class != self.width_class {
            // an override only makes sense within the class it was
            // chosen for
            self.override_mode = None;
            self.width_class = class;
            info!(class = class.display_name(), "width class changed");
        }

        let metrics = self.table.content_metrics(self.config.long_content_threshold);
        self.mode = layout::select(class, metrics, &self.config.layouts, self.override_mode);

        self.clamp_cursor();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('m') => {
                let next = layout::cycle(self.mode, self.width_class);
                if next != self.mode {
                    self.override_mode = Some(next);
                    let metrics = self.table.content_metrics(self.config.long_content_threshold);
                    self.mode = layout::select(
                        self.width_class,
                        metrics,
                        &self.config.layouts,
                        self.override_mode,
                    );
                    self.message = Some(Message::info(format!("Layout: {}", self.mode.display_name())));
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.mode.is_expandable() {
                    self.expanded.toggle(self.cursor_row, self.table.generation());
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Left | KeyCode::Char('h') => {
                self.scroll_col = self.scroll_col.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.scroll_col + 1 < self.table.col_count() {
                    self.scroll_col += 1;
                }
            }
            KeyCode::PageDown => self.move_cursor(self.viewport_rows as isize),
            KeyCode::PageUp => self.move_cursor(-(self.viewport_rows as isize)),
            KeyCode::Char('g') => {
                self.cursor_row = 0;
                self.scroll_to_cursor();
            }
            KeyCode::Char('G') => {
                self.cursor_row = self.table.row_count().saturating_sub(1);
                self.scroll_to_cursor();
            }
            KeyCode::Char('r') => {
                // manual re-measurement goes through the same debounced
                // path as everything else
                self.debouncer.trigger();
                self.message = Some(Message::info("Re-measuring"));
            }
            KeyCode::Char('R') => self.reload(),
            _ => {}
        }
    }

    /// Reload the file. A content mutation: the generation bump drops
    /// stale expansion state and the debouncer schedules a new pass.
    fn reload(&mut self) {
        match self.file_io.load_table() {
            Ok(result) => {
                self.table.replace_with(result.table);
                self.debouncer.trigger();
                self.message = if result.warnings.is_empty() {
                    Some(Message::info("Reloaded"))
                } else {
                    Some(Message::warning(result.warnings.join("; ")))
                };
            }
            Err(e) => {
                self.message = Some(Message::error(format!("Reload failed: {}", e)));
            }
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let max = self.table.row_count().saturating_sub(1) as isize;
        self.cursor_row = (self.cursor_row as isize + delta).clamp(0, max.max(0)) as usize;
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        } else if self.cursor_row >= self.scroll_row + self.viewport_rows {
            self.scroll_row = self.cursor_row + 1 - self.viewport_rows;
        }
    }

    fn clamp_cursor(&mut self) {
        if self.table.row_count() > 0 {
            self.cursor_row = self.cursor_row.min(self.table.row_count() - 1);
        } else {
            self.cursor_row = 0;
        }
        if self.table.col_count() > 0 {
            self.scroll_col = self.scroll_col.min(self.table.col_count() - 1);
        } else {
            self.scroll_col = 0;
        }
        self.scroll_to_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fileio::sample_table;
    use crate::sizing::stylevars;

    fn make_app() -> App {
        let file_io = FileIO::new(None, None).unwrap();
        App::new(sample_table(), Config::default(), file_io)
    }

    /// Drive a resize through the same path the event loop uses
    fn resize_and_measure(app: &mut App, cols: u16) {
        app.handle_resize(cols, 40);
        app.remeasure();
    }

    #[test]
    fn wide_terminal_selects_table_mode() {
        let mut app = make_app();
        // 125 cols * 9.6 px = 1200 px, desktop
        resize_and_measure(&mut app, 125);
        assert_eq!(app.width_class, WidthClass::Desktop);
        assert_eq!(app.mode, LayoutMode::Table);
    }

    #[test]
    fn narrow_terminal_falls_to_mobile_mode_once() {
        let mut app = make_app();
        resize_and_measure(&mut app, 125);
        assert_eq!(app.mode, LayoutMode::Table);

        // 72 cols * 9.6 px = 691.2 px, below the 768 mobile breakpoint
        resize_and_measure(&mut app, 72);
        assert_eq!(app.width_class, WidthClass::Mobile);
        let first = app.mode;
        assert_ne!(first, LayoutMode::Table);

        // repeated passes at the same width do not oscillate
        app.remeasure();
        app.remeasure();
        assert_eq!(app.mode, first);
    }

    #[test]
    fn style_vars_published_after_pass() {
        let mut app = make_app();
        resize_and_measure(&mut app, 125);

        assert!(app.style_vars.get(stylevars::FIRST_COLUMN_WIDTH).is_some());
        assert_eq!(
            app.style_vars.get(stylevars::TOTAL_COLUMNS),
            Some("20")
        );
    }

    #[test]
    fn sizing_invariant_holds_after_pass() {
        let mut app = make_app();
        resize_and_measure(&mut app, 125);

        let cfg = &app.config.sizing;
        let cap = cfg
            .first_column_max_width
            .min(app.sizing.available_width * crate::sizing::core::FIRST_COLUMN_MAX_SHARE);
        assert!(app.sizing.first_column_width >= cfg.first_column_min_width.min(cap));
        assert!(app.sizing.first_column_width <= cap);
    }

    #[test]
    fn frozen_offsets_follow_measured_widths() {
        let mut app = make_app();
        resize_and_measure(&mut app, 125);

        // default config freezes column 0
        assert_eq!(app.offsets.offset(0), Some(0.0));
        assert_eq!(app.offsets.total_width(), app.sizing.first_column_width);
    }

    #[test]
    fn override_cleared_when_class_changes() {
        let mut app = make_app();
        resize_and_measure(&mut app, 100); // ~960 px, tablet
        assert_eq!(app.width_class, WidthClass::Tablet);

        app.handle_key(KeyEvent::from(KeyCode::Char('m')));
        let overridden = app.mode;
        assert_ne!(overridden, app.config.layouts.tablet);

        // crossing into desktop drops the override
        resize_and_measure(&mut app, 125);
        assert_eq!(app.mode, LayoutMode::Table);
    }

    #[test]
    fn toggle_is_noop_on_desktop() {
        let mut app = make_app();
        resize_and_measure(&mut app, 125);
        app.handle_key(KeyEvent::from(KeyCode::Char('m')));
        assert_eq!(app.mode, LayoutMode::Table);
    }

    #[test]
    fn reload_drops_expansion_state() {
        let mut app = make_app();
        resize_and_measure(&mut app, 72); // mobile, expandable
        assert!(app.mode.is_expandable());

        app.handle_key(KeyEvent::from(KeyCode::Enter));
        assert!(app.expanded.is_expanded(0, app.table.generation()));

        app.handle_key(KeyEvent::from(KeyCode::Char('R')));
        assert!(!app.expanded.is_expanded(0, app.table.generation()));
    }
}
