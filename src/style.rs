use ratatui::style::{Color, Modifier, Style as RatStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Color that can be serialized/deserialized
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// Named color: "red", "blue", "cyan", etc.
    Named(NamedColor),
    /// RGB color: [255, 128, 0]
    Rgb([u8; 3]),
    /// 256-color index: 42
    Indexed(u8),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    White,
    Reset,
}

impl From<ThemeColor> for Color {
    fn from(tc: ThemeColor) -> Color {
        match tc {
            ThemeColor::Named(n) => match n {
                NamedColor::Black => Color::Black,
                NamedColor::Red => Color::Red,
                NamedColor::Green => Color::Green,
                NamedColor::Yellow => Color::Yellow,
                NamedColor::Blue => Color::Blue,
                NamedColor::Magenta => Color::Magenta,
                NamedColor::Cyan => Color::Cyan,
                NamedColor::Gray => Color::Gray,
                NamedColor::DarkGray => Color::DarkGray,
                NamedColor::LightRed => Color::LightRed,
                NamedColor::LightGreen => Color::LightGreen,
                NamedColor::LightYellow => Color::LightYellow,
                NamedColor::LightBlue => Color::LightBlue,
                NamedColor::LightMagenta => Color::LightMagenta,
                NamedColor::LightCyan => Color::LightCyan,
                NamedColor::White => Color::White,
                NamedColor::Reset => Color::Reset,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(r, g, b),
            ThemeColor::Indexed(i) => Color::Indexed(i),
        }
    }
}

/// Style definition for a single element
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<ThemeColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ThemeColor>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub dim: bool,
}

impl ElementStyle {
    pub fn fg(color: ThemeColor) -> Self {
        Self { fg: Some(color), ..Default::default() }
    }

    pub fn with_bg(mut self, color: ThemeColor) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn to_ratatui(&self) -> RatStyle {
        let mut style = RatStyle::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg.into());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.into());
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

/// Complete theme configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background color for the entire UI
    #[serde(default)]
    pub background: Option<ThemeColor>,

    // Table cells
    pub cell: ElementStyle,
    pub cell_cursor: ElementStyle,
    pub header: ElementStyle,

    // Frozen (pinned) columns
    pub frozen_cell: ElementStyle,
    pub frozen_header: ElementStyle,

    // Cards and timeline entries
    pub card_title: ElementStyle,
    pub card_border: ElementStyle,
    pub field_label: ElementStyle,
    pub timeline_marker: ElementStyle,
    pub expand_hint: ElementStyle,

    // Status bar
    pub status_bar: ElementStyle,
    pub status_mode: ElementStyle,

    // Messages
    pub message_info: ElementStyle,
    pub message_warning: ElementStyle,
    pub message_error: ElementStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Dark theme with black background
    pub fn dark() -> Self {
        use NamedColor::*;
        Self {
            name: "dark".to_string(),
            background: Some(ThemeColor::Named(Black)),
            cell: ElementStyle::fg(ThemeColor::Named(White)),
            cell_cursor: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(LightCyan))
                .with_bold(),
            header: ElementStyle::fg(ThemeColor::Named(LightGreen)).with_bold(),
            frozen_cell: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(DarkGray)),
            frozen_header: ElementStyle::fg(ThemeColor::Named(LightGreen))
                .with_bg(ThemeColor::Named(DarkGray))
                .with_bold(),
            card_title: ElementStyle::fg(ThemeColor::Named(LightCyan)).with_bold(),
            card_border: ElementStyle::fg(ThemeColor::Named(DarkGray)),
            field_label: ElementStyle::fg(ThemeColor::Named(Gray)).with_dim(),
            timeline_marker: ElementStyle::fg(ThemeColor::Named(LightYellow)),
            expand_hint: ElementStyle::fg(ThemeColor::Named(LightBlue)),
            status_bar: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(DarkGray)),
            status_mode: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(LightBlue))
                .with_bold(),
            message_info: ElementStyle::fg(ThemeColor::Named(White)),
            message_warning: ElementStyle::fg(ThemeColor::Named(LightYellow)),
            message_error: ElementStyle::fg(ThemeColor::Named(LightRed)).with_bold(),
        }
    }

    /// Light theme (default)
    pub fn light() -> Self {
        use NamedColor::*;
        Self {
            name: "light".to_string(),
            background: None, // Use terminal default
            cell: ElementStyle::fg(ThemeColor::Named(Black)),
            cell_cursor: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Blue))
                .with_bold(),
            header: ElementStyle::fg(ThemeColor::Named(Blue)).with_bold(),
            frozen_cell: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(Gray)),
            frozen_header: ElementStyle::fg(ThemeColor::Named(Blue))
                .with_bg(ThemeColor::Named(Gray))
                .with_bold(),
            card_title: ElementStyle::fg(ThemeColor::Named(Blue)).with_bold(),
            card_border: ElementStyle::fg(ThemeColor::Named(Gray)),
            field_label: ElementStyle::fg(ThemeColor::Named(DarkGray)).with_dim(),
            timeline_marker: ElementStyle::fg(ThemeColor::Named(Yellow)),
            expand_hint: ElementStyle::fg(ThemeColor::Named(Blue)),
            status_bar: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(Gray)),
            status_mode: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Blue))
                .with_bold(),
            message_info: ElementStyle::fg(ThemeColor::Named(Black)),
            message_warning: ElementStyle::fg(ThemeColor::Named(Yellow)),
            message_error: ElementStyle::fg(ThemeColor::Named(Red)).with_bold(),
        }
    }

    /// Load theme from TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse theme file: {}", e))
    }

    /// Get theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// List available built-in themes
    pub fn builtin_names() -> &'static [&'static str] {
        &["dark", "light"]
    }
}

/// Runtime style manager
pub struct Style {
    pub theme: Theme,
}

impl Style {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }

    // Convenience accessors that return ratatui styles
    pub fn cell(&self) -> RatStyle {
        self.theme.cell.to_ratatui()
    }

    pub fn cell_cursor(&self) -> RatStyle {
        self.theme.cell_cursor.to_ratatui()
    }

    pub fn header(&self) -> RatStyle {
        self.theme.header.to_ratatui()
    }

    pub fn frozen_cell(&self) -> RatStyle {
        self.theme.frozen_cell.to_ratatui()
    }

    pub fn frozen_header(&self) -> RatStyle {
        self.theme.frozen_header.to_ratatui()
    }

    pub fn card_title(&self) -> RatStyle {
        self.theme.card_title.to_ratatui()
    }

    pub fn card_border(&self) -> RatStyle {
        self.theme.card_border.to_ratatui()
    }

    pub fn field_label(&self) -> RatStyle {
        self.theme.field_label.to_ratatui()
    }

    pub fn timeline_marker(&self) -> RatStyle {
        self.theme.timeline_marker.to_ratatui()
    }

    pub fn expand_hint(&self) -> RatStyle {
        self.theme.expand_hint.to_ratatui()
    }

    pub fn status_bar(&self) -> RatStyle {
        self.theme.status_bar.to_ratatui()
    }

    pub fn status_mode(&self) -> RatStyle {
        self.theme.status_mode.to_ratatui()
    }

    pub fn message_info(&self) -> RatStyle {
        self.theme.message_info.to_ratatui()
    }

    pub fn message_warning(&self) -> RatStyle {
        self.theme.message_warning.to_ratatui()
    }

    pub fn message_error(&self) -> RatStyle {
        self.theme.message_error.to_ratatui()
    }

    pub fn background(&self) -> Option<Color> {
        self.theme.background.map(|c| c.into())
    }
}
