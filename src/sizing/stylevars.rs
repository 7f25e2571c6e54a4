use crate::sizing::core::{SizingConfig, SizingResult};

pub const FIRST_COLUMN_WIDTH: &str = "--first-column-width";
pub const OTHER_COLUMN_WIDTH: &str = "--other-column-width";
pub const OTHER_COLUMNS_MIN_WIDTH: &str = "--other-columns-min-width";
pub const TOTAL_COLUMNS: &str = "--total-columns";
pub const AVAILABLE_WIDTH: &str = "--available-width";

/// Style variables scoped to one table container.
///
/// This is the engine's only output surface: the measurement routine
/// writes the whole set from the debounced callback, renderers read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleVars {
    vars: Vec<(String, String)>,
}

impl StyleVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a sizing result as the canonical variable set.
    pub fn from_sizing(result: &SizingResult, config: &SizingConfig) -> Self {
        let mut vars = Self::new();
        vars.set_px(FIRST_COLUMN_WIDTH, result.first_column_width);
        vars.set_px(OTHER_COLUMN_WIDTH, result.other_column_width);
        vars.set_px(OTHER_COLUMNS_MIN_WIDTH, config.other_columns_min_width);
        vars.set(TOTAL_COLUMNS, result.total_columns.to_string());
        vars.set_px(AVAILABLE_WIDTH, result.available_width);
        vars
    }

    pub fn set(&mut self, name: &str, value: String) {
        match self.vars.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.vars.push((name.to_string(), value)),
        }
    }

    pub fn set_px(&mut self, name: &str, px: f64) {
        self.set(name, format!("{}px", px));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
