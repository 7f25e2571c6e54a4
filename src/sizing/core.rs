use serde::{Deserialize, Serialize};

/// Hard ceiling on the first column as a share of the available width.
/// Whatever the configured maximum says, the first column never takes
/// more than this fraction of the container.
pub const FIRST_COLUMN_MAX_SHARE: f64 = 0.35;

/// Bounds and tuning for the sizing pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    pub enable_content_measurement: bool,
    pub first_column_max_width: f64,
    pub first_column_min_width: f64,
    pub other_columns_min_width: f64,
    pub measurement_debounce_ms: u64,
    /// Padding added to every probed cell width
    pub cell_padding: f64,
    /// Padding subtracted from the container width
    pub container_padding: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            enable_content_measurement: true,
            first_column_max_width: 300.0,
            first_column_min_width: 150.0,
            other_columns_min_width: 80.0,
            measurement_debounce_ms: 100,
            cell_padding: 24.0,
            container_padding: 32.0,
        }
    }
}

/// Raw width of one probed cell, discarded after each pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMeasurement {
    pub column_index: usize,
    pub measured_content_width: f64,
}

/// Derived widths for one table instance
#[derive(Debug, Clone, PartialEq)]
pub struct SizingResult {
    pub first_column_width: f64,
    pub other_column_width: f64,
    pub total_columns: usize,
    pub available_width: f64,
}

/// Clamp a raw content width into the configured bounds.
///
/// The floor is applied before the caps, so an inconsistent
/// configuration (`min > max`) resolves with the max binding.
pub fn clamp_first_column(raw: f64, config: &SizingConfig, available: f64) -> f64 {
    raw.max(config.first_column_min_width)
        .min(config.first_column_max_width)
        .min(available * FIRST_COLUMN_MAX_SHARE)
}

/// Split the remaining width evenly across the non-first columns.
/// A table with a single column has no "other" columns to divide by,
/// so the configured minimum is returned directly.
pub fn other_column_width(
    available: f64,
    first_column_width: f64,
    total_columns: usize,
    config: &SizingConfig,
) -> f64 {
    if total_columns <= 1 {
        return config.other_columns_min_width;
    }
    let remaining = available - first_column_width;
    (remaining / (total_columns - 1) as f64).max(config.other_columns_min_width)
}

/// Derive a full sizing result from a set of probe measurements.
/// Deterministic: identical inputs produce identical output.
pub fn derive(
    measurements: &[ColumnMeasurement],
    total_columns: usize,
    available: f64,
    config: &SizingConfig,
) -> SizingResult {
    let raw = measurements
        .iter()
        .filter(|m| m.column_index == 0)
        .map(|m| m.measured_content_width)
        .fold(config.first_column_min_width, f64::max);

    let first_column_width = clamp_first_column(raw, config, available);
    let other_column_width = other_column_width(available, first_column_width, total_columns, config);

    SizingResult {
        first_column_width,
        other_column_width,
        total_columns,
        available_width: available,
    }
}
