use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use crate::sizing::core::{self, ColumnMeasurement, SizingConfig, SizingResult};

/// Probe count at which the pass switches to parallel iteration
const PARALLEL_THRESHOLD: usize = 10_000;

/// Font description the measurer derives glyph advances from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub size_px: f64,
    /// Advance width of one glyph cell as a fraction of the font size
    pub advance_ratio: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        // 16px at 0.6 advance makes an 80-column terminal exactly 768px,
        // so the stock mobile breakpoint lands on the classic 80 columns
        Self {
            size_px: 16.0,
            advance_ratio: 0.6,
        }
    }
}

impl FontSpec {
    /// Advance width of a single glyph cell in pixels
    pub fn advance(&self) -> f64 {
        self.size_px * self.advance_ratio
    }
}

/// The text-measurement seam. The sizing algorithm only ever sees
/// `measure(content, font) -> width px`, so it stays independent of
/// where widths actually come from.
pub trait TextMeasurer {
    fn measure(&self, content: &str, font: &FontSpec) -> f64;
}

/// Glyph-advance summation over the Unicode display width of the
/// content. Wide (CJK) glyphs count double, exactly as they render.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMetrics;

impl TextMeasurer for CellMetrics {
    fn measure(&self, content: &str, font: &FontSpec) -> f64 {
        content.width() as f64 * font.advance()
    }
}

#[derive(Debug, PartialEq)]
pub enum MeasureError {
    /// The container has no usable width to measure against
    NoContainer,
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureError::NoContainer => write!(f, "container has no usable width"),
        }
    }
}

/// Runs measurement passes and holds the last good result.
///
/// Fail-soft: a failing pass logs a warning and hands back the
/// previous result; errors never reach the caller.
#[derive(Debug)]
pub struct Measurement {
    pub font: FontSpec,
    last: Option<SizingResult>,
}

impl Measurement {
    pub fn new(font: FontSpec) -> Self {
        Self { font, last: None }
    }

    pub fn last(&self) -> Option<&SizingResult> {
        self.last.as_ref()
    }

    /// One measurement pass over the first-column probe set.
    pub fn run<M>(
        &mut self,
        measurer: &M,
        first_column: &[&str],
        total_columns: usize,
        container_width: f64,
        config: &SizingConfig,
    ) -> SizingResult
    where
        M: TextMeasurer + Sync,
    {
        match self.try_run(measurer, first_column, total_columns, container_width, config) {
            Ok(result) => {
                self.last = Some(result.clone());
                result
            }
            Err(e) => {
                warn!(error = %e, "measurement failed, keeping previous sizing");
                self.last.clone().unwrap_or_else(|| SizingResult {
                    first_column_width: config.first_column_min_width,
                    other_column_width: config.other_columns_min_width,
                    total_columns,
                    available_width: 0.0,
                })
            }
        }
    }

    fn try_run<M>(
        &self,
        measurer: &M,
        first_column: &[&str],
        total_columns: usize,
        container_width: f64,
        config: &SizingConfig,
    ) -> Result<SizingResult, MeasureError>
    where
        M: TextMeasurer + Sync,
    {
        let available = container_width - config.container_padding;
        if container_width <= 0.0 || available <= 0.0 {
            return Err(MeasureError::NoContainer);
        }

        let measurements = if config.enable_content_measurement {
            let raw = if first_column.len() >= PARALLEL_THRESHOLD {
                first_column
                    .par_iter()
                    .map(|cell| config.cell_padding + measurer.measure(cell, &self.font))
                    .reduce(|| 0.0, f64::max)
            } else {
                first_column
                    .iter()
                    .map(|cell| config.cell_padding + measurer.measure(cell, &self.font))
                    .fold(0.0, f64::max)
            };
            vec![ColumnMeasurement {
                column_index: 0,
                measured_content_width: raw,
            }]
        } else {
            Vec::new()
        };

        Ok(core::derive(&measurements, total_columns, available, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Measurer that reports a fixed width for every probe
    struct Fixed(f64);

    impl TextMeasurer for Fixed {
        fn measure(&self, _content: &str, _font: &FontSpec) -> f64 {
            self.0
        }
    }

    #[test]
    fn cell_metrics_sums_glyph_advances() {
        let font = FontSpec { size_px: 10.0, advance_ratio: 1.0 };
        let m = CellMetrics;
        assert_eq!(m.measure("hello", &font), 50.0);
        assert_eq!(m.measure("", &font), 0.0);
        // CJK glyphs occupy two cells each
        assert_eq!(m.measure("日本", &font), 40.0);
    }

    #[test]
    fn default_font_maps_80_columns_to_mobile_breakpoint() {
        let font = FontSpec::default();
        assert_eq!(80.0 * font.advance(), 768.0);
    }

    #[test]
    fn pass_reproduces_share_clamp_scenario() {
        // container 800, padding 32 -> available 768; probe 476 + 24
        // padding = 500 -> clamped to 0.35 * 768 = 268.8
        let cfg = SizingConfig::default();
        let mut m = Measurement::new(FontSpec::default());
        let result = m.run(&Fixed(476.0), &["whatever"], 5, 800.0, &cfg);

        assert!((result.first_column_width - 268.8).abs() < 1e-9);
        assert_eq!(result.available_width, 768.0);
    }

    #[test]
    fn failed_pass_retains_previous_result() {
        let cfg = SizingConfig::default();
        let mut m = Measurement::new(FontSpec::default());

        let good = m.run(&Fixed(100.0), &["a"], 4, 1000.0, &cfg);
        // zero-width container: the pass fails and the old result stands
        let kept = m.run(&Fixed(100.0), &["a"], 4, 0.0, &cfg);
        assert_eq!(kept, good);
    }

    #[test]
    fn failed_first_pass_falls_back_to_minimums() {
        let cfg = SizingConfig::default();
        let mut m = Measurement::new(FontSpec::default());

        let result = m.run(&Fixed(100.0), &["a"], 4, 0.0, &cfg);
        assert_eq!(result.first_column_width, cfg.first_column_min_width);
        assert_eq!(result.other_column_width, cfg.other_columns_min_width);
    }

    #[test]
    fn disabled_measurement_skips_probing() {
        let cfg = SizingConfig {
            enable_content_measurement: false,
            ..SizingConfig::default()
        };
        let mut m = Measurement::new(FontSpec::default());
        // the probe would produce a huge width if it ran
        let result = m.run(&Fixed(100_000.0), &["a"], 4, 1000.0, &cfg);
        assert_eq!(result.first_column_width, cfg.first_column_min_width);
    }

    #[test]
    fn empty_probe_set_uses_minimum() {
        let cfg = SizingConfig::default();
        let mut m = Measurement::new(FontSpec::default());
        let result = m.run(&CellMetrics, &[], 3, 1000.0, &cfg);
        assert_eq!(result.first_column_width, cfg.first_column_min_width);
    }
}
