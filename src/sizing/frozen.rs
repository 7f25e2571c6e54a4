use std::collections::BTreeMap;

use regex::Regex;

/// Width assumed for a frozen column that has neither an explicit
/// nor a measured width yet
pub const DEFAULT_FROZEN_WIDTH: f64 = 150.0;

const REM_PX: f64 = 16.0;

/// Parse a width spec like "120px", "10rem" or a bare number.
/// Returns the width in pixels, or None if the spec is not understood.
pub fn parse_width_spec(spec: &str) -> Option<f64> {
    let re = Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*(px|rem)?\s*$").ok()?;
    let caps = re.captures(spec)?;

    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2).map(|m| m.as_str()) {
        Some("rem") => Some(value * REM_PX),
        _ => Some(value),
    }
}

/// Cumulative left insets for sticky positioning of frozen columns.
///
/// Offsets are assigned in ascending column order: the first frozen
/// column sits at 0, each later one at the sum of the widths of the
/// frozen columns before it. Non-frozen columns have no offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrozenOffsets {
    offsets: BTreeMap<usize, f64>,
    total_width: f64,
}

impl FrozenOffsets {
    /// Build offsets for `frozen` column indices. `width_of` is the
    /// width lookup (explicit config first, then measured widths);
    /// unknown widths fall back to [`DEFAULT_FROZEN_WIDTH`].
    pub fn compute<F>(frozen: &[usize], width_of: F) -> Self
    where
        F: Fn(usize) -> Option<f64>,
    {
        let mut indices = frozen.to_vec();
        indices.sort_unstable();
        indices.dedup();

        let mut offsets = BTreeMap::new();
        let mut running_total = 0.0;
        for idx in indices {
            offsets.insert(idx, running_total);
            running_total += width_of(idx).unwrap_or(DEFAULT_FROZEN_WIDTH);
        }

        Self {
            offsets,
            total_width: running_total,
        }
    }

    pub fn is_frozen(&self, col: usize) -> bool {
        self.offsets.contains_key(&col)
    }

    /// Left inset for a frozen column; None for non-frozen columns.
    pub fn offset(&self, col: usize) -> Option<f64> {
        self.offsets.get(&col).copied()
    }

    /// Combined width of all frozen columns (the pinned strip)
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Frozen indices in ascending order with their offsets
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.offsets.iter().map(|(idx, off)| (*idx, *off))
    }
}
