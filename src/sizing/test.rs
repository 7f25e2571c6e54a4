use super::core::*;
use super::frozen::*;
use super::stylevars::{self, StyleVars};

fn config() -> SizingConfig {
    SizingConfig::default()
}

#[test]
fn clamp_respects_min() {
    let cfg = config();
    assert_eq!(clamp_first_column(10.0, &cfg, 1000.0), 150.0);
}

#[test]
fn clamp_respects_max() {
    let cfg = config();
    assert_eq!(clamp_first_column(900.0, &cfg, 2000.0), 300.0);
}

#[test]
fn clamp_respects_container_share() {
    // container 800, padding 32 -> available 768; probe 500
    // min(max(500, 150), 300, 0.35 * 768 = 268.8) binds at the share rule
    let cfg = config();
    let available = 800.0 - cfg.container_padding;
    let width = clamp_first_column(500.0, &cfg, available);
    assert!((width - 268.8).abs() < 1e-9);
    assert!(width < cfg.first_column_max_width);
}

#[test]
fn clamp_inconsistent_bounds_max_binds() {
    let cfg = SizingConfig {
        first_column_min_width: 400.0,
        first_column_max_width: 300.0,
        ..config()
    };
    // floor first, caps after: max is the binding constraint
    assert_eq!(clamp_first_column(100.0, &cfg, 10_000.0), 300.0);
}

#[test]
fn other_width_divides_remaining() {
    // 5 columns, first 200, available 800 -> (800-200)/4 = 150
    let cfg = config();
    assert_eq!(other_column_width(800.0, 200.0, 5, &cfg), 150.0);
}

#[test]
fn other_width_floors_at_minimum() {
    let cfg = config();
    // (400-300)/19 would be ~5.3, floor at 80
    assert_eq!(other_column_width(400.0, 300.0, 20, &cfg), 80.0);
}

#[test]
fn other_width_single_column_no_divide_by_zero() {
    let cfg = config();
    let w = other_column_width(800.0, 200.0, 1, &cfg);
    assert_eq!(w, cfg.other_columns_min_width);
    assert!(w.is_finite());
}

#[test]
fn derive_takes_max_first_column_probe() {
    let cfg = config();
    let probes = vec![
        ColumnMeasurement { column_index: 0, measured_content_width: 180.0 },
        ColumnMeasurement { column_index: 0, measured_content_width: 220.0 },
        ColumnMeasurement { column_index: 0, measured_content_width: 160.0 },
    ];
    let result = derive(&probes, 4, 1000.0, &cfg);
    assert_eq!(result.first_column_width, 220.0);
}

#[test]
fn derive_ignores_non_first_column_probes() {
    let cfg = config();
    let probes = vec![
        ColumnMeasurement { column_index: 0, measured_content_width: 200.0 },
        ColumnMeasurement { column_index: 3, measured_content_width: 900.0 },
    ];
    let result = derive(&probes, 4, 1000.0, &cfg);
    assert_eq!(result.first_column_width, 200.0);
}

#[test]
fn derive_is_idempotent() {
    let cfg = config();
    let probes = vec![
        ColumnMeasurement { column_index: 0, measured_content_width: 268.77 },
    ];
    let a = derive(&probes, 7, 803.5, &cfg);
    let b = derive(&probes, 7, 803.5, &cfg);
    assert_eq!(a, b);
}

#[test]
fn derive_empty_probe_set_uses_minimum() {
    let cfg = config();
    let result = derive(&[], 3, 1000.0, &cfg);
    assert_eq!(result.first_column_width, cfg.first_column_min_width);
}

#[test]
fn derive_bounds_invariant_holds() {
    let cfg = config();
    for available in [300.0, 500.0, 768.0, 1200.0, 2000.0] {
        for raw in [0.0, 100.0, 150.0, 260.0, 300.0, 900.0] {
            let probes = vec![ColumnMeasurement { column_index: 0, measured_content_width: raw }];
            let r = derive(&probes, 8, available, &cfg);
            let cap = cfg.first_column_max_width.min(available * FIRST_COLUMN_MAX_SHARE);
            assert!(r.first_column_width >= cfg.first_column_min_width.min(cap));
            assert!(r.first_column_width <= cap);
        }
    }
}

#[test]
fn frozen_offsets_skip_unfrozen_columns() {
    // frozen [0, 2], widths {0: 180, 2: 120}: column 1 contributes nothing
    let widths = [Some(180.0), Some(999.0), Some(120.0)];
    let offsets = FrozenOffsets::compute(&[0, 2], |i| widths.get(i).copied().flatten());

    assert_eq!(offsets.offset(0), Some(0.0));
    assert_eq!(offsets.offset(2), Some(180.0));
    assert_eq!(offsets.offset(1), None);
    assert_eq!(offsets.total_width(), 300.0);
}

#[test]
fn frozen_offsets_first_is_zero_and_non_decreasing() {
    let offsets = FrozenOffsets::compute(&[5, 1, 3], |_| Some(100.0));

    let collected: Vec<(usize, f64)> = offsets.iter().collect();
    assert_eq!(collected[0].1, 0.0);
    for pair in collected.windows(2) {
        assert!(pair[0].1 <= pair[1].1);
    }
}

#[test]
fn frozen_offsets_fall_back_to_default_width() {
    let offsets = FrozenOffsets::compute(&[0, 1], |_| None);
    assert_eq!(offsets.offset(1), Some(DEFAULT_FROZEN_WIDTH));
}

#[test]
fn frozen_offsets_dedup_indices() {
    let offsets = FrozenOffsets::compute(&[0, 0, 2], |_| Some(50.0));
    assert_eq!(offsets.offset(2), Some(50.0));
    assert_eq!(offsets.total_width(), 100.0);
}

#[test]
fn frozen_offsets_empty_set() {
    let offsets = FrozenOffsets::compute(&[], |_| Some(100.0));
    assert!(offsets.is_empty());
    assert_eq!(offsets.offset(0), None);
    assert_eq!(offsets.total_width(), 0.0);
}

#[test]
fn width_spec_parses_px_rem_and_bare() {
    assert_eq!(parse_width_spec("120px"), Some(120.0));
    assert_eq!(parse_width_spec("10rem"), Some(160.0));
    assert_eq!(parse_width_spec("96"), Some(96.0));
    assert_eq!(parse_width_spec(" 80.5px "), Some(80.5));
}

#[test]
fn width_spec_rejects_garbage() {
    assert_eq!(parse_width_spec("auto"), None);
    assert_eq!(parse_width_spec("min-content"), None);
    assert_eq!(parse_width_spec(""), None);
    assert_eq!(parse_width_spec("px"), None);
}

#[test]
fn style_vars_publish_full_set() {
    let cfg = config();
    let result = SizingResult {
        first_column_width: 268.8,
        other_column_width: 150.0,
        total_columns: 5,
        available_width: 768.0,
    };
    let vars = StyleVars::from_sizing(&result, &cfg);

    assert_eq!(vars.get(stylevars::FIRST_COLUMN_WIDTH), Some("268.8px"));
    assert_eq!(vars.get(stylevars::OTHER_COLUMN_WIDTH), Some("150px"));
    assert_eq!(vars.get(stylevars::TOTAL_COLUMNS), Some("5"));
    assert_eq!(vars.get(stylevars::AVAILABLE_WIDTH), Some("768px"));
    assert_eq!(vars.len(), 5);
}

#[test]
fn style_vars_set_replaces_in_place() {
    let mut vars = StyleVars::new();
    vars.set_px("--first-column-width", 150.0);
    vars.set_px("--first-column-width", 200.0);
    assert_eq!(vars.get("--first-column-width"), Some("200px"));
    assert_eq!(vars.len(), 1);
}
