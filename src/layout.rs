use serde::{Deserialize, Serialize};

use crate::table::ContentMetrics;

/// Average cell length above which mobile content is treated as
/// long-form and the condensed layout takes over
pub const LONG_CONTENT_AVERAGE: f64 = 30.0;

/// The alternative presentations a table instance can render as.
/// Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Table,
    Condensed,
    Cards,
    Timeline,
    Accordion,
    Feed,
    Grid,
    Masonry,
}

impl LayoutMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutMode::Table => "TABLE",
            LayoutMode::Condensed => "CONDENSED",
            LayoutMode::Cards => "CARDS",
            LayoutMode::Timeline => "TIMELINE",
            LayoutMode::Accordion => "ACCORDION",
            LayoutMode::Feed => "FEED",
            LayoutMode::Grid => "GRID",
            LayoutMode::Masonry => "MASONRY",
        }
    }

    /// Modes that reveal hidden column groups per row
    pub fn is_expandable(&self) -> bool {
        matches!(
            self,
            LayoutMode::Condensed | LayoutMode::Timeline | LayoutMode::Accordion
        )
    }
}

impl Default for LayoutMode {
    fn default() -> Self {
        LayoutMode::Table
    }
}

/// Viewport width bucket derived from the breakpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Mobile,
    Tablet,
    Desktop,
}

impl WidthClass {
    pub fn display_name(&self) -> &'static str {
        match self {
            WidthClass::Mobile => "mobile",
            WidthClass::Tablet => "tablet",
            WidthClass::Desktop => "desktop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub mobile: f64,
    pub tablet: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: 768.0,
            tablet: 1024.0,
        }
    }
}

impl Breakpoints {
    pub fn classify(&self, viewport_width: f64) -> WidthClass {
        if viewport_width <= self.mobile {
            WidthClass::Mobile
        } else if viewport_width <= self.tablet {
            WidthClass::Tablet
        } else {
            WidthClass::Desktop
        }
    }
}

/// Which mode each width class starts in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutAssignment {
    pub desktop: LayoutMode,
    pub tablet: LayoutMode,
    pub mobile: LayoutMode,
}

impl Default for LayoutAssignment {
    fn default() -> Self {
        Self {
            desktop: LayoutMode::Table,
            tablet: LayoutMode::Cards,
            mobile: LayoutMode::Timeline,
        }
    }
}

impl LayoutAssignment {
    fn for_class(&self, class: WidthClass) -> LayoutMode {
        match class {
            WidthClass::Desktop => self.desktop,
            WidthClass::Tablet => self.tablet,
            WidthClass::Mobile => self.mobile,
        }
    }
}

/// Modes the user toggle may cycle through for a width class
pub fn allowed_modes(class: WidthClass) -> &'static [LayoutMode] {
    match class {
        WidthClass::Desktop => &[LayoutMode::Table],
        WidthClass::Tablet => &[LayoutMode::Cards, LayoutMode::Grid, LayoutMode::Masonry],
        WidthClass::Mobile => &[
            LayoutMode::Timeline,
            LayoutMode::Accordion,
            LayoutMode::Feed,
            LayoutMode::Condensed,
        ],
    }
}

/// Pick the active mode for (width class, content metrics, override).
///
/// The breakpoint rule is evaluated first; the content-length rule only
/// refines behavior within the mobile class. An override wins when it
/// is allowed for the class. Pure and idempotent: the same inputs
/// always select the same mode.
pub fn select(
    class: WidthClass,
    metrics: ContentMetrics,
    assignment: &LayoutAssignment,
    override_mode: Option<LayoutMode>,
) -> LayoutMode {
    if let Some(mode) = override_mode {
        if allowed_modes(class).contains(&mode) {
            return mode;
        }
    }

    let assigned = assignment.for_class(class);
    let assigned = if allowed_modes(class).contains(&assigned) {
        assigned
    } else {
        allowed_modes(class)[0]
    };

    match class {
        WidthClass::Mobile
            if metrics.average_content_length > LONG_CONTENT_AVERAGE
                || metrics.long_content_columns > 0 =>
        {
            LayoutMode::Condensed
        }
        _ => assigned,
    }
}

/// Advance to the next allowed mode for the class. A class with a
/// single allowed mode cycles to itself.
pub fn cycle(current: LayoutMode, class: WidthClass) -> LayoutMode {
    let modes = allowed_modes(class);
    match modes.iter().position(|m| *m == current) {
        Some(i) => modes[(i + 1) % modes.len()],
        None => modes[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> ContentMetrics {
        ContentMetrics::default()
    }

    fn verbose() -> ContentMetrics {
        ContentMetrics {
            average_content_length: 45.0,
            long_content_columns: 2,
        }
    }

    #[test]
    fn classify_breakpoints() {
        let bp = Breakpoints::default();
        assert_eq!(bp.classify(700.0), WidthClass::Mobile);
        assert_eq!(bp.classify(768.0), WidthClass::Mobile);
        assert_eq!(bp.classify(900.0), WidthClass::Tablet);
        assert_eq!(bp.classify(1024.0), WidthClass::Tablet);
        assert_eq!(bp.classify(1200.0), WidthClass::Desktop);
    }

    #[test]
    fn desktop_selects_table() {
        let a = LayoutAssignment::default();
        assert_eq!(select(WidthClass::Desktop, verbose(), &a, None), LayoutMode::Table);
    }

    #[test]
    fn mobile_quiet_content_uses_assignment() {
        let a = LayoutAssignment::default();
        assert_eq!(select(WidthClass::Mobile, quiet(), &a, None), LayoutMode::Timeline);
    }

    #[test]
    fn mobile_long_content_promotes_condensed() {
        let a = LayoutAssignment::default();
        assert_eq!(select(WidthClass::Mobile, verbose(), &a, None), LayoutMode::Condensed);
    }

    #[test]
    fn content_rule_only_refines_mobile() {
        // long content on tablet/desktop must not override the breakpoint rule
        let a = LayoutAssignment::default();
        assert_eq!(select(WidthClass::Tablet, verbose(), &a, None), LayoutMode::Cards);
        assert_eq!(select(WidthClass::Desktop, verbose(), &a, None), LayoutMode::Table);
    }

    #[test]
    fn override_wins_when_allowed() {
        let a = LayoutAssignment::default();
        assert_eq!(
            select(WidthClass::Mobile, verbose(), &a, Some(LayoutMode::Feed)),
            LayoutMode::Feed
        );
    }

    #[test]
    fn override_ignored_when_not_allowed() {
        let a = LayoutAssignment::default();
        assert_eq!(
            select(WidthClass::Desktop, quiet(), &a, Some(LayoutMode::Masonry)),
            LayoutMode::Table
        );
    }

    #[test]
    fn misassigned_mode_falls_back_to_allowed() {
        let a = LayoutAssignment {
            tablet: LayoutMode::Timeline, // not a tablet mode
            ..LayoutAssignment::default()
        };
        assert_eq!(select(WidthClass::Tablet, quiet(), &a, None), LayoutMode::Cards);
    }

    #[test]
    fn selection_is_idempotent() {
        let a = LayoutAssignment::default();
        let first = select(WidthClass::Mobile, verbose(), &a, None);
        let second = select(WidthClass::Mobile, verbose(), &a, None);
        assert_eq!(first, second);
    }

    #[test]
    fn breakpoint_crossing_transitions_exactly_once() {
        // viewport drops 1200 -> 700: table becomes the mobile mode once,
        // and re-evaluating at 700 does not oscillate
        let bp = Breakpoints::default();
        let a = LayoutAssignment::default();

        let mut mode = select(bp.classify(1200.0), quiet(), &a, None);
        assert_eq!(mode, LayoutMode::Table);

        let mut transitions = 0;
        for width in [700.0, 700.0, 700.0] {
            let next = select(bp.classify(width), quiet(), &a, None);
            if next != mode {
                transitions += 1;
                mode = next;
            }
        }
        assert_eq!(mode, LayoutMode::Timeline);
        assert_eq!(transitions, 1);
    }

    #[test]
    fn cycle_wraps_within_class() {
        assert_eq!(cycle(LayoutMode::Cards, WidthClass::Tablet), LayoutMode::Grid);
        assert_eq!(cycle(LayoutMode::Grid, WidthClass::Tablet), LayoutMode::Masonry);
        assert_eq!(cycle(LayoutMode::Masonry, WidthClass::Tablet), LayoutMode::Cards);
    }

    #[test]
    fn cycle_on_desktop_is_a_noop() {
        assert_eq!(cycle(LayoutMode::Table, WidthClass::Desktop), LayoutMode::Table);
    }

    #[test]
    fn cycle_from_foreign_mode_enters_class() {
        // mode left over from another class snaps to the class's first mode
        assert_eq!(cycle(LayoutMode::Table, WidthClass::Mobile), LayoutMode::Timeline);
    }
}
