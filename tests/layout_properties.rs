//! Property tests for the layout pipeline.
//!
//! For any non-empty set of (possibly half-open) spans and any view mode:
//!
//! 1. The window is ordered and `total_days` matches its bounds.
//! 2. The window never exceeds the view mode's ceiling.
//! 3. Labels start at `min_date`, end on or before `max_date` and leave no gaps;
//!    monthly cells always begin on the first of a month.
//! 4. A bar starting today begins exactly at the today marker.
//! 5. Results depend only on the inputs and the pinned date.

use chrono::{Datelike, Duration, NaiveDate};
use project_timeline::layout::{
    calculate_bar_position, calculate_date_range, calculate_today_position,
    generate_date_labels, DateSpan, FixedClock, TimelineLayout,
};
use project_timeline::model::Granularity;
use project_timeline::ViewMode;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (-1500i64..=1500).prop_map(|offset| base() + Duration::days(offset))
}

fn span_strategy() -> impl Strategy<Value = DateSpan> {
    (
        proptest::option::of(date_strategy()),
        proptest::option::of(date_strategy()),
    )
        .prop_map(|(start, end)| DateSpan::new(start, end))
}

fn spans_strategy() -> impl Strategy<Value = Vec<DateSpan>> {
    proptest::collection::vec(span_strategy(), 1..8)
}

fn days_in_month(first: NaiveDate) -> i64 {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    (NaiveDate::from_ymd_opt(y, m, 1).unwrap() - first).num_days()
}

fn mode_strategy() -> impl Strategy<Value = ViewMode> {
    proptest::sample::select(ViewMode::ALL.to_vec())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Window shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn window_is_ordered_and_within_ceiling(
        spans in spans_strategy(),
        mode in mode_strategy(),
        today in date_strategy(),
    ) {
        let window = calculate_date_range(&spans, mode, &FixedClock(today));
        prop_assert!(window.min_date <= window.max_date, "{:?}", window);
        prop_assert_eq!(window.total_days, (window.max_date - window.min_date).num_days());
        prop_assert!(
            window.total_days <= mode.ceiling_days(),
            "{} window of {} days: {:?}",
            mode, window.total_days, window
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Labels tile the window
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn labels_cover_window_without_gaps(
        spans in spans_strategy(),
        mode in mode_strategy(),
        today in date_strategy(),
    ) {
        let window = calculate_date_range(&spans, mode, &FixedClock(today));
        let grid = generate_date_labels(&window, mode);

        let first = grid.labels.first().expect("window always yields a label");
        let last = grid.labels.last().expect("window always yields a label");
        prop_assert_eq!(first.date, window.min_date);
        prop_assert_eq!(first.offset_days, 0);
        prop_assert!(last.date <= window.max_date);
        prop_assert_eq!(grid.total_width, grid.cell_width * grid.labels.len() as f32);

        for pair in grid.labels.windows(2) {
            let gap = (pair[1].date - pair[0].date).num_days();
            match grid.granularity {
                Granularity::Daily | Granularity::Weekly => {
                    prop_assert_eq!(gap, grid.interval);
                }
                Granularity::Monthly => {
                    prop_assert_eq!(pair[0].date.day(), 1, "{:?}", window);
                    prop_assert_eq!(pair[1].date.day(), 1, "{:?}", window);
                    prop_assert_eq!(gap, days_in_month(pair[0].date));
                }
            }
        }
        if grid.granularity == Granularity::Monthly {
            prop_assert_eq!(window.min_date.day(), 1, "{:?}", window);
        }
    }
}

proptest! {
    #[test]
    fn fixed_month_view_cells_are_calendar_months(
        spans in spans_strategy(),
        today in date_strategy(),
    ) {
        let window = calculate_date_range(&spans, ViewMode::Month, &FixedClock(today));
        let grid = generate_date_labels(&window, ViewMode::Month);
        for label in &grid.labels {
            prop_assert_eq!(label.day, 1);
        }
        let header_cells: usize = grid
            .headers
            .primary
            .iter()
            .map(|group| group.label_count)
            .sum();
        prop_assert_eq!(header_cells, grid.labels.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Today marker and bars share one axis
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bar_starting_today_aligns_with_marker(
        min_offset in -400i64..=0,
        length in 0i64..=60,
        cell in prop_oneof![Just((60.0f32, 1i64)), Just((100.0, 7)), Just((120.0, 30))],
    ) {
        let today = base();
        let min_date = today + Duration::days(min_offset);
        let (cell_width, interval) = cell;

        let bar = calculate_bar_position(
            Some(today),
            Some(today + Duration::days(length)),
            min_date,
            cell_width,
            interval,
        );
        let marker = calculate_today_position(min_date, cell_width, interval, &FixedClock(today));
        prop_assert_eq!(bar.left, marker);
        prop_assert!(bar.width >= 0.1 * cell_width);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_deterministic(
        spans in spans_strategy(),
        mode in mode_strategy(),
        today in date_strategy(),
    ) {
        let clock = FixedClock(today);
        let a = TimelineLayout::compute(&spans, mode, &clock);
        let b = TimelineLayout::compute(&spans, mode, &clock);
        prop_assert_eq!(a, b);
    }
}
