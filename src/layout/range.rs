use chrono::NaiveDate;

use super::clock::Clock;
use super::span::SpanSource;
use crate::model::date;
use crate::model::ViewMode;

/// The visible `[min_date, max_date]` span of the timeline axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    /// Whole days from `min_date` to `max_date`.
    pub total_days: i64,
}

impl DateWindow {
    pub fn new(min_date: NaiveDate, max_date: NaiveDate) -> Self {
        Self {
            min_date,
            max_date,
            total_days: (max_date - min_date).num_days(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min_date <= date && date <= self.max_date
    }
}

/// Infer the visible window for a collection of items.
///
/// Covers every start and end date found in `items` (including nested
/// children), pads both sides, snaps outward to the granularity boundary and
/// clamps the result to the view mode's ceiling. Windows wider than the
/// ceiling are replaced by one centered on today.
pub fn calculate_date_range<S, C>(items: &[S], view_mode: ViewMode, clock: &C) -> DateWindow
where
    S: SpanSource,
    C: Clock + ?Sized,
{
    let today = clock.today();
    if items.is_empty() {
        return default_window(today);
    }

    let mut min_start: Option<NaiveDate> = None;
    let mut max_end: Option<NaiveDate> = None;
    for item in items {
        item.visit_spans(&mut |span| {
            if let Some(start) = span.start {
                min_start = Some(min_start.map_or(start, |m| m.min(start)));
            }
            if let Some(end) = span.end {
                max_end = Some(max_end.map_or(end, |m| m.max(end)));
            }
        });
    }

    let mut min = min_start.unwrap_or_else(|| date::shift_months(today, -1));
    let mut max = max_end.unwrap_or_else(|| date::shift_months(today, 2));
    // A lone start after the defaulted end (or the reverse) still has to fit.
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }

    let raw_span = (max - min).num_days();
    let mut granularity = view_mode.granularity_for(raw_span);
    let padding = chrono::Duration::days(granularity.padding_days());
    let (min, max) = granularity.snap_outward(min - padding, max + padding);
    let mut window = DateWindow::new(min, max);

    // Auto cells follow the padded width, which may call for a coarser unit
    // than the raw span did. Snapping only widens, so this ends by monthly.
    loop {
        let cells = view_mode.granularity_for(window.total_days);
        if cells == granularity {
            break;
        }
        granularity = cells;
        let (min, max) = granularity.snap_outward(window.min_date, window.max_date);
        window = DateWindow::new(min, max);
    }

    let ceiling = view_mode.ceiling_days();
    if window.total_days > ceiling {
        tracing::debug!(
            %view_mode,
            total_days = window.total_days,
            ceiling,
            %today,
            "date window exceeds ceiling; re-centering on today"
        );
        return centered_window(today, view_mode);
    }

    window
}

/// Window used when there is nothing to lay out: two months back through
/// three months ahead, on month boundaries.
pub fn default_window(today: NaiveDate) -> DateWindow {
    DateWindow::new(
        date::month_start(date::shift_months(today, -2)),
        date::month_end(date::shift_months(today, 3)),
    )
}

/// Ceiling-wide window around today.
///
/// The start is snapped down to the boundary of the granularity the ceiling
/// implies; the end is the last boundary that keeps the window within the
/// ceiling.
pub fn centered_window(today: NaiveDate, view_mode: ViewMode) -> DateWindow {
    let ceiling = view_mode.ceiling_days();
    let granularity = view_mode.granularity_for(ceiling);
    let min = granularity.snap_start(today - chrono::Duration::days(ceiling / 2));
    let max = granularity.snap_end_within(min + chrono::Duration::days(ceiling));
    DateWindow::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DateSpan, FixedClock};
    use chrono::{Datelike, Weekday};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(ymd(2025, 1, 15))
    }

    #[test]
    fn empty_items_fall_back_to_default() {
        let window = calculate_date_range::<DateSpan, _>(&[], ViewMode::Month, &clock());
        assert_eq!(window.min_date, ymd(2024, 11, 1));
        assert_eq!(window.max_date, ymd(2025, 4, 30));
        assert_eq!(window.total_days, 180);
    }

    #[test]
    fn day_view_pads_without_snapping() {
        let items = [DateSpan::between(ymd(2025, 1, 10), ymd(2025, 1, 20))];
        let window = calculate_date_range(&items, ViewMode::Day, &clock());
        assert_eq!(window.min_date, ymd(2025, 1, 3));
        assert_eq!(window.max_date, ymd(2025, 1, 27));
        assert_eq!(window.total_days, 24);
    }

    #[test]
    fn week_view_pads_then_snaps_to_whole_weeks() {
        let items = [DateSpan::between(ymd(2024, 12, 29), ymd(2025, 1, 3))];
        let window = calculate_date_range(&items, ViewMode::Week, &clock());
        assert_eq!(window.min_date, ymd(2024, 12, 15));
        assert_eq!(window.max_date, ymd(2025, 1, 18));
        assert_eq!(window.min_date.weekday(), Weekday::Sun);
        assert_eq!(window.max_date.weekday(), Weekday::Sat);
    }

    #[test]
    fn month_view_snaps_to_month_edges() {
        let items = [DateSpan::between(ymd(2025, 2, 10), ymd(2025, 4, 2))];
        let window = calculate_date_range(&items, ViewMode::Month, &clock());
        assert_eq!(window.min_date, ymd(2025, 1, 1));
        assert_eq!(window.max_date, ymd(2025, 5, 31));
    }

    #[test]
    fn auto_mode_picks_padding_from_raw_span() {
        // 10-day span: daily padding, stays daily and unsnapped.
        let tiny = [DateSpan::between(ymd(2025, 1, 8), ymd(2025, 1, 18))];
        let window = calculate_date_range(&tiny, ViewMode::Auto, &clock());
        assert_eq!((window.min_date, window.max_date), (ymd(2025, 1, 1), ymd(2025, 1, 25)));

        // 20-day span: 7 days padding gives 34 days, so the window snaps to weeks.
        let short = [DateSpan::between(ymd(2025, 1, 8), ymd(2025, 1, 28))];
        let window = calculate_date_range(&short, ViewMode::Auto, &clock());
        assert_eq!((window.min_date, window.max_date), (ymd(2024, 12, 29), ymd(2025, 2, 8)));
        assert_eq!(window.min_date.weekday(), Weekday::Sun);

        // 60-day span: 14 days padding, then 97 days wide, so month edges.
        let medium = [DateSpan::between(ymd(2025, 1, 8), ymd(2025, 3, 9))];
        let window = calculate_date_range(&medium, ViewMode::Auto, &clock());
        assert_eq!(window.min_date, ymd(2024, 12, 1));
        assert_eq!(window.max_date, ymd(2025, 3, 31));
    }

    #[test]
    fn auto_mode_monthly_cells_start_on_the_first() {
        let items = [DateSpan::between(ymd(2025, 1, 8), ymd(2025, 4, 2))];
        let window = calculate_date_range(&items, ViewMode::Auto, &clock());
        assert_eq!(window.min_date, ymd(2024, 12, 1));
        assert_eq!(window.max_date, ymd(2025, 4, 30));

        let grid = crate::layout::generate_date_labels(&window, ViewMode::Auto);
        assert_eq!(grid.interval, 30);
        assert!(grid.labels.iter().all(|l| l.day == 1), "{:?}", grid.labels);
        assert_eq!(grid.labels[0].text, "Dec");
    }

    #[test]
    fn lone_start_after_defaulted_end_is_swapped() {
        // End defaults to 2025-03-15, well before the only start date.
        let items = [DateSpan::new(Some(ymd(2026, 1, 20)), None)];
        let window = calculate_date_range(&items, ViewMode::Month, &clock());
        assert_eq!(window.min_date, ymd(2025, 2, 1));
        assert_eq!(window.max_date, ymd(2026, 2, 28));
        assert!(window.min_date <= window.max_date);
    }

    #[test]
    fn one_sided_items_still_extend_the_window() {
        let items = [
            DateSpan::between(ymd(2025, 1, 10), ymd(2025, 1, 12)),
            DateSpan::new(None, Some(ymd(2025, 1, 30))),
            DateSpan::new(Some(ymd(2025, 1, 5)), None),
            DateSpan::default(),
        ];
        let window = calculate_date_range(&items, ViewMode::Day, &clock());
        assert_eq!(window.min_date, ymd(2024, 12, 29));
        assert_eq!(window.max_date, ymd(2025, 2, 6));
    }

    #[test]
    fn missing_ends_default_around_today() {
        // Only a start: the end defaults to today + 2 months.
        let items = [DateSpan::new(Some(ymd(2025, 1, 1)), None)];
        let window = calculate_date_range(&items, ViewMode::Auto, &clock());
        assert_eq!(window.min_date, ymd(2024, 12, 1));
        assert_eq!(window.max_date, ymd(2025, 3, 31));

        // Nothing dated at all: today - 1 month .. today + 2 months, padded.
        let items = [DateSpan::default()];
        let window = calculate_date_range(&items, ViewMode::Month, &clock());
        assert_eq!(window.min_date, ymd(2024, 11, 1));
        assert_eq!(window.max_date, ymd(2025, 4, 30));
    }

    #[test]
    fn oversized_span_recenters_on_today() {
        let items = [DateSpan::between(ymd(2023, 1, 1), ymd(2025, 1, 20))];
        let window = calculate_date_range(&items, ViewMode::Day, &clock());
        assert_eq!(window.min_date, ymd(2024, 12, 1));
        assert_eq!(window.max_date, ymd(2025, 3, 1));
        assert_eq!(window.total_days, 90);
    }

    #[test]
    fn centered_windows_stay_snapped_and_under_ceiling() {
        for mode in ViewMode::ALL {
            let window = centered_window(ymd(2025, 1, 15), mode);
            assert!(window.total_days <= mode.ceiling_days(), "{mode}: {window:?}");
            assert!(window.contains(ymd(2025, 1, 15)), "{mode}: {window:?}");
        }
        let week = centered_window(ymd(2025, 1, 15), ViewMode::Week);
        assert_eq!(week.min_date.weekday(), Weekday::Sun);
        assert_eq!(week.max_date.weekday(), Weekday::Sat);
        let month = centered_window(ymd(2025, 1, 15), ViewMode::Month);
        assert_eq!(month.min_date.day(), 1);
        assert_eq!(month.max_date, date::month_end(month.max_date));
    }

    #[test]
    fn nested_hierarchies_are_scanned() {
        use crate::model::{Deliverable, Milestone, Task};
        let milestones = vec![Milestone::new("M", None, None).with_deliverable(
            Deliverable::new("D", None, None)
                .with_task(Task::new("T", Some(ymd(2025, 1, 20))))
                .with_task(Task {
                    calculated_start_date: Some(ymd(2025, 1, 10)),
                    ..Task::new("S", None)
                }),
        )];
        let window = calculate_date_range(&milestones, ViewMode::Day, &clock());
        assert_eq!(window.min_date, ymd(2025, 1, 3));
        assert_eq!(window.max_date, ymd(2025, 1, 27));
    }
}
