use chrono::{Datelike, NaiveDate, Weekday};

use super::grouping::group_runs;
use super::range::DateWindow;
use crate::model::{Granularity, ViewMode};

/// One axis cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabel {
    pub date: NaiveDate,
    /// Days from the window start to `date`.
    pub offset_days: i64,
    pub text: String,
    pub is_weekend: bool,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateLabel {
    fn new(date: NaiveDate, min_date: NaiveDate, granularity: Granularity) -> Self {
        let text = match granularity {
            Granularity::Daily => date.day().to_string(),
            Granularity::Weekly => {
                let week_end = date + chrono::Duration::days(6);
                format!("{}-{}", date.day(), week_end.day())
            }
            Granularity::Monthly => date.format("%b").to_string(),
        };
        Self {
            date,
            offset_days: (date - min_date).num_days(),
            text,
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// A header cell spanning a run of consecutive labels.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderGroup {
    pub label: String,
    pub left: f32,
    pub width: f32,
    /// Index of the first label covered.
    pub first_label: usize,
    pub label_count: usize,
}

/// Header tiers above the label row. `secondary` only exists for monthly cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderTiers {
    pub primary: Vec<HeaderGroup>,
    pub secondary: Option<Vec<HeaderGroup>>,
}

/// Labels, sizing and headers for one timeline axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGrid {
    pub labels: Vec<DateLabel>,
    pub cell_width: f32,
    pub total_width: f32,
    /// Calendar days per cell.
    pub interval: i64,
    pub granularity: Granularity,
    pub headers: HeaderTiers,
}

/// Lay out axis cells for a window.
///
/// Cells start at `min_date` and advance by one interval (monthly cells jump
/// to the first of the next month) until they pass `max_date`.
pub fn generate_date_labels(window: &DateWindow, view_mode: ViewMode) -> LabelGrid {
    let granularity = view_mode.granularity_for(window.total_days);
    let cell_width = granularity.cell_width();

    let mut labels = Vec::new();
    let mut cursor = window.min_date;
    while cursor <= window.max_date {
        labels.push(DateLabel::new(cursor, window.min_date, granularity));
        cursor = granularity.advance(cursor);
    }

    let headers = match granularity {
        Granularity::Daily | Granularity::Weekly => HeaderTiers {
            primary: header_tier(
                &labels,
                cell_width,
                |l| (l.year, l.month),
                |l| l.date.format("%B %Y").to_string(),
            ),
            secondary: None,
        },
        Granularity::Monthly => HeaderTiers {
            primary: header_tier(&labels, cell_width, |l| l.year, |l| l.year.to_string()),
            secondary: Some(header_tier(
                &labels,
                cell_width,
                |l| (l.year, l.month),
                |l| l.date.format("%b").to_string(),
            )),
        },
    };

    LabelGrid {
        total_width: cell_width * labels.len() as f32,
        labels,
        cell_width,
        interval: granularity.interval(),
        granularity,
        headers,
    }
}

/// Same as [`generate_date_labels`] for callers holding the window's parts.
pub fn generate_date_labels_between(
    min_date: NaiveDate,
    max_date: NaiveDate,
    total_days: i64,
    view_mode: ViewMode,
) -> LabelGrid {
    let window = DateWindow {
        min_date,
        max_date,
        total_days,
    };
    generate_date_labels(&window, view_mode)
}

fn header_tier<K: PartialEq>(
    labels: &[DateLabel],
    cell_width: f32,
    key: impl Fn(&DateLabel) -> K,
    title: impl Fn(&DateLabel) -> String,
) -> Vec<HeaderGroup> {
    group_runs(labels, key)
        .into_iter()
        .map(|run| HeaderGroup {
            label: title(&labels[run.start]),
            left: run.start as f32 * cell_width,
            width: run.len as f32 * cell_width,
            first_label: run.start,
            label_count: run.len,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_cells_cover_window_inclusive() {
        let window = DateWindow::new(ymd(2025, 1, 27), ymd(2025, 2, 3));
        let grid = generate_date_labels(&window, ViewMode::Day);
        assert_eq!(grid.labels.len(), 8);
        assert_eq!(grid.cell_width, 60.0);
        assert_eq!(grid.interval, 1);
        assert_eq!(grid.total_width, 480.0);
        assert_eq!(grid.labels[0].text, "27");
        assert_eq!(grid.labels[7].date, ymd(2025, 2, 3));
        // 2025-02-01 is a Saturday.
        assert!(grid.labels[5].is_weekend);
        assert!(!grid.labels[4].is_weekend);
    }

    #[test]
    fn daily_headers_group_by_month() {
        let window = DateWindow::new(ymd(2025, 1, 27), ymd(2025, 2, 3));
        let grid = generate_date_labels(&window, ViewMode::Day);
        let primary = &grid.headers.primary;
        assert_eq!(primary.len(), 2);
        assert_eq!(primary[0].label, "January 2025");
        assert_eq!((primary[0].left, primary[0].width), (0.0, 300.0));
        assert_eq!(primary[1].label, "February 2025");
        assert_eq!((primary[1].left, primary[1].width), (300.0, 180.0));
        assert!(grid.headers.secondary.is_none());
    }

    #[test]
    fn weekly_labels_show_raw_day_numbers() {
        let window = DateWindow::new(ymd(2024, 12, 29), ymd(2025, 1, 18));
        let grid = generate_date_labels(&window, ViewMode::Week);
        let texts: Vec<_> = grid.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["29-4", "5-11", "12-18"]);
        assert_eq!(grid.interval, 7);
        assert_eq!(grid.total_width, 300.0);
        assert_eq!(grid.headers.primary[0].label, "December 2024");
        assert_eq!(grid.headers.primary[1].label_count, 2);
    }

    #[test]
    fn monthly_cells_jump_to_month_starts_with_two_tiers() {
        let window = DateWindow::new(ymd(2024, 11, 1), ymd(2025, 2, 28));
        let grid = generate_date_labels(&window, ViewMode::Month);
        let texts: Vec<_> = grid.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["Nov", "Dec", "Jan", "Feb"]);
        assert_eq!(grid.labels[2].offset_days, 61);

        let primary = &grid.headers.primary;
        assert_eq!(primary.len(), 2);
        assert_eq!(primary[0].label, "2024");
        assert_eq!(primary[0].width, 240.0);
        assert_eq!(primary[1].left, 240.0);

        let secondary = grid.headers.secondary.as_ref().unwrap();
        assert_eq!(secondary.len(), 4);
        assert_eq!(secondary[3].label, "Feb");
    }

    #[test]
    fn auto_mode_sizes_from_total_days() {
        let short = DateWindow::new(ymd(2025, 1, 1), ymd(2025, 1, 31));
        assert_eq!(generate_date_labels(&short, ViewMode::Auto).interval, 1);
        let medium = DateWindow::new(ymd(2025, 1, 1), ymd(2025, 3, 1));
        assert_eq!(generate_date_labels(&medium, ViewMode::Auto).interval, 7);
        let long = DateWindow::new(ymd(2025, 1, 1), ymd(2025, 12, 31));
        let grid = generate_date_labels(&long, ViewMode::Auto);
        assert_eq!((grid.interval, grid.cell_width, grid.labels.len()), (30, 120.0, 12));
    }

    #[test]
    fn explicit_parts_match_window() {
        let window = DateWindow::new(ymd(2025, 1, 1), ymd(2025, 1, 10));
        assert_eq!(
            generate_date_labels_between(window.min_date, window.max_date, window.total_days, ViewMode::Auto),
            generate_date_labels(&window, ViewMode::Auto)
        );
    }
}
