use chrono::NaiveDate;

use super::clock::Clock;

/// Bars never get narrower than this fraction of one cell.
pub const MIN_BAR_CELL_FRACTION: f32 = 0.1;

/// Horizontal pixel extent of one item on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarGeometry {
    pub left: f32,
    pub width: f32,
}

impl BarGeometry {
    /// Zero-width geometry means the item has nothing to draw.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }
}

/// Signed whole days from `min_date` to `date`.
///
/// Bars and the today marker both go through this so they line up.
pub fn day_offset(date: NaiveDate, min_date: NaiveDate) -> i64 {
    (date - min_date).num_days()
}

fn pixels_per_day(cell_width: f32, interval: i64) -> f32 {
    cell_width / interval.max(1) as f32
}

/// Map an item's span onto the axis.
///
/// Missing dates yield zero geometry. Spans starting before the window are
/// pinned to its left edge, and spans shorter than a day count as one day.
pub fn calculate_bar_position(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    min_date: NaiveDate,
    cell_width: f32,
    interval: i64,
) -> BarGeometry {
    let (Some(start), Some(end)) = (start, end) else {
        return BarGeometry::default();
    };

    let px_per_day = pixels_per_day(cell_width, interval);
    let start_offset = day_offset(start, min_date).max(0);
    let duration = day_offset(end, start).max(1);

    BarGeometry {
        left: start_offset as f32 * px_per_day,
        width: (duration as f32 * px_per_day).max(MIN_BAR_CELL_FRACTION * cell_width),
    }
}

/// X position of today on the axis, clipped to the window's left edge.
pub fn calculate_today_position<C: Clock + ?Sized>(
    min_date: NaiveDate,
    cell_width: f32,
    interval: i64,
    clock: &C,
) -> f32 {
    day_offset(clock.today(), min_date).max(0) as f32 * pixels_per_day(cell_width, interval)
}
