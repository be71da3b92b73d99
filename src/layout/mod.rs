//! Timeline layout engine.
//!
//! Turns a list of dated items into a visible date window, a grid of axis
//! labels with grouped headers, and pixel geometry for bars and the today
//! marker. Everything here is pure arithmetic apart from the [`Clock`]
//! handed in by the caller.

pub mod clock;
pub mod geometry;
pub mod grouping;
pub mod labels;
pub mod range;
pub mod span;

pub use clock::{Clock, FixedClock, SystemClock};
pub use geometry::{calculate_bar_position, calculate_today_position, day_offset, BarGeometry};
pub use grouping::{group_runs, Run};
pub use labels::{
    generate_date_labels, generate_date_labels_between, DateLabel, HeaderGroup, HeaderTiers,
    LabelGrid,
};
pub use range::{calculate_date_range, centered_window, default_window, DateWindow};
pub use span::{DateSpan, SpanSource};

use chrono::NaiveDate;

use crate::model::ViewMode;

/// Window, grid and today marker computed together for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub view_mode: ViewMode,
    pub window: DateWindow,
    pub grid: LabelGrid,
    pub today: NaiveDate,
    pub today_x: f32,
}

impl TimelineLayout {
    /// Run the whole pipeline. `today` is read from the clock once, so the
    /// window and the marker agree even across midnight.
    pub fn compute<S, C>(items: &[S], view_mode: ViewMode, clock: &C) -> Self
    where
        S: SpanSource,
        C: Clock + ?Sized,
    {
        let today = FixedClock(clock.today());
        let window = calculate_date_range(items, view_mode, &today);
        let grid = generate_date_labels(&window, view_mode);
        let today_x =
            calculate_today_position(window.min_date, grid.cell_width, grid.interval, &today);
        Self {
            view_mode,
            window,
            grid,
            today: today.0,
            today_x,
        }
    }

    /// Geometry for one item's span on this axis.
    pub fn bar(&self, span: DateSpan) -> BarGeometry {
        calculate_bar_position(
            span.start,
            span.end,
            self.window.min_date,
            self.grid.cell_width,
            self.grid.interval,
        )
    }

    /// X position of a single date, e.g. a task's due date.
    pub fn date_x(&self, date: NaiveDate) -> f32 {
        self.bar(DateSpan::between(date, date)).left
    }

    pub fn today_visible(&self) -> bool {
        self.window.contains(self.today)
    }
}
