use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::date;

/// Timeline granularity selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Auto,
    Month,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [ViewMode::Day, ViewMode::Week, ViewMode::Auto, ViewMode::Month];

    /// Largest window, in days, this mode will lay out before re-centering on today.
    pub fn ceiling_days(self) -> i64 {
        match self {
            ViewMode::Day => 90,
            ViewMode::Week => 180,
            ViewMode::Month => 730,
            ViewMode::Auto => 365,
        }
    }

    /// Cell granularity for a span of `days`. Only `Auto` looks at the span.
    pub fn granularity_for(self, days: i64) -> Granularity {
        match self {
            ViewMode::Day => Granularity::Daily,
            ViewMode::Week => Granularity::Weekly,
            ViewMode::Month => Granularity::Monthly,
            ViewMode::Auto => Granularity::from_span(days),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Auto => "auto",
            ViewMode::Month => "month",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" => Ok(ViewMode::Day),
            "week" | "weeks" => Ok(ViewMode::Week),
            "auto" => Ok(ViewMode::Auto),
            "month" | "months" => Ok(ViewMode::Month),
            other => Err(format!("unknown view mode '{other}'")),
        }
    }
}

/// The unit one axis cell represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Thresholds used by auto mode: up to 30 days daily, up to 90 weekly.
    pub fn from_span(days: i64) -> Self {
        if days <= 30 {
            Granularity::Daily
        } else if days <= 90 {
            Granularity::Weekly
        } else {
            Granularity::Monthly
        }
    }

    /// Calendar days per cell. Monthly cells are nominally 30 days.
    pub fn interval(self) -> i64 {
        match self {
            Granularity::Daily => 1,
            Granularity::Weekly => 7,
            Granularity::Monthly => 30,
        }
    }

    /// Pixel width of one cell.
    pub fn cell_width(self) -> f32 {
        match self {
            Granularity::Daily => 60.0,
            Granularity::Weekly => 100.0,
            Granularity::Monthly => 120.0,
        }
    }

    /// Days added on both sides of the observed item range.
    pub fn padding_days(self) -> i64 {
        match self {
            Granularity::Daily => 7,
            Granularity::Weekly => 14,
            Granularity::Monthly => 30,
        }
    }

    /// Round a window start down to the unit boundary (Sunday for weeks).
    pub fn snap_start(self, d: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => d,
            Granularity::Weekly => {
                d - chrono::Duration::days(i64::from(d.weekday().num_days_from_sunday()))
            }
            Granularity::Monthly => date::month_start(d),
        }
    }

    /// Round a window end up to the unit boundary (Saturday for weeks).
    pub fn snap_end(self, d: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => d,
            Granularity::Weekly => {
                d + chrono::Duration::days(6 - i64::from(d.weekday().num_days_from_sunday()))
            }
            Granularity::Monthly => date::month_end(d),
        }
    }

    /// Last unit end on or before `d`.
    pub fn snap_end_within(self, d: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => d,
            Granularity::Weekly => {
                let back = (i64::from(d.weekday().num_days_from_sunday()) + 1) % 7;
                d - chrono::Duration::days(back)
            }
            Granularity::Monthly => {
                if date::month_end(d) == d {
                    d
                } else {
                    date::month_start(d).pred_opt().unwrap_or(d)
                }
            }
        }
    }

    /// Snap a `[min, max]` window outward to unit boundaries.
    pub fn snap_outward(self, min: NaiveDate, max: NaiveDate) -> (NaiveDate, NaiveDate) {
        (self.snap_start(min), self.snap_end(max))
    }

    /// Start of the cell after the one beginning at `d`.
    pub fn advance(self, d: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => d + chrono::Duration::days(1),
            Granularity::Weekly => d + chrono::Duration::days(7),
            Granularity::Monthly => date::next_month_start(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn auto_thresholds() {
        assert_eq!(ViewMode::Auto.granularity_for(30), Granularity::Daily);
        assert_eq!(ViewMode::Auto.granularity_for(31), Granularity::Weekly);
        assert_eq!(ViewMode::Auto.granularity_for(90), Granularity::Weekly);
        assert_eq!(ViewMode::Auto.granularity_for(91), Granularity::Monthly);
        assert_eq!(ViewMode::Day.granularity_for(400), Granularity::Daily);
        assert_eq!(ViewMode::Month.granularity_for(3), Granularity::Monthly);
    }

    #[test]
    fn week_snapping_uses_sunday_to_saturday() {
        // 2024-12-29 is a Sunday, 2025-01-03 a Friday.
        assert_eq!(
            Granularity::Weekly.snap_outward(ymd(2024, 12, 29), ymd(2025, 1, 3)),
            (ymd(2024, 12, 29), ymd(2025, 1, 4))
        );
        assert_eq!(Granularity::Weekly.snap_start(ymd(2025, 1, 1)), ymd(2024, 12, 29));
        assert_eq!(Granularity::Weekly.snap_end(ymd(2025, 1, 4)), ymd(2025, 1, 4));
    }

    #[test]
    fn snapping_inward_never_passes_the_date() {
        assert_eq!(Granularity::Weekly.snap_end_within(ymd(2025, 1, 4)), ymd(2025, 1, 4));
        assert_eq!(Granularity::Weekly.snap_end_within(ymd(2025, 1, 5)), ymd(2025, 1, 4));
        assert_eq!(Granularity::Weekly.snap_end_within(ymd(2025, 1, 10)), ymd(2025, 1, 4));
        assert_eq!(Granularity::Monthly.snap_end_within(ymd(2025, 1, 31)), ymd(2025, 1, 31));
        assert_eq!(Granularity::Monthly.snap_end_within(ymd(2025, 3, 30)), ymd(2025, 2, 28));
    }

    #[test]
    fn parses_view_modes() {
        assert_eq!("Week".parse::<ViewMode>(), Ok(ViewMode::Week));
        assert_eq!("months".parse::<ViewMode>(), Ok(ViewMode::Month));
        assert!("year".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Auto.to_string(), "auto");
    }
}
