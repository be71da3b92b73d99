//! Project timeline: milestones, deliverables and tasks laid out on a
//! Gantt axis.
//!
//! The [`layout`] module is the engine: it infers a visible date window from
//! dated items, builds the label grid and header tiers for a [`ViewMode`],
//! and maps spans and "today" to pixels. [`model`] holds the project data it
//! consumes, [`io`] reads and writes project files and CSV, and [`config`]
//! keeps user settings.

pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;

pub use error::{Error, Result};
pub use layout::{
    calculate_bar_position, calculate_date_range, calculate_today_position,
    generate_date_labels, BarGeometry, Clock, DateSpan, DateWindow, FixedClock, LabelGrid,
    SpanSource, SystemClock, TimelineLayout,
};
pub use model::{Project, ViewMode};
