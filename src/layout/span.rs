use chrono::NaiveDate;

use crate::model::{Deliverable, Milestone, Project, Task};

/// A possibly half-open date span. Either side may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateSpan {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateSpan {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// True when neither side carries a date.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whole days from start to end, when both are known.
    pub fn duration_days(&self) -> Option<i64> {
        Some((self.end? - self.start?).num_days())
    }
}

/// Anything that can report the date spans it covers.
///
/// The layout engine only sees spans, so callers decide how their own
/// hierarchy is walked. Implementations call `visit` once per span,
/// including spans of nested children.
pub trait SpanSource {
    fn visit_spans(&self, visit: &mut dyn FnMut(DateSpan));
}

impl SpanSource for DateSpan {
    fn visit_spans(&self, visit: &mut dyn FnMut(DateSpan)) {
        visit(*self);
    }
}

impl<T: SpanSource + ?Sized> SpanSource for &T {
    fn visit_spans(&self, visit: &mut dyn FnMut(DateSpan)) {
        (**self).visit_spans(visit);
    }
}

impl<T: SpanSource> SpanSource for [T] {
    fn visit_spans(&self, visit: &mut dyn FnMut(DateSpan)) {
        for item in self {
            item.visit_spans(visit);
        }
    }
}

impl<T: SpanSource> SpanSource for Vec<T> {
    fn visit_spans(&self, visit: &mut dyn FnMut(DateSpan)) {
        self.as_slice().visit_spans(visit);
    }
}

impl SpanSource for Task {
    fn visit_spans(&self, visit: &mut dyn FnMut(DateSpan)) {
        visit(DateSpan::new(self.calculated_start_date, self.due_date));
    }
}

impl SpanSource for Deliverable {
    fn visit_spans(&self, visit: &mut dyn FnMut(DateSpan)) {
        visit(DateSpan::new(self.calculated_start_date, self.calculated_end_date));
        self.tasks.visit_spans(visit);
    }
}

impl SpanSource for Milestone {
    fn visit_spans(&self, visit: &mut dyn FnMut(DateSpan)) {
        visit(DateSpan::new(self.calculated_start_date, self.calculated_end_date));
        self.deliverables.visit_spans(visit);
    }
}

impl SpanSource for Project {
    fn visit_spans(&self, visit: &mut dyn FnMut(DateSpan)) {
        self.milestones.visit_spans(visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, day)
    }

    #[test]
    fn milestone_visits_whole_subtree() {
        let milestone = Milestone::new("M", d(2025, 1, 1), d(2025, 3, 1)).with_deliverable(
            Deliverable::new("D", d(2025, 1, 5), None)
                .with_task(Task::new("T1", d(2025, 1, 9)))
                .with_task(Task::new("T2", None)),
        );
        let mut spans = Vec::new();
        milestone.visit_spans(&mut |span| spans.push(span));
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0], DateSpan::new(d(2025, 1, 1), d(2025, 3, 1)));
        assert_eq!(spans[2], DateSpan::new(None, d(2025, 1, 9)));
        assert!(spans[3].is_empty());
    }

    #[test]
    fn duration_needs_both_ends() {
        assert_eq!(DateSpan::new(d(2025, 1, 1), d(2025, 1, 8)).duration_days(), Some(7));
        assert_eq!(DateSpan::new(d(2025, 1, 1), None).duration_days(), None);
    }
}
