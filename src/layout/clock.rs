use chrono::NaiveDate;

/// Source of "today" for the layout engine.
///
/// Layout functions take the clock as a parameter so a timeline can be
/// pinned to a fixed date instead of the wall clock.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date, read fresh on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
