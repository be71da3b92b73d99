pub mod date;
pub mod item;
pub mod project;
pub mod timeline;

pub use item::{Deliverable, Milestone, Status, Task};
pub use project::{Client, ItemLevel, OutlineRow, Project};
pub use timeline::{Granularity, ViewMode};
