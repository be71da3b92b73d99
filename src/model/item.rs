use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::date::lenient;

/// Lifecycle state shared by milestones, deliverables and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

impl Status {
    /// Wire name used by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::NotStarted => "not-started",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::OnHold => "on-hold",
            Status::Cancelled => "cancelled",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::OnHold => "On Hold",
            Status::Cancelled => "Cancelled",
        }
    }

    /// Map free-form status text (wire names, spreadsheet wording) to a status.
    /// Unknown text is treated as not started.
    pub fn from_label(s: &str) -> Self {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "in-progress" | "inprogress" | "active" | "started" => Status::InProgress,
            "completed" | "complete" | "done" | "finished" => Status::Completed,
            "on-hold" | "onhold" | "paused" | "blocked" => Status::OnHold,
            "cancelled" | "canceled" | "dropped" => Status::Cancelled,
            _ => Status::NotStarted,
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Status::from_label).unwrap_or_default())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Backend documents may carry both `_id` and `id`, or both `name` and
// `title`. The first present, non-empty value wins.
fn first_present(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    preferred
        .filter(|s| !s.is_empty())
        .or(fallback.filter(|s| !s.is_empty()))
}

/// Top-level project phase; its deliverables nest underneath it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawMilestone")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub status: Status,
    #[serde(with = "lenient", skip_serializing_if = "Option::is_none")]
    pub calculated_start_date: Option<NaiveDate>,
    #[serde(with = "lenient", skip_serializing_if = "Option::is_none")]
    pub calculated_end_date: Option<NaiveDate>,
    pub deliverables: Vec<Deliverable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMilestone {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    status: Status,
    #[serde(default, with = "lenient")]
    calculated_start_date: Option<NaiveDate>,
    #[serde(default, with = "lenient")]
    calculated_end_date: Option<NaiveDate>,
    #[serde(default)]
    deliverables: Vec<Deliverable>,
}

impl From<RawMilestone> for Milestone {
    fn from(raw: RawMilestone) -> Self {
        Self {
            id: first_present(raw.object_id, raw.id).unwrap_or_else(new_id),
            name: first_present(raw.name, raw.title).unwrap_or_default(),
            status: raw.status,
            calculated_start_date: raw.calculated_start_date,
            calculated_end_date: raw.calculated_end_date,
            deliverables: raw.deliverables,
        }
    }
}

impl Milestone {
    pub fn new(
        name: impl Into<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            status: Status::NotStarted,
            calculated_start_date: start,
            calculated_end_date: end,
            deliverables: Vec::new(),
        }
    }

    pub fn with_deliverable(mut self, deliverable: Deliverable) -> Self {
        self.deliverables.push(deliverable);
        self
    }
}

/// A piece of work delivered within a milestone; owns the tasks beneath it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDeliverable")]
pub struct Deliverable {
    pub id: String,
    pub name: String,
    pub status: Status,
    #[serde(with = "lenient", skip_serializing_if = "Option::is_none")]
    pub calculated_start_date: Option<NaiveDate>,
    #[serde(with = "lenient", skip_serializing_if = "Option::is_none")]
    pub calculated_end_date: Option<NaiveDate>,
    pub tasks: Vec<Task>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeliverable {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    status: Status,
    #[serde(default, with = "lenient")]
    calculated_start_date: Option<NaiveDate>,
    #[serde(default, with = "lenient")]
    calculated_end_date: Option<NaiveDate>,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl From<RawDeliverable> for Deliverable {
    fn from(raw: RawDeliverable) -> Self {
        Self {
            id: first_present(raw.object_id, raw.id).unwrap_or_else(new_id),
            name: first_present(raw.name, raw.title).unwrap_or_default(),
            status: raw.status,
            calculated_start_date: raw.calculated_start_date,
            calculated_end_date: raw.calculated_end_date,
            tasks: raw.tasks,
        }
    }
}

impl Deliverable {
    pub fn new(
        name: impl Into<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            status: Status::NotStarted,
            calculated_start_date: start,
            calculated_end_date: end,
            tasks: Vec::new(),
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }
}

/// A single to-do with a due date. Tasks carry no duration of their own;
/// a start date is only present when the backend computed one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTask")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub status: Status,
    #[serde(with = "lenient", skip_serializing_if = "Option::is_none")]
    pub calculated_start_date: Option<NaiveDate>,
    #[serde(
        rename = "calculatedEndDate",
        with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    status: Status,
    #[serde(default, with = "lenient")]
    calculated_start_date: Option<NaiveDate>,
    #[serde(default, with = "lenient")]
    calculated_end_date: Option<NaiveDate>,
    #[serde(default, with = "lenient")]
    due_date: Option<NaiveDate>,
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        Self {
            id: first_present(raw.object_id, raw.id).unwrap_or_else(new_id),
            name: first_present(raw.name, raw.title).unwrap_or_default(),
            status: raw.status,
            calculated_start_date: raw.calculated_start_date,
            due_date: raw.calculated_end_date.or(raw.due_date),
        }
    }
}

impl Task {
    pub fn new(name: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            status: Status::NotStarted,
            calculated_start_date: None,
            due_date,
        }
    }
}
