use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{Milestone, Status};
use crate::layout::DateSpan;

/// The customer a project is delivered for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

/// A project: milestones, their deliverables and tasks, plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

fn default_name() -> String {
    "Untitled Project".to_string()
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: default_name(),
            client: None,
            milestones: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

/// Depth of a row in the project outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemLevel {
    Milestone,
    Deliverable,
    Task,
}

impl ItemLevel {
    pub fn depth(self) -> usize {
        match self {
            ItemLevel::Milestone => 0,
            ItemLevel::Deliverable => 1,
            ItemLevel::Task => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemLevel::Milestone => "milestone",
            ItemLevel::Deliverable => "deliverable",
            ItemLevel::Task => "task",
        }
    }
}

/// One visible row of the milestone → deliverable → task outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineRow<'a> {
    pub level: ItemLevel,
    pub id: &'a str,
    pub name: &'a str,
    pub status: Status,
    pub span: DateSpan,
    pub has_children: bool,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Total number of milestones, deliverables and tasks.
    pub fn item_count(&self) -> usize {
        self.milestones
            .iter()
            .map(|m| 1 + m.deliverables.iter().map(|d| 1 + d.tasks.len()).sum::<usize>())
            .sum()
    }

    /// Flatten the hierarchy into display rows, descending only into items
    /// for which `is_expanded` returns true.
    pub fn outline(&self, is_expanded: impl Fn(&str) -> bool) -> Vec<OutlineRow<'_>> {
        let mut rows = Vec::with_capacity(self.item_count());
        for milestone in &self.milestones {
            rows.push(OutlineRow {
                level: ItemLevel::Milestone,
                id: &milestone.id,
                name: &milestone.name,
                status: milestone.status,
                span: DateSpan::new(
                    milestone.calculated_start_date,
                    milestone.calculated_end_date,
                ),
                has_children: !milestone.deliverables.is_empty(),
            });
            if !is_expanded(&milestone.id) {
                continue;
            }
            for deliverable in &milestone.deliverables {
                rows.push(OutlineRow {
                    level: ItemLevel::Deliverable,
                    id: &deliverable.id,
                    name: &deliverable.name,
                    status: deliverable.status,
                    span: DateSpan::new(
                        deliverable.calculated_start_date,
                        deliverable.calculated_end_date,
                    ),
                    has_children: !deliverable.tasks.is_empty(),
                });
                if !is_expanded(&deliverable.id) {
                    continue;
                }
                rows.extend(deliverable.tasks.iter().map(|task| OutlineRow {
                    level: ItemLevel::Task,
                    id: &task.id,
                    name: &task.name,
                    status: task.status,
                    span: DateSpan::new(task.calculated_start_date, task.due_date),
                    has_children: false,
                }));
            }
        }
        rows
    }
}
