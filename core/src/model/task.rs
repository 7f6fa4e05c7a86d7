use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h" | "high" => Ok(Priority::High),
            "m" | "med" | "medium" => Ok(Priority::Medium),
            "l" | "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

/// A to-do item as the backend returns it.
///
/// Deactivated tasks never show up here: the server filters them out of every
/// read, so the client has no "deleted" state to model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub done: bool,
    pub priority: Priority,
    pub user_id: i64,
}

/// Request body shared by create and full replace.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub done: bool,
    pub user_id: i64,
}

/// User-editable task fields, before the owner is known.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub done: bool,
}

impl TaskInput {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            done: task.done,
        }
    }

    pub fn into_draft(self, user_id: i64) -> TaskDraft {
        TaskDraft {
            title: self.title,
            description: self.description,
            priority: self.priority,
            done: self.done,
            user_id,
        }
    }
}

/// `GET /tasks/` response envelope.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}
