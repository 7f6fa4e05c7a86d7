use std::fmt;
use std::str::FromStr;

use crate::model::task::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Cycles all -> low -> medium -> high -> all, the order of the filter panel.
    pub fn next(self) -> Self {
        match self {
            PriorityFilter::All => PriorityFilter::Only(Priority::Low),
            PriorityFilter::Only(Priority::Low) => PriorityFilter::Only(Priority::Medium),
            PriorityFilter::Only(Priority::Medium) => PriorityFilter::Only(Priority::High),
            PriorityFilter::Only(Priority::High) => PriorityFilter::All,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => f.write_str("all"),
            PriorityFilter::Only(p) => write!(f, "{}", p),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse::<Priority>().map(PriorityFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneFilter {
    Any,
    Done,
    Pending,
}

impl Default for DoneFilter {
    fn default() -> Self {
        DoneFilter::Pending
    }
}

impl DoneFilter {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            DoneFilter::Any => None,
            DoneFilter::Done => Some(true),
            DoneFilter::Pending => Some(false),
        }
    }

    pub fn next(self) -> Self {
        match self {
            DoneFilter::Pending => DoneFilter::Done,
            DoneFilter::Done => DoneFilter::Any,
            DoneFilter::Any => DoneFilter::Pending,
        }
    }
}

impl fmt::Display for DoneFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoneFilter::Any => f.write_str("any"),
            DoneFilter::Done => f.write_str("done"),
            DoneFilter::Pending => f.write_str("pending"),
        }
    }
}

impl FromStr for DoneFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" | "all" | "unset" => Ok(DoneFilter::Any),
            "true" | "done" | "yes" => Ok(DoneFilter::Done),
            "false" | "pending" | "no" => Ok(DoneFilter::Pending),
            other => Err(format!("unknown completion filter '{}'", other)),
        }
    }
}

/// The (priority, completion) pair that selects which tasks are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub priority: PriorityFilter,
    pub done: DoneFilter,
}

impl TaskFilter {
    pub fn new(priority: PriorityFilter, done: DoneFilter) -> Self {
        Self { priority, done }
    }

    /// Query string pairs for `GET /tasks/`. A sentinel filter contributes nothing.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let PriorityFilter::Only(p) = self.priority {
            pairs.push(("priority", p.as_str().to_string()));
        }
        if let Some(done) = self.done.as_bool() {
            pairs.push(("done", done.to_string()));
        }
        pairs
    }
}
