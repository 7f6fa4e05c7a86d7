use tracing::debug;

use crate::error::ApiError;
use crate::model::filter::{DoneFilter, PriorityFilter, TaskFilter};
use crate::model::task::Task;
use crate::repository::TaskRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Populated,
    Empty,
    Error(String),
}

/// Identifies one list request. Only the newest ticket's result is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub filter: TaskFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

/// Filter state, fetch state and the displayed collection of the task list view.
///
/// Every trigger (mount, filter change, [`invalidate`](Self::invalidate)) bumps the
/// generation and hands back a [`FetchTicket`]; the caller runs the request however it
/// likes and feeds the outcome to [`apply`](Self::apply).
#[derive(Debug)]
pub struct TaskListController {
    filter: TaskFilter,
    generation: u64,
    state: FetchState,
    tasks: Vec<Task>,
}

impl Default for TaskListController {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListController {
    pub fn new() -> Self {
        Self {
            filter: TaskFilter::default(),
            generation: 0,
            state: FetchState::Loading,
            tasks: Vec::new(),
        }
    }

    /// Resets the filters to their defaults and starts the first fetch.
    pub fn mount(&mut self) -> FetchTicket {
        self.filter = TaskFilter::default();
        self.begin()
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    /// `None` when the filter already had this value.
    pub fn set_priority(&mut self, priority: PriorityFilter) -> Option<FetchTicket> {
        if self.filter.priority == priority {
            return None;
        }
        self.filter.priority = priority;
        Some(self.begin())
    }

    pub fn set_done(&mut self, done: DoneFilter) -> Option<FetchTicket> {
        if self.filter.done == done {
            return None;
        }
        self.filter.done = done;
        Some(self.begin())
    }

    /// Forces a reload with the current filters, typically after a mutation.
    pub fn invalidate(&mut self) -> FetchTicket {
        self.begin()
    }

    // The previous collection stays visible until the new result lands.
    fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = FetchState::Loading;
        debug!(generation = self.generation, priority = %self.filter.priority, done = %self.filter.done, "fetch started");
        FetchTicket {
            generation: self.generation,
            filter: self.filter,
        }
    }

    pub fn apply(&mut self, ticket: FetchTicket, result: Result<Vec<Task>, ApiError>) -> Applied {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale task list response"
            );
            return Applied::Stale;
        }
        match result {
            Ok(tasks) => {
                self.state = if tasks.is_empty() {
                    FetchState::Empty
                } else {
                    FetchState::Populated
                };
                self.tasks = tasks;
            }
            Err(e) => {
                self.state = FetchState::Error(e.user_message());
                self.tasks.clear();
            }
        }
        Applied::Current
    }

    /// Runs the request for `ticket` against `repo` and applies it.
    pub async fn run<R: TaskRepository + ?Sized>(&mut self, repo: &R, ticket: FetchTicket) -> Applied {
        let result = repo.list(ticket.filter).await;
        self.apply(ticket, result)
    }

    /// Invalidates and reloads in one step.
    pub async fn refresh<R: TaskRepository + ?Sized>(&mut self, repo: &R) -> Applied {
        let ticket = self.invalidate();
        self.run(repo, ticket).await
    }
}
