use crate::model::task::Task;
use crate::usecase::task_list::{FetchState, TaskListController};

/// What the task list area shows. Exactly one at a time.
#[derive(Debug, PartialEq)]
pub enum Presentation<'a> {
    /// `previous` is the last applied collection, shown dimmed under the indicator.
    Loading { previous: &'a [Task] },
    Populated(&'a [Task]),
    Empty,
    Error(&'a str),
}

pub fn present(controller: &TaskListController) -> Presentation<'_> {
    match controller.state() {
        FetchState::Loading => Presentation::Loading {
            previous: controller.tasks(),
        },
        FetchState::Populated => Presentation::Populated(controller.tasks()),
        FetchState::Empty => Presentation::Empty,
        FetchState::Error(msg) => Presentation::Error(msg),
    }
}
