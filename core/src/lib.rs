pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod usecase;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::ApiError;
pub use input::{parse_args, expand_key, parse_task_input, ParsedInput};
pub use model::filter::{DoneFilter, PriorityFilter, TaskFilter};
pub use model::location::{PlaceDraft, TaskLocation, UserLocation};
pub use model::session::{LoginInfo, Session, SessionContext, SessionEnd, Token, UserProfile};
pub use model::task::{Priority, Task, TaskDraft, TaskInput};
pub use repository::{ApiClient, AuthApi, FileSessionStore, LocationRepository, TaskRepository};
pub use service::location_service::LocationService;
pub use service::task_service::TaskService;
pub use usecase::task_list::{Applied, FetchState, FetchTicket, TaskListController};
pub use view::{present, Presentation};
