use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::filter::TaskFilter;
use crate::model::location::{PlaceDraft, TaskLocation, UserLocation};
use crate::model::session::{LoginInfo, Token};
use crate::model::task::{Task, TaskDraft};

/// Backend task collection. Every call is a single attempt; failures come back as values.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, ApiError>;
    async fn get(&self, id: i64) -> Result<Task, ApiError>;
    async fn create(&self, draft: &TaskDraft) -> Result<(), ApiError>;
    async fn replace(&self, id: i64, draft: &TaskDraft) -> Result<(), ApiError>;
    /// Flips completion server side; the client never sends the target value.
    async fn toggle_done(&self, id: i64) -> Result<(), ApiError>;
    /// Soft delete. The record stays, it just stops being listed.
    async fn deactivate(&self, id: i64) -> Result<(), ApiError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// `Ok(None)` when the task has no place attached.
    async fn read(&self, task_id: i64) -> Result<Option<TaskLocation>, ApiError>;
    async fn create(&self, task_id: i64, place: &PlaceDraft) -> Result<(), ApiError>;
    async fn update(&self, task_id: i64, place: &PlaceDraft) -> Result<(), ApiError>;
    async fn delete(&self, task_id: i64) -> Result<(), ApiError>;

    /// `Ok(None)` when the user has not shared a place.
    async fn read_user(&self, user_id: i64) -> Result<Option<UserLocation>, ApiError>;
    async fn create_user(&self, user_id: i64, place: &PlaceDraft) -> Result<(), ApiError>;
    async fn update_user(&self, user_id: i64, place: &PlaceDraft) -> Result<(), ApiError>;
    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginInfo, ApiError>;
    async fn register(&self, email: &str, username: &str, password: &str)
        -> Result<LoginInfo, ApiError>;
    async fn refresh(&self) -> Result<Token, ApiError>;
}
