use tracing::info;

use crate::error::ApiError;
use crate::model::session::SessionContext;
use crate::model::task::{Task, TaskInput};
use crate::repository::TaskRepository;

pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates when `existing` is `None`, otherwise replaces every editable field of it.
    pub async fn save(
        &self,
        existing: Option<&Task>,
        input: TaskInput,
        session: &SessionContext,
    ) -> Result<(), ApiError> {
        let user_id = session.require_user()?;
        if input.title.trim().is_empty() {
            return Err(ApiError::Validation("title is required".to_string()));
        }
        let draft = input.into_draft(user_id);
        match existing {
            Some(task) => {
                self.repo.replace(task.id, &draft).await?;
                info!(id = task.id, "task updated");
            }
            None => {
                self.repo.create(&draft).await?;
                info!(title = %draft.title, "task created");
            }
        }
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Task, ApiError> {
        self.repo.get(id).await
    }

    pub async fn toggle(&self, id: i64, session: &SessionContext) -> Result<(), ApiError> {
        session.require_user()?;
        self.repo.toggle_done(id).await?;
        info!(id, "task completion toggled");
        Ok(())
    }

    pub async fn deactivate(&self, id: i64, session: &SessionContext) -> Result<(), ApiError> {
        session.require_user()?;
        self.repo.deactivate(id).await?;
        info!(id, "task deactivated");
        Ok(())
    }
}
