use tracing::info;

use crate::error::ApiError;
use crate::model::location::{PlaceDraft, TaskLocation, UserLocation};
use crate::model::session::SessionContext;
use crate::repository::LocationRepository;

pub struct LocationService<R: LocationRepository> {
    repo: R,
}

impl<R: LocationRepository> LocationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn location_for(&self, task_id: i64) -> Result<Option<TaskLocation>, ApiError> {
        self.repo.read(task_id).await
    }

    /// Attaches `place` to the task, creating or overwriting depending on `existing`.
    pub async fn save(
        &self,
        existing: Option<&TaskLocation>,
        task_id: i64,
        place: &PlaceDraft,
        session: &SessionContext,
    ) -> Result<(), ApiError> {
        session.require_user()?;
        place.validate().map_err(ApiError::Validation)?;
        match existing {
            Some(_) => self.repo.update(task_id, place).await?,
            None => self.repo.create(task_id, place).await?,
        }
        info!(task_id, place = %place.name, "task location saved");
        Ok(())
    }

    /// Nothing to do when no location is set.
    pub async fn clear(&self, existing: Option<&TaskLocation>, session: &SessionContext) -> Result<(), ApiError> {
        let Some(location) = existing else {
            return Ok(());
        };
        session.require_user()?;
        self.repo.delete(location.task_id).await?;
        info!(task_id = location.task_id, "task location removed");
        Ok(())
    }

    /// Reads what the server currently holds for the task, then creates or updates.
    pub async fn set(&self, task_id: i64, place: &PlaceDraft, session: &SessionContext) -> Result<(), ApiError> {
        session.require_user()?;
        place.validate().map_err(ApiError::Validation)?;
        let existing = self.repo.read(task_id).await?;
        self.save(existing.as_ref(), task_id, place, session).await
    }

    /// Returns whether there was a location to delete.
    pub async fn remove(&self, task_id: i64, session: &SessionContext) -> Result<bool, ApiError> {
        session.require_user()?;
        let existing = self.repo.read(task_id).await?;
        self.clear(existing.as_ref(), session).await?;
        Ok(existing.is_some())
    }

    pub async fn user_location(&self, session: &SessionContext) -> Result<Option<UserLocation>, ApiError> {
        let user_id = session.require_user()?;
        self.repo.read_user(user_id).await
    }

    /// Shares `place` as the signed-in user's own location.
    pub async fn set_user(&self, place: &PlaceDraft, session: &SessionContext) -> Result<(), ApiError> {
        let user_id = session.require_user()?;
        place.validate().map_err(ApiError::Validation)?;
        match self.repo.read_user(user_id).await? {
            Some(_) => self.repo.update_user(user_id, place).await?,
            None => self.repo.create_user(user_id, place).await?,
        }
        info!(user_id, place = %place.name, "user location saved");
        Ok(())
    }

    pub async fn remove_user(&self, session: &SessionContext) -> Result<bool, ApiError> {
        let user_id = session.require_user()?;
        if self.repo.read_user(user_id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete_user(user_id).await?;
        info!(user_id, "user location removed");
        Ok(true)
    }
}
