//! In-memory backend that behaves like the real one, for service and controller tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::ApiError;
use crate::model::filter::{PriorityFilter, TaskFilter};
use crate::model::location::{PlaceDraft, TaskLocation, UserLocation};
use crate::model::session::{LoginInfo, SessionContext};
use crate::model::task::{Priority, Task, TaskDraft};
use crate::repository::{LocationRepository, TaskRepository};

struct Row {
    task: Task,
    is_active: bool,
}

#[derive(Default)]
struct State {
    rows: Vec<Row>,
    locations: Vec<TaskLocation>,
    user_locations: Vec<UserLocation>,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
    requests: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, title: &str, priority: Priority, done: bool) -> Task {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let task = Task {
            id: state.next_id,
            title: title.to_string(),
            description: String::new(),
            done,
            priority,
            user_id: 1,
        };
        state.rows.push(Row { task: task.clone(), is_active: true });
        task
    }

    /// Whether the row still exists, active or not.
    pub fn is_stored(&self, id: i64) -> bool {
        self.state.lock().unwrap().rows.iter().any(|r| r.task.id == id)
    }

    pub fn location_count(&self) -> usize {
        self.state.lock().unwrap().locations.len()
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn with_active<T>(&self, id: i64, f: impl FnOnce(&mut Task) -> T) -> Result<T, ApiError> {
        let mut state = self.state.lock().unwrap();
        state
            .rows
            .iter_mut()
            .find(|r| r.task.id == id && r.is_active)
            .map(|r| f(&mut r.task))
            .ok_or(ApiError::NotFound)
    }
}

fn already_exists(what: &str) -> ApiError {
    ApiError::Server {
        status: StatusCode::BAD_REQUEST,
        body: format!(r#"{{"detail":"Location already exists for this {}"}}"#, what),
    }
}

pub fn logged_in(user_id: i64) -> SessionContext {
    let mut ctx = SessionContext::new();
    ctx.login(LoginInfo {
        id: user_id,
        username: format!("user{}", user_id),
        email: format!("user{}@example.com", user_id),
        access_token: "token".to_string(),
    });
    ctx
}

#[async_trait]
impl TaskRepository for FakeBackend {
    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, ApiError> {
        self.hit();
        let state = self.state.lock().unwrap();
        Ok(state
            .rows
            .iter()
            .filter(|r| r.is_active)
            .filter(|r| match filter.priority {
                PriorityFilter::All => true,
                PriorityFilter::Only(p) => r.task.priority == p,
            })
            .filter(|r| filter.done.as_bool().map_or(true, |d| r.task.done == d))
            .map(|r| r.task.clone())
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Task, ApiError> {
        self.hit();
        self.with_active(id, |t| t.clone())
    }

    async fn create(&self, draft: &TaskDraft) -> Result<(), ApiError> {
        self.hit();
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let task = Task {
            id: state.next_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            done: draft.done,
            priority: draft.priority,
            user_id: draft.user_id,
        };
        state.rows.push(Row { task, is_active: true });
        Ok(())
    }

    async fn replace(&self, id: i64, draft: &TaskDraft) -> Result<(), ApiError> {
        self.hit();
        self.with_active(id, |t| {
            t.title = draft.title.clone();
            t.description = draft.description.clone();
            t.priority = draft.priority;
            t.done = draft.done;
        })
    }

    async fn toggle_done(&self, id: i64) -> Result<(), ApiError> {
        self.hit();
        self.with_active(id, |t| t.done = !t.done)
    }

    async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        self.hit();
        let mut state = self.state.lock().unwrap();
        let row = state
            .rows
            .iter_mut()
            .find(|r| r.task.id == id)
            .ok_or(ApiError::NotFound)?;
        row.is_active = false;
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for FakeBackend {
    async fn read(&self, task_id: i64) -> Result<Option<TaskLocation>, ApiError> {
        self.hit();
        let state = self.state.lock().unwrap();
        Ok(state.locations.iter().find(|l| l.task_id == task_id).cloned())
    }

    async fn create(&self, task_id: i64, place: &PlaceDraft) -> Result<(), ApiError> {
        self.hit();
        let mut state = self.state.lock().unwrap();
        if state.locations.iter().any(|l| l.task_id == task_id) {
            return Err(already_exists("task"));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.locations.push(TaskLocation {
            id,
            place_id: place.place_id,
            display_name: place.display_name.clone(),
            name: place.name.clone(),
            lat: place.lat,
            lon: place.lon,
            task_id,
            geom: None,
        });
        Ok(())
    }

    async fn update(&self, task_id: i64, place: &PlaceDraft) -> Result<(), ApiError> {
        self.hit();
        let mut state = self.state.lock().unwrap();
        let loc = state
            .locations
            .iter_mut()
            .find(|l| l.task_id == task_id)
            .ok_or(ApiError::NotFound)?;
        loc.place_id = place.place_id;
        loc.display_name = place.display_name.clone();
        loc.name = place.name.clone();
        loc.lat = place.lat;
        loc.lon = place.lon;
        Ok(())
    }

    async fn delete(&self, task_id: i64) -> Result<(), ApiError> {
        self.hit();
        let mut state = self.state.lock().unwrap();
        let before = state.locations.len();
        state.locations.retain(|l| l.task_id != task_id);
        if state.locations.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    async fn read_user(&self, user_id: i64) -> Result<Option<UserLocation>, ApiError> {
        self.hit();
        let state = self.state.lock().unwrap();
        Ok(state.user_locations.iter().find(|l| l.user_id == user_id).cloned())
    }

    async fn create_user(&self, user_id: i64, place: &PlaceDraft) -> Result<(), ApiError> {
        self.hit();
        let mut state = self.state.lock().unwrap();
        if state.user_locations.iter().any(|l| l.user_id == user_id) {
            return Err(already_exists("user"));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.user_locations.push(UserLocation {
            id,
            place_id: place.place_id,
            display_name: place.display_name.clone(),
            name: place.name.clone(),
            lat: place.lat,
            lon: place.lon,
            user_id,
            geom: None,
        });
        Ok(())
    }

    async fn update_user(&self, user_id: i64, place: &PlaceDraft) -> Result<(), ApiError> {
        self.hit();
        let mut state = self.state.lock().unwrap();
        let loc = state
            .user_locations
            .iter_mut()
            .find(|l| l.user_id == user_id)
            .ok_or(ApiError::NotFound)?;
        loc.place_id = place.place_id;
        loc.display_name = place.display_name.clone();
        loc.name = place.name.clone();
        loc.lat = place.lat;
        loc.lon = place.lon;
        Ok(())
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        self.hit();
        let mut state = self.state.lock().unwrap();
        let before = state.user_locations.len();
        state.user_locations.retain(|l| l.user_id != user_id);
        if state.user_locations.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}
