use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::model::filter::TaskFilter;
use crate::model::location::{PlaceDraft, TaskLocation, UserLocation};
use crate::model::session::{LoginInfo, Token};
use crate::model::task::{Task, TaskDraft, TaskList};
use crate::repository::traits::{AuthApi, LocationRepository, TaskRepository};

/// JSON-over-HTTP client for the task backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ApiError> {
        Self::new(&cfg.api_url, Duration::from_secs(cfg.timeout_secs))
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute<F>(&self, method: Method, path: &str, customize: F) -> Result<Response, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder + Send,
    {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let request = customize(request);

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(%method, path, error = %error, "request failed");
                return Err(ApiError::Network(error));
            }
        };

        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "response");
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%method, path, status = status.as_u16(), "server rejected request");
            return Err(ApiError::Server { status, body });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_json<B: Serialize + Sync>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(method, path, |r| r.json(body)).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for ApiClient {
    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, ApiError> {
        let query = filter.query_pairs();
        let response = self.execute(Method::GET, "tasks/", |r| r.query(&query)).await?;
        let list: TaskList = Self::decode(response).await?;
        debug!(count = list.tasks.len(), priority = %filter.priority, done = %filter.done, "tasks listed");
        Ok(list.tasks)
    }

    async fn get(&self, id: i64) -> Result<Task, ApiError> {
        let response = self.execute(Method::GET, &format!("tasks/{}", id), |r| r).await?;
        Self::decode(response).await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<(), ApiError> {
        self.send_json(Method::POST, "tasks/", draft).await
    }

    async fn replace(&self, id: i64, draft: &TaskDraft) -> Result<(), ApiError> {
        self.send_json(Method::PATCH, &format!("tasks/{}", id), draft).await
    }

    async fn toggle_done(&self, id: i64) -> Result<(), ApiError> {
        self.execute(Method::PATCH, &format!("tasks/done/{}", id), |r| r).await?;
        Ok(())
    }

    async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        self.execute(Method::PATCH, &format!("tasks/deactivate/{}", id), |r| r).await?;
        Ok(())
    }
}

// The backend schema also wants the owner in the body.
#[derive(Serialize)]
struct LocationBody<'a> {
    #[serde(flatten)]
    place: &'a PlaceDraft,
    task_id: i64,
}

#[derive(Serialize)]
struct UserLocationBody<'a> {
    #[serde(flatten)]
    place: &'a PlaceDraft,
    user_id: i64,
}

impl ApiClient {
    async fn read_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        match self.execute(Method::GET, path, |r| r).await {
            Ok(response) => Self::decode(response).await.map(Some),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl LocationRepository for ApiClient {
    async fn read(&self, task_id: i64) -> Result<Option<TaskLocation>, ApiError> {
        self.read_optional(&format!("locations/task/{}", task_id)).await
    }

    async fn create(&self, task_id: i64, place: &PlaceDraft) -> Result<(), ApiError> {
        let body = LocationBody { place, task_id };
        self.execute(Method::POST, "locations/task", |r| {
            r.query(&[("task_id", task_id)]).json(&body)
        })
        .await?;
        Ok(())
    }

    async fn update(&self, task_id: i64, place: &PlaceDraft) -> Result<(), ApiError> {
        let body = LocationBody { place, task_id };
        self.send_json(Method::PUT, &format!("locations/task/{}", task_id), &body).await
    }

    async fn delete(&self, task_id: i64) -> Result<(), ApiError> {
        self.execute(Method::DELETE, &format!("locations/task/{}", task_id), |r| r).await?;
        Ok(())
    }

    async fn read_user(&self, user_id: i64) -> Result<Option<UserLocation>, ApiError> {
        self.read_optional(&format!("locations/user/{}", user_id)).await
    }

    async fn create_user(&self, user_id: i64, place: &PlaceDraft) -> Result<(), ApiError> {
        let body = UserLocationBody { place, user_id };
        self.send_json(Method::POST, "locations/user", &body).await
    }

    async fn update_user(&self, user_id: i64, place: &PlaceDraft) -> Result<(), ApiError> {
        let body = UserLocationBody { place, user_id };
        self.send_json(Method::PUT, &format!("locations/user/{}", user_id), &body).await
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        self.execute(Method::DELETE, &format!("locations/user/{}", user_id), |r| r).await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct Registration<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginInfo, ApiError> {
        let form = [("username", username), ("password", password)];
        let response = match self.execute(Method::POST, "auth/login", |r| r.form(&form)).await {
            Ok(response) => response,
            Err(ApiError::Server { status, .. })
                if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED =>
            {
                return Err(ApiError::BadCredentials);
            }
            Err(e) => return Err(e),
        };
        Self::decode(response).await
    }

    async fn register(&self, email: &str, username: &str, password: &str) -> Result<LoginInfo, ApiError> {
        let body = Registration { email, username, password };
        self.send_json(Method::POST, "users", &body).await?;
        self.login(username, password).await
    }

    async fn refresh(&self) -> Result<Token, ApiError> {
        let response = self.execute(Method::POST, "auth/refresh_token", |r| r).await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_ignores_slashes() {
        let a = ApiClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        let b = ApiClient::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        assert_eq!(a.url("tasks/"), "http://localhost:8000/tasks/");
        assert_eq!(b.url("/tasks/done/5"), "http://localhost:8000/tasks/done/5");
    }

    #[test]
    fn test_location_body_flattens_place() {
        let place = PlaceDraft {
            place_id: 5,
            display_name: "Somewhere, Earth".to_string(),
            name: "Somewhere".to_string(),
            lat: 1.0,
            lon: 2.0,
        };
        let body = serde_json::to_value(LocationBody { place: &place, task_id: 3 }).unwrap();
        assert_eq!(body["task_id"], 3);
        assert_eq!(body["place_id"], 5);
        assert_eq!(body["lat"], 1.0);
    }
}
