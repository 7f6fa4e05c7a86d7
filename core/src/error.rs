use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    #[error("server responded {status}: {body}")]
    Server { status: StatusCode, body: String },

    #[error("not found")]
    NotFound,

    /// The login form was refused.
    #[error("Wrong username or password")]
    BadCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// A rejected or expired token; the caller should end the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Server { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    /// Short text suitable for a one-line notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server, try again later".to_string(),
            ApiError::Server { .. } if self.is_unauthorized() => {
                "Session expired, please login again".to_string()
            }
            ApiError::Server { status, body } => {
                let detail = server_detail(body).unwrap_or_else(|| status.to_string());
                format!("Server error: {}", detail)
            }
            ApiError::NotFound => "Not found".to_string(),
            ApiError::BadCredentials => self.to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Decode(_) => "Unexpected response from server".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}

// The backend reports errors as `{"detail": "..."}`.
fn server_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}
