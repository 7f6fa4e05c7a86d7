use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;

/// `POST /auth/login` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub access_token: String,
}

/// `POST /auth/refresh_token` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserProfile,
    pub access_token: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn from_login(info: LoginInfo) -> Self {
        Self {
            user: UserProfile {
                id: info.id,
                username: info.username,
                email: info.email,
            },
            access_token: info.access_token,
            logged_in_at: Utc::now(),
        }
    }
}

/// Why the last session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    LoggedOut,
    Expired,
}

/// The signed-in user, handed explicitly to whatever needs to act on their behalf.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Option<Session>,
    ended: Option<SessionEnd>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(session: Option<Session>) -> Self {
        Self {
            current: session,
            ended: None,
        }
    }

    pub fn login(&mut self, info: LoginInfo) -> &Session {
        info!(user = %info.username, "session started");
        self.ended = None;
        self.current.insert(Session::from_login(info))
    }

    pub fn logout(&mut self) {
        if let Some(s) = self.current.take() {
            info!(user = %s.user.username, "session closed");
            self.ended = Some(SessionEnd::LoggedOut);
        }
    }

    /// Tears the session down after the backend rejected its token.
    pub fn expire(&mut self) {
        if let Some(s) = self.current.take() {
            info!(user = %s.user.username, "session expired");
            self.ended = Some(SessionEnd::Expired);
        }
    }

    pub fn replace_token(&mut self, token: Token) {
        if let Some(s) = self.current.as_mut() {
            s.access_token = token.access_token;
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn ended(&self) -> Option<SessionEnd> {
        self.ended
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.access_token.as_str())
    }

    /// Owner id for mutations; fails before any request goes out.
    pub fn require_user(&self) -> Result<i64, ApiError> {
        self.current
            .as_ref()
            .map(|s| s.user.id)
            .ok_or_else(|| ApiError::Validation("not logged in".to_string()))
    }
}
