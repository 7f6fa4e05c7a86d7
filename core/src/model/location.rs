use serde::{Deserialize, Serialize};

/// A place attached to a task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskLocation {
    pub id: i64,
    pub place_id: i64,
    pub display_name: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub task_id: i64,
    // GeoJSON point as the server renders it; never interpreted client side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geom: Option<serde_json::Value>,
}

/// The user's own place, shown as their live location.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserLocation {
    pub id: i64,
    pub place_id: i64,
    pub display_name: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geom: Option<serde_json::Value>,
}

/// Body for creating or replacing a task or user location.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlaceDraft {
    pub place_id: i64,
    pub display_name: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl PlaceDraft {
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(format!("latitude {} out of range", self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(format!("longitude {} out of range", self.lon));
        }
        if self.name.trim().is_empty() {
            return Err("place name is required".to_string());
        }
        Ok(())
    }
}
