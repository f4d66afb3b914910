use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Health {
    pub fn now(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            timestamp: Some(chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Backends report `HEALTHY`, optionally followed by a qualifier such as `(Demo Mode)`.
    pub fn is_healthy(&self) -> bool {
        self.status.trim_start().starts_with("HEALTHY")
    }
}
