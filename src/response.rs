use crate::core::models::survey::Survey;
use crate::core::models::user::User;
use crate::serde::{Deserialize, Serialize};

/// Plain `{"message": ...}` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message { message: message.into() }
    }
}

/// Error body of a non-success response; CRUD endpoints use `message`, the generator `errorMessage`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error_message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyEnvelope {
    pub survey: Survey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_body() {
        assert_eq!(ErrorBody::parse(r#"{"message":"bad"}"#).into_message().as_deref(), Some("bad"));
        assert_eq!(ErrorBody::parse(r#"{"errorMessage":"slow"}"#).into_message().as_deref(), Some("slow"));
        assert_eq!(ErrorBody::parse("<html>502</html>").into_message(), None);
    }
}
