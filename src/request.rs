use crate::core::models::survey::{Question, SurveyDraft};
use crate::error::Error;
use crate::serde::{Deserialize, Serialize};

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 4;

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(Error::validation("please fill in all fields"));
        }
        if self.username.chars().count() < MIN_USERNAME_CHARS {
            return Err(Error::validation(format!("the username must be at least {} characters long", MIN_USERNAME_CHARS)));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(Error::validation(format!("the password must be at least {} characters long", MIN_PASSWORD_CHARS)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSurveyRequest {
    pub title: String,
    pub questions: Vec<Question>,
}

impl From<SurveyDraft> for CreateSurveyRequest {
    fn from(draft: SurveyDraft) -> Self {
        Self {
            title: draft.title,
            questions: draft.questions,
        }
    }
}
