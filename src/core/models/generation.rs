use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::models::survey::Question;
use crate::error::Error;

pub const QUESTION_COUNTS: RangeInclusive<usize> = 2..=5;
pub const ANSWER_COUNTS: RangeInclusive<usize> = 2..=4;
pub const MIN_THEME_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub theme: String,
    pub question_count: usize,
    pub answers_per_question: usize,
}

impl GenerationRequest {
    pub fn new(theme: impl Into<String>, question_count: usize, answers_per_question: usize) -> Self {
        Self {
            theme: theme.into(),
            question_count,
            answers_per_question,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let theme = self.theme.trim();
        if theme.is_empty() {
            return Err(Error::validation("enter a theme for the survey"));
        }
        if theme.chars().count() < MIN_THEME_CHARS {
            return Err(Error::validation(format!("the theme must be at least {} characters long", MIN_THEME_CHARS)));
        }
        if !QUESTION_COUNTS.contains(&self.question_count) {
            return Err(Error::validation(format!(
                "question count must be between {} and {}",
                QUESTION_COUNTS.start(),
                QUESTION_COUNTS.end()
            )));
        }
        if !ANSWER_COUNTS.contains(&self.answers_per_question) {
            return Err(Error::validation(format!(
                "answers per question must be between {} and {}",
                ANSWER_COUNTS.start(),
                ANSWER_COUNTS.end()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSurvey {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(GenerationRequest::new("digital transformation", 3, 4).validate().is_ok());
        assert!(GenerationRequest::new("   ", 3, 4).validate().is_err());
        assert!(GenerationRequest::new("ab", 3, 4).validate().is_err());
        // counted in characters, not bytes
        assert!(GenerationRequest::new("чай", 3, 4).validate().is_ok());
        assert!(GenerationRequest::new("coffee", 6, 4).validate().is_err());
        assert!(GenerationRequest::new("coffee", 2, 1).validate().is_err());
    }

    #[test]
    fn test_response_wire_format() {
        let parsed: GeneratedSurvey = serde_json::from_str(
            r#"{"questions":[{"question":"Q","answers":["a","b"]}],"provider":"Mixtral","processingTimeMs":1500}"#,
        )
        .unwrap();
        assert_eq!(parsed.questions.len(), 1);
        assert_eq!(parsed.processing_time_ms, Some(1500));
        assert_eq!(parsed.error_message, None);

        let failed: GeneratedSurvey = serde_json::from_str(r#"{"errorMessage":"model overloaded"}"#).unwrap();
        assert!(failed.questions.is_empty());
        assert_eq!(failed.error_message.as_deref(), Some("model overloaded"));
    }
}
