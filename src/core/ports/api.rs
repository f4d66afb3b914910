use async_trait::async_trait;

use crate::core::models::answer::AnswerSubmission;
use crate::core::models::generation::{GeneratedSurvey, GenerationRequest};
use crate::core::models::health::Health;
use crate::core::models::results::SurveyResults;
use crate::core::models::survey::Survey;
use crate::error::Error;
use crate::request::{CreateSurveyRequest, Credentials};
use crate::response::{AuthResponse, SurveyEnvelope};

#[cfg(test)]
use mockall::mock;

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check_health(&self) -> Result<Health, Error>;
}

/// Authentication and survey lifecycle operations.
#[async_trait]
pub trait SurveyApi: HealthProbe {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, Error>;
    async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, Error>;
    async fn my_surveys(&self, token: &str) -> Result<Vec<Survey>, Error>;
    async fn create_survey(&self, request: &CreateSurveyRequest, token: &str) -> Result<SurveyEnvelope, Error>;
    async fn delete_survey(&self, id: &str, token: &str) -> Result<(), Error>;
    async fn survey(&self, id: &str) -> Result<Survey, Error>;
    async fn submit_answers(&self, submission: &AnswerSubmission) -> Result<(), Error>;
    async fn results(&self, survey_id: &str) -> Result<SurveyResults, Error>;
}

/// Candidate question sets from a language-model backend.
#[async_trait]
pub trait SurveyGenerator: HealthProbe {
    async fn generate_survey(&self, request: &GenerationRequest, token: Option<&str>) -> Result<GeneratedSurvey, Error>;
}

#[cfg(test)]
mock! {
    pub Api {}

    #[async_trait]
    impl HealthProbe for Api {
        async fn check_health(&self) -> Result<Health, Error>;
    }

    #[async_trait]
    impl SurveyApi for Api {
        async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, Error>;
        async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, Error>;
        async fn my_surveys(&self, token: &str) -> Result<Vec<Survey>, Error>;
        async fn create_survey(&self, request: &CreateSurveyRequest, token: &str) -> Result<SurveyEnvelope, Error>;
        async fn delete_survey(&self, id: &str, token: &str) -> Result<(), Error>;
        async fn survey(&self, id: &str) -> Result<Survey, Error>;
        async fn submit_answers(&self, submission: &AnswerSubmission) -> Result<(), Error>;
        async fn results(&self, survey_id: &str) -> Result<SurveyResults, Error>;
    }
}
