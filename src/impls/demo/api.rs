use std::sync::Arc;

use async_trait::async_trait;

use crate::core::models::answer::AnswerSubmission;
use crate::core::models::health::Health;
use crate::core::models::results::SurveyResults;
use crate::core::models::survey::Survey;
use crate::core::ports::api::{HealthProbe, SurveyApi};
use crate::error::Error;
use crate::impls::demo::{DemoStore, DEMO_HEALTH_STATUS};
use crate::request::{CreateSurveyRequest, Credentials};
use crate::response::{AuthResponse, SurveyEnvelope};

/// Serves every CRUD operation from a shared [`DemoStore`].
#[derive(Clone)]
pub struct DemoSurveyApi {
    store: Arc<DemoStore>,
}

impl DemoSurveyApi {
    pub fn new(store: Arc<DemoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HealthProbe for DemoSurveyApi {
    async fn check_health(&self) -> Result<Health, Error> {
        Ok(Health::now(DEMO_HEALTH_STATUS))
    }
}

#[async_trait]
impl SurveyApi for DemoSurveyApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, Error> {
        let (user, token, message) = self.store.login(credentials).await?;
        Ok(AuthResponse {
            user,
            token,
            message: Some(message),
        })
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, Error> {
        let (user, token, message) = self.store.register(credentials).await?;
        Ok(AuthResponse {
            user,
            token,
            message: Some(message),
        })
    }

    async fn my_surveys(&self, token: &str) -> Result<Vec<Survey>, Error> {
        self.store.my_surveys(token).await
    }

    async fn create_survey(&self, request: &CreateSurveyRequest, token: &str) -> Result<SurveyEnvelope, Error> {
        let survey = self.store.create_survey(request, token).await?;
        Ok(SurveyEnvelope {
            survey,
            message: Some("Survey created successfully (Demo Mode)".into()),
        })
    }

    async fn delete_survey(&self, id: &str, token: &str) -> Result<(), Error> {
        self.store.delete_survey(id, token).await
    }

    async fn survey(&self, id: &str) -> Result<Survey, Error> {
        self.store.survey(id).await
    }

    async fn submit_answers(&self, submission: &AnswerSubmission) -> Result<(), Error> {
        self.store.submit(submission).await
    }

    async fn results(&self, survey_id: &str) -> Result<SurveyResults, Error> {
        self.store.results(survey_id).await
    }
}
