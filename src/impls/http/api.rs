use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};

use crate::core::models::answer::AnswerSubmission;
use crate::core::models::health::Health;
use crate::core::models::results::SurveyResults;
use crate::core::models::survey::Survey;
use crate::core::ports::api::{HealthProbe, SurveyApi};
use crate::error::Error;
use crate::impls::http::{fetch_empty, fetch_json, join, join_segments};
use crate::request::{CreateSurveyRequest, Credentials};
use crate::response::{AuthResponse, SurveyEnvelope};

/// Survey and auth operations against a remote `/api/v1` backend.
#[derive(Debug, Clone)]
pub struct HttpSurveyApi {
    client: Client,
    base_url: String,
}

impl HttpSurveyApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        join(&self.base_url, path)
    }

    fn survey_url(&self, id: &str, tail: Option<&str>) -> Result<Url, Error> {
        let mut segments = vec!["surveys", id];
        segments.extend(tail);
        join_segments(&self.base_url, &segments)
    }
}

#[async_trait]
impl HealthProbe for HttpSurveyApi {
    async fn check_health(&self) -> Result<Health, Error> {
        fetch_json(self.client.get(self.url("health")), "Health check failed").await
    }
}

#[async_trait]
impl SurveyApi for HttpSurveyApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, Error> {
        debug!("logging in as {}", credentials.username);
        fetch_json(self.client.post(self.url("auth/login")).json(credentials), "Login failed").await
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, Error> {
        debug!("registering {}", credentials.username);
        fetch_json(self.client.post(self.url("auth/register")).json(credentials), "Registration failed").await
    }

    async fn my_surveys(&self, token: &str) -> Result<Vec<Survey>, Error> {
        fetch_json(self.client.get(self.url("surveys/my")).bearer_auth(token), "Failed to fetch surveys").await
    }

    async fn create_survey(&self, request: &CreateSurveyRequest, token: &str) -> Result<SurveyEnvelope, Error> {
        fetch_json(
            self.client.post(self.url("surveys/create")).bearer_auth(token).json(request),
            "Failed to create survey",
        )
        .await
    }

    async fn delete_survey(&self, id: &str, token: &str) -> Result<(), Error> {
        fetch_empty(
            self.client.delete(self.survey_url(id, None)?).bearer_auth(token),
            "Failed to delete survey",
        )
        .await
    }

    async fn survey(&self, id: &str) -> Result<Survey, Error> {
        fetch_json(self.client.get(self.survey_url(id, None)?), "Survey not found").await
    }

    async fn submit_answers(&self, submission: &AnswerSubmission) -> Result<(), Error> {
        fetch_empty(self.client.post(self.url("surveys/submit")).json(submission), "Failed to submit answers").await
    }

    async fn results(&self, survey_id: &str) -> Result<SurveyResults, Error> {
        fetch_json(
            self.client.get(self.survey_url(survey_id, Some("results"))?),
            "Failed to fetch results",
        )
        .await
    }
}
