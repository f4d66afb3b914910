use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::core::models::generation::{GeneratedSurvey, GenerationRequest};
use crate::core::models::health::Health;
use crate::core::ports::api::{HealthProbe, SurveyGenerator};
use crate::error::Error;
use crate::impls::http::{fetch_json, join};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the `/api/v1/llm` generation service.
#[derive(Debug, Clone)]
pub struct HttpSurveyGenerator {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpSurveyGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Generation routinely takes tens of seconds; only a request outliving `timeout` is abandoned.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HealthProbe for HttpSurveyGenerator {
    async fn check_health(&self) -> Result<Health, Error> {
        fetch_json(self.client.get(join(&self.base_url, "health")), "Health check failed").await
    }
}

#[async_trait]
impl SurveyGenerator for HttpSurveyGenerator {
    async fn generate_survey(&self, request: &GenerationRequest, token: Option<&str>) -> Result<GeneratedSurvey, Error> {
        info!(
            "generating {} questions x {} answers on \"{}\"",
            request.question_count, request.answers_per_question, request.theme
        );
        let mut builder = self
            .client
            .post(join(&self.base_url, "generate-survey"))
            .timeout(self.timeout)
            .json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        let generated: GeneratedSurvey = fetch_json(builder, "Failed to generate survey with AI").await.map_err(|e| match e {
            Error::Timeout(_) => Error::Timeout("the generator is still working on an answer; try a simpler theme".into()),
            other => other,
        })?;
        debug!(
            "generated {} questions via {:?} in {:?} ms",
            generated.questions.len(),
            generated.provider,
            generated.processing_time_ms
        );
        Ok(generated)
    }
}
