use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::core::models::generation::{GeneratedSurvey, GenerationRequest};
use crate::core::models::health::Health;
use crate::core::models::survey::Question;
use crate::core::ports::api::{HealthProbe, SurveyGenerator};
use crate::error::Error;
use crate::impls::demo::fixtures::GENERATED_ANSWERS;
use crate::impls::demo::DEMO_HEALTH_STATUS;

pub const DEMO_PROVIDER: &str = "Mixtral 8x7B (Demo)";

/// Produces templated questions for a theme without calling a model.
#[derive(Debug, Clone, Default)]
pub struct DemoSurveyGenerator {
    latency: Duration,
}

impl DemoSurveyGenerator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

pub fn templated_questions(theme: &str, question_count: usize, answers_per_question: usize) -> Vec<Question> {
    (1..=question_count)
        .map(|n| {
            Question::new(
                format!("{} - Вопрос {}: Как вы оцениваете это направление?", theme, n),
                GENERATED_ANSWERS.iter().cycle().take(answers_per_question).copied(),
            )
        })
        .collect()
}

#[async_trait]
impl HealthProbe for DemoSurveyGenerator {
    async fn check_health(&self) -> Result<Health, Error> {
        Ok(Health::now(DEMO_HEALTH_STATUS))
    }
}

#[async_trait]
impl SurveyGenerator for DemoSurveyGenerator {
    async fn generate_survey(&self, request: &GenerationRequest, _token: Option<&str>) -> Result<GeneratedSurvey, Error> {
        let started = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(GeneratedSurvey {
            questions: templated_questions(request.theme.trim(), request.question_count, request.answers_per_question),
            provider: Some(DEMO_PROVIDER.into()),
            processing_time_ms: Some(started.elapsed().as_millis() as u64),
            error_message: None,
        })
    }
}
