use actix_web::web::{Data, Json};

use crate::context::BearerToken;
use crate::core::models::generation::{GeneratedSurvey, GenerationRequest};
use crate::core::models::health::Health;
use crate::core::ports::api::{HealthProbe, SurveyGenerator};
use crate::error::Error;
use crate::impls::demo::DemoSurveyGenerator;

pub async fn health(generator: Data<DemoSurveyGenerator>) -> Result<Json<Health>, Error> {
    Ok(Json(generator.check_health().await?))
}

/// A bad request is answered with a 400 carrying the reason, like the model gateway does.
pub async fn generate(
    generator: Data<DemoSurveyGenerator>,
    token: Option<BearerToken>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GeneratedSurvey>, Error> {
    request.validate()?;
    let token = token.map(|BearerToken(t)| t);
    Ok(Json(generator.generate_survey(&request, token.as_deref()).await?))
}
