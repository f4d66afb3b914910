use actix_web::web::{Json, Path};
use actix_web::HttpResponse;

use crate::context::BearerToken;
use crate::core::models::answer::AnswerSubmission;
use crate::core::models::results::SurveyResults;
use crate::core::models::survey::Survey;
use crate::error::Error;
use crate::handlers::{created, Store};
use crate::request::CreateSurveyRequest;
use crate::response::SurveyEnvelope;

pub async fn mine(store: Store, BearerToken(token): BearerToken) -> Result<Json<Vec<Survey>>, Error> {
    Ok(Json(store.my_surveys(&token).await?))
}

pub async fn create(
    store: Store,
    BearerToken(token): BearerToken,
    Json(body): Json<CreateSurveyRequest>,
) -> Result<HttpResponse, Error> {
    let survey = store.create_survey(&body, &token).await?;
    Ok(created(&SurveyEnvelope {
        survey,
        message: Some("Survey created successfully".into()),
    }))
}

pub async fn detail(store: Store, id: Path<String>) -> Result<Json<Survey>, Error> {
    Ok(Json(store.survey(&id).await?))
}

pub async fn delete(store: Store, BearerToken(token): BearerToken, id: Path<String>) -> Result<HttpResponse, Error> {
    store.delete_survey(&id, &token).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn submit(store: Store, Json(submission): Json<AnswerSubmission>) -> Result<HttpResponse, Error> {
    store.submit(&submission).await?;
    Ok(HttpResponse::Ok().finish())
}

pub async fn results(store: Store, id: Path<String>) -> Result<Json<SurveyResults>, Error> {
    Ok(Json(store.results(&id).await?))
}
