pub mod auth;
pub mod llm;
pub mod survey;

use actix_web::web::{Data, Json};
use actix_web::HttpResponse;

use crate::core::models::health::Health;
use crate::error::Error;
use crate::impls::demo::DEMO_HEALTH_STATUS;
use crate::impls::demo::DemoStore;

pub type Store = Data<DemoStore>;

pub async fn health() -> Result<Json<Health>, Error> {
    Ok(Json(Health::now(DEMO_HEALTH_STATUS)))
}

pub(crate) fn created<T: serde::Serialize>(body: &T) -> HttpResponse {
    HttpResponse::Created().json(body)
}
