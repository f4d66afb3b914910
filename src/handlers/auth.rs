use actix_web::web::Json;

use crate::error::Error;
use crate::handlers::Store;
use crate::request::Credentials;
use crate::response::AuthResponse;

pub async fn login(store: Store, Json(credentials): Json<Credentials>) -> Result<Json<AuthResponse>, Error> {
    credentials.validate()?;
    let (user, token, message) = store.login(&credentials).await?;
    Ok(Json(AuthResponse {
        user,
        token,
        message: Some(message),
    }))
}

pub async fn register(store: Store, Json(credentials): Json<Credentials>) -> Result<Json<AuthResponse>, Error> {
    credentials.validate()?;
    let (user, token, message) = store.register(&credentials).await?;
    Ok(Json(AuthResponse {
        user,
        token,
        message: Some(message),
    }))
}
