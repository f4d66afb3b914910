pub mod api;
pub mod generator;

pub use api::HttpSurveyApi;
pub use generator::HttpSurveyGenerator;

use log::{debug, warn};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::response::ErrorBody;

/// Joins a base URL and a path without doubling or dropping the separator.
pub(crate) fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Appends each segment percent-encoded, so a typed id can't escape its own path segment.
pub(crate) fn join_segments(base: &str, segments: &[&str]) -> Result<Url, Error> {
    let mut url = Url::parse(base).map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("{:?} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn execute(request: RequestBuilder, fallback: &str) -> Result<Response, Error> {
    let response = request.send().await.map_err(|e| {
        warn!("request failed: {}", e);
        Error::from(e)
    })?;
    let status = response.status();
    debug!("{} {}", status.as_u16(), response.url());
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let error = Error::from_status(status.as_u16(), ErrorBody::parse(&body).into_message(), fallback);
    warn!("server answered {}: {}", status.as_u16(), error);
    Err(error)
}

/// Sends the request and decodes a JSON body; non-success statuses become errors carrying the server message.
pub(crate) async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder, fallback: &str) -> Result<T, Error> {
    let response = execute(request, fallback).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Sends the request and ignores any success body.
pub(crate) async fn fetch_empty(request: RequestBuilder, fallback: &str) -> Result<(), Error> {
    execute(request, fallback).await?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("http://localhost:8080/api/v1", "/surveys/my"), "http://localhost:8080/api/v1/surveys/my");
        assert_eq!(join("http://localhost:8080/api/v1/", "health"), "http://localhost:8080/api/v1/health");
    }

    #[test]
    fn test_join_segments_encodes_ids() {
        let url = join_segments("http://localhost:8080/api/v1/", &["surveys", "SURVEY-004"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/surveys/SURVEY-004");

        let url = join_segments("http://localhost:8080/api/v1", &["surveys", "x/../health", "results"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/surveys/x%2F..%2Fhealth/results");

        let url = join_segments("http://localhost:8080/api/v1", &["surveys", "SURVEY-004?x#y"]).unwrap();
        assert_eq!(url.path(), "/api/v1/surveys/SURVEY-004%3Fx%23y");
        assert_eq!(url.query(), None);

        assert!(join_segments("not a url", &["surveys"]).is_err());
    }
}
