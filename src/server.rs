use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::web::{self, delete, get, post, resource, scope, Data, ServiceConfig};
use actix_web::{App, HttpServer};
use log::info;

use crate::handlers;
use crate::impls::demo::{DemoStore, DemoSurveyGenerator};

/// Mounts the survey backend contract under `/api/v1`.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/api/v1")
            .route("/health", get().to(handlers::health))
            .service(
                scope("/auth")
                    .route("/login", post().to(handlers::auth::login))
                    .route("/register", post().to(handlers::auth::register)),
            )
            .service(
                scope("/surveys")
                    .route("/my", get().to(handlers::survey::mine))
                    .route("/create", post().to(handlers::survey::create))
                    .route("/submit", post().to(handlers::survey::submit))
                    .route("/{id}/results", get().to(handlers::survey::results))
                    .service(
                        resource("/{id}")
                            .route(get().to(handlers::survey::detail))
                            .route(delete().to(handlers::survey::delete)),
                    ),
            )
            .service(
                scope("/llm")
                    .route("/health", get().to(handlers::llm::health))
                    .route("/generate-survey", post().to(handlers::llm::generate)),
            ),
    );
}

/// Builds (but does not await) the demo server; bind to port 0 for an ephemeral port.
pub fn run(addr: SocketAddr, store: Arc<DemoStore>, generator: DemoSurveyGenerator) -> std::io::Result<(Server, SocketAddr)> {
    let store = Data::from(store);
    let generator = Data::new(generator);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .app_data(generator.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _| {
                crate::error::Error::validation(format!("malformed request body: {}", err)).into()
            }))
            .configure(configure)
    })
    .bind(addr)?;
    let bound = server.addrs().first().copied().unwrap_or(addr);
    info!("demo backend listening on http://{}/api/v1", bound);
    Ok((server.run(), bound))
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use actix_web::http::header::AUTHORIZATION;
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body, read_body_json, TestRequest};
    use serde_json::{json, Value};

    use super::*;
    use crate::core::models::answer::AnswerSubmission;
    use crate::core::models::generation::{GeneratedSurvey, GenerationRequest};
    use crate::core::models::results::SurveyResults;
    use crate::core::models::survey::{Question, Survey};
    use crate::core::ports::api::{HealthProbe, SurveyApi, SurveyGenerator};
    use crate::error::Error;
    use crate::impls::demo::fixtures::{ADMIN_TOKEN, DEMO_TOKEN};
    use crate::impls::http::{HttpSurveyApi, HttpSurveyGenerator};
    use crate::request::{CreateSurveyRequest, Credentials};
    use crate::response::AuthResponse;

    macro_rules! app {
        () => {
            init_service(
                App::new()
                    .app_data(Data::new(DemoStore::seeded()))
                    .app_data(Data::new(DemoSurveyGenerator::default()))
                    .configure(configure),
            )
            .await
        };
    }

    fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
        (AUTHORIZATION, format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_login_and_list() {
        let app = app!();
        let req = TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"username": "admin", "password": "admin"}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let auth: AuthResponse = read_body_json(resp).await;
        assert_eq!(auth.token, ADMIN_TOKEN);

        let req = TestRequest::get().uri("/api/v1/surveys/my").insert_header(bearer(&auth.token)).to_request();
        let surveys: Vec<Survey> = read_body_json(call_service(&app, req).await).await;
        assert_eq!(surveys.len(), 4);
    }

    #[actix_web::test]
    async fn test_errors_carry_message() {
        let app = app!();
        let resp = call_service(&app, TestRequest::get().uri("/api/v1/surveys/my").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = call_service(&app, TestRequest::get().uri("/api/v1/surveys/SURVEY-404").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["message"], "Survey not found");

        let req = TestRequest::delete().uri("/api/v1/surveys/SURVEY-001").insert_header(bearer(DEMO_TOKEN)).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"username": "ad", "password": "admin"}))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_submit_and_results() {
        let app = app!();
        let req = TestRequest::post()
            .uri("/api/v1/surveys/submit")
            .set_json(json!({
                "surveyId": "SURVEY-004",
                "answers": [
                    {"questionId": "q1", "selectedAnswerIndex": 0},
                    {"questionId": "q2", "selectedAnswerIndex": 1}
                ]
            }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);

        let req = TestRequest::get().uri("/api/v1/surveys/SURVEY-004/results").to_request();
        let results: SurveyResults = read_body_json(call_service(&app, req).await).await;
        assert_eq!(results.total_responses, 1);
        assert_eq!(results.questions[1].answers[1].percentage, 100.0);
    }

    #[actix_web::test]
    async fn test_generate() {
        let app = app!();
        let req = TestRequest::post()
            .uri("/api/v1/llm/generate-survey")
            .set_json(json!({"theme": "remote work", "questionCount": 3, "answersPerQuestion": 2}))
            .to_request();
        let generated: GeneratedSurvey = read_body_json(call_service(&app, req).await).await;
        assert_eq!(generated.questions.len(), 3);

        let req = TestRequest::post()
            .uri("/api/v1/llm/generate-survey")
            .set_json(json!({"theme": "", "questionCount": 3, "answersPerQuestion": 2}))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let resp = call_service(&app, TestRequest::get().uri("/api/v1/llm/health").to_request()).await;
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["status"], "HEALTHY (Demo Mode)");
    }

    async fn spawn_backend() -> String {
        spawn_backend_with(DemoSurveyGenerator::default()).await
    }

    async fn spawn_backend_with(generator: DemoSurveyGenerator) -> String {
        let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
        let (server, bound) = run(addr, Arc::new(DemoStore::seeded()), generator).unwrap();
        actix_web::rt::spawn(server);
        format!("http://{}/api/v1", bound)
    }

    #[actix_web::test]
    async fn test_http_client_round_trip() {
        let base = spawn_backend().await;
        let api = HttpSurveyApi::new(base.as_str());
        assert!(api.check_health().await.unwrap().is_healthy());

        let auth = api.login(&Credentials::new("demo", "demo")).await.unwrap();
        let created = api
            .create_survey(
                &CreateSurveyRequest {
                    title: "Team offsite".into(),
                    questions: vec![Question::new("Where?", ["Mountains", "Sea"])],
                },
                &auth.token,
            )
            .await
            .unwrap()
            .survey;
        let fetched = api.survey(&created.id).await.unwrap();
        assert_eq!(fetched.title, "Team offsite");
        assert_eq!(fetched.questions[0].answers, ["Mountains", "Sea"]);

        let submission = AnswerSubmission::for_survey(&fetched, &[1]).unwrap();
        api.submit_answers(&submission).await.unwrap();
        let results = api.results(&created.id).await.unwrap();
        assert_eq!(results.total_responses, 1);
        assert_eq!(results.questions[0].answers[1].count, 1);

        api.delete_survey(&created.id, &auth.token).await.unwrap();
        assert!(api.survey(&created.id).await.unwrap_err().is_not_found());
    }

    #[actix_web::test]
    async fn test_http_client_surfaces_server_messages() {
        let base = spawn_backend().await;
        let api = HttpSurveyApi::new(base.as_str());

        let err = api.login(&Credentials::new("admin", "nope")).await.unwrap_err();
        assert!(err.is_auth());
        assert!(err.to_string().starts_with("invalid username or password"));

        let err = api.register(&Credentials::new("admin", "secret")).await.unwrap_err();
        assert_eq!(err.to_string(), "user already exists");

        assert!(api.my_surveys("forged").await.unwrap_err().is_auth());
    }

    #[actix_web::test]
    async fn test_http_generator() {
        let base = spawn_backend().await;
        let generator = HttpSurveyGenerator::new(format!("{}/llm", base));
        assert!(generator.check_health().await.unwrap().is_healthy());
        let generated = generator
            .generate_survey(&GenerationRequest::new("coffee", 2, 4), Some(ADMIN_TOKEN))
            .await
            .unwrap();
        assert_eq!(generated.questions.len(), 2);
        assert_eq!(generated.questions[0].answers.len(), 4);
    }

    #[actix_web::test]
    async fn test_delete_and_submit_answer_with_empty_body() {
        let app = app!();
        let req = TestRequest::delete().uri("/api/v1/surveys/SURVEY-003").insert_header(bearer(ADMIN_TOKEN)).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(read_body(resp).await.is_empty());

        let req = TestRequest::post()
            .uri("/api/v1/surveys/submit")
            .set_json(json!({
                "surveyId": "SURVEY-004",
                "answers": [
                    {"questionId": "q1", "selectedAnswerIndex": 3},
                    {"questionId": "q2", "selectedAnswerIndex": 0}
                ]
            }))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(read_body(resp).await.is_empty());
    }

    #[actix_web::test]
    async fn test_typed_ids_stay_in_their_path_segment() {
        let base = spawn_backend().await;
        let api = HttpSurveyApi::new(base.as_str());

        assert!(api.survey("../health").await.unwrap_err().is_not_found());
        assert!(api.survey("SURVEY-001/results").await.unwrap_err().is_not_found());
        assert!(api.results("SURVEY-004?x").await.unwrap_err().is_not_found());
        assert!(api.results("SURVEY-004#x").await.unwrap_err().is_not_found());
        let err = api.delete_survey("SURVEY-001?x", ADMIN_TOKEN).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(api.survey("SURVEY-001").await.unwrap().id, "SURVEY-001");
    }

    #[actix_web::test]
    async fn test_http_generator_timeout() {
        let base = spawn_backend_with(DemoSurveyGenerator::new(Duration::from_secs(2))).await;
        let generator = HttpSurveyGenerator::new(format!("{}/llm", base)).with_timeout(Duration::from_millis(200));
        let err = generator
            .generate_survey(&GenerationRequest::new("coffee", 2, 2), None)
            .await
            .unwrap_err();
        match err {
            Error::Timeout(message) => assert!(message.contains("try a simpler theme")),
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[actix_web::test]
    async fn test_http_generator_rejection_is_server_error() {
        let base = spawn_backend().await;
        let generator = HttpSurveyGenerator::new(format!("{}/llm", base));
        let err = generator
            .generate_survey(&GenerationRequest::new("", 3, 4), None)
            .await
            .unwrap_err();
        match err {
            Error::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "enter a theme for the survey");
            }
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[actix_web::test]
    async fn test_unreachable_backend_is_transport_error() {
        let api = HttpSurveyApi::new("http://127.0.0.1:9/api/v1");
        let err = api.survey("SURVEY-001").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
