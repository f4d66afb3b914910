use log::info;

use crate::core::models::results::SurveyResults;
use crate::core::models::survey::{Survey, SurveyDraft};
use crate::core::ports::api::SurveyApi;
use crate::core::session::SessionContext;
use crate::error::Error;
use crate::request::CreateSurveyRequest;

pub async fn my_surveys<A>(api: &A, session: &SessionContext) -> Result<Vec<Survey>, Error>
where
    A: SurveyApi + ?Sized,
{
    let current = session.require()?;
    api.my_surveys(&current.token).await
}

/// Validates the draft locally, then persists it for the signed-in user.
pub async fn create_survey<A>(api: &A, session: &SessionContext, draft: SurveyDraft) -> Result<Survey, Error>
where
    A: SurveyApi + ?Sized,
{
    draft.validate()?;
    let current = session.require()?;
    let request = CreateSurveyRequest::from(draft);
    let created = api.create_survey(&request, &current.token).await?;
    info!("survey {} created", created.survey.id);
    Ok(created.survey)
}

pub async fn delete_survey<A>(api: &A, session: &SessionContext, id: &str) -> Result<(), Error>
where
    A: SurveyApi + ?Sized,
{
    let current = session.require()?;
    api.delete_survey(id, &current.token).await
}

/// Normalises a survey number typed by a respondent.
pub fn survey_number(input: &str) -> Result<&str, Error> {
    let id = input.trim();
    if id.is_empty() {
        return Err(Error::validation("please enter a survey number"));
    }
    Ok(id)
}

pub async fn open_survey<A>(api: &A, input: &str) -> Result<Survey, Error>
where
    A: SurveyApi + ?Sized,
{
    let id = survey_number(input)?;
    api.survey(id).await
}

pub async fn results<A>(api: &A, input: &str) -> Result<SurveyResults, Error>
where
    A: SurveyApi + ?Sized,
{
    let id = survey_number(input)?;
    api.results(id).await
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::core::models::survey::Question;
    use crate::core::ports::api::MockApi;
    use crate::core::services::auth;
    use crate::impls::demo::{DemoStore, DemoSurveyApi};
    use crate::impls::storage::memory::MemoryStorage;
    use crate::request::Credentials;

    async fn signed_in() -> (DemoSurveyApi, SessionContext) {
        let api = DemoSurveyApi::new(Arc::new(DemoStore::seeded()));
        let session = SessionContext::new(Arc::new(MemoryStorage::default()));
        auth::login(&api, &session, &Credentials::new("admin", "admin")).await.unwrap();
        (api, session)
    }

    fn draft() -> SurveyDraft {
        SurveyDraft::new("Office", vec![Question::new("Open plan?", ["Love it", "Hate it"])])
    }

    #[tokio::test]
    async fn test_demo_scenario() {
        let (api, session) = signed_in().await;
        assert_eq!(my_surveys(&api, &session).await.unwrap().len(), 4);

        let results = results(&api, " SURVEY-004 ").await.unwrap();
        assert_eq!(results.total_responses, 0);
        assert!(results.questions.iter().flat_map(|q| &q.answers).all(|a| a.percentage == 0.0));
    }

    #[tokio::test]
    async fn test_create_open_delete() {
        let (api, session) = signed_in().await;
        let created = create_survey(&api, &session, draft()).await.unwrap();
        let opened = open_survey(&api, &created.id).await.unwrap();
        assert_eq!(opened.title, "Office");
        assert_eq!(opened.questions[0].answers, ["Love it", "Hate it"]);
        assert_eq!(my_surveys(&api, &session).await.unwrap().len(), 5);

        delete_survey(&api, &session, &created.id).await.unwrap();
        assert!(open_survey(&api, &created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_signed_out_is_auth_error() {
        let api = DemoSurveyApi::new(Arc::new(DemoStore::seeded()));
        let session = SessionContext::new(Arc::new(MemoryStorage::default()));
        assert!(my_surveys(&api, &session).await.unwrap_err().is_auth());
        assert!(create_survey(&api, &session, draft()).await.unwrap_err().is_auth());
        assert!(delete_survey(&api, &session, "SURVEY-001").await.unwrap_err().is_auth());
    }

    #[tokio::test]
    async fn test_local_validation_comes_first() {
        let mut api = MockApi::new();
        api.expect_create_survey().times(0);
        api.expect_survey().times(0);
        let session = SessionContext::new(Arc::new(MemoryStorage::default()));

        let err = create_survey(&api, &session, SurveyDraft::default()).await.unwrap_err();
        assert!(err.is_validation());
        assert!(open_survey(&api, "   ").await.unwrap_err().is_validation());
    }
}
