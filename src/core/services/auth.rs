use log::info;

use crate::core::ports::api::SurveyApi;
use crate::core::session::{Session, SessionContext};
use crate::error::Error;
use crate::request::Credentials;
use crate::response::AuthResponse;

fn remember(session: &SessionContext, response: AuthResponse) -> Result<Session, Error> {
    let stored = Session {
        token: response.token,
        user: response.user,
    };
    session.save(&stored)?;
    info!("signed in as {}", stored.user.username);
    Ok(stored)
}

pub async fn login<A>(api: &A, session: &SessionContext, credentials: &Credentials) -> Result<Session, Error>
where
    A: SurveyApi + ?Sized,
{
    credentials.validate()?;
    let response = api.login(credentials).await?;
    remember(session, response)
}

pub async fn register<A>(api: &A, session: &SessionContext, credentials: &Credentials) -> Result<Session, Error>
where
    A: SurveyApi + ?Sized,
{
    credentials.validate()?;
    let response = api.register(credentials).await?;
    remember(session, response)
}

pub fn logout(session: &SessionContext) -> Result<(), Error> {
    session.clear()?;
    info!("signed out");
    Ok(())
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::core::ports::api::MockApi;
    use crate::impls::demo::{DemoStore, DemoSurveyApi};
    use crate::impls::storage::memory::MemoryStorage;

    fn setup() -> (DemoSurveyApi, SessionContext) {
        (
            DemoSurveyApi::new(Arc::new(DemoStore::seeded())),
            SessionContext::new(Arc::new(MemoryStorage::default())),
        )
    }

    #[tokio::test]
    async fn test_login_saves_session() {
        let (api, session) = setup();
        let stored = login(&api, &session, &Credentials::new("admin", "admin")).await.unwrap();
        assert_eq!(stored.user.username, "admin");
        assert_eq!(session.load().unwrap(), Some(stored));

        logout(&session).unwrap();
        assert_eq!(session.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_logged_out() {
        let (api, session) = setup();
        let err = login(&api, &session, &Credentials::new("admin", "nope")).await.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(session.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (api, session) = setup();
        let registered = register(&api, &session, &Credentials::new("erin", "pass1")).await.unwrap();
        logout(&session).unwrap();
        let again = login(&api, &session, &Credentials::new("erin", "pass1")).await.unwrap();
        assert_eq!(again.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_invalid_credentials_never_reach_the_backend() {
        let mut api = MockApi::new();
        api.expect_login().times(0);
        api.expect_register().times(0);
        let session = SessionContext::new(Arc::new(MemoryStorage::default()));

        let err = login(&api, &session, &Credentials::new("al", "secret")).await.unwrap_err();
        assert!(err.is_validation());
        let err = register(&api, &session, &Credentials::new("alice", "")).await.unwrap_err();
        assert!(err.is_validation());
    }
}
