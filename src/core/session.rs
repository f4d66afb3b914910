use std::sync::Arc;

use log::warn;

use crate::core::models::user::User;
use crate::core::ports::storage::KeyValueStore;
use crate::error::Error;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Authenticated session persisted under the `token` and `user` keys.
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Returns `None` unless both the token and a readable user record are stored.
    pub fn load(&self) -> Result<Option<Session>, Error> {
        let token = match self.storage.get(TOKEN_KEY)? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };
        let raw = match self.storage.get(USER_KEY)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(Session { token, user })),
            Err(e) => {
                warn!("ignoring unreadable stored user: {}", e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), Error> {
        self.storage.set(TOKEN_KEY, &session.token)?;
        self.storage.set(USER_KEY, &serde_json::to_string(&session.user)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), Error> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        Ok(())
    }

    /// The stored session, or an authentication error that sends the user to the login flow.
    pub fn require(&self) -> Result<Session, Error> {
        self.load()?.ok_or_else(|| Error::Unauthorized("please log in first".into()))
    }

    pub fn token(&self) -> Result<Option<String>, Error> {
        Ok(self.load()?.map(|s| s.token))
    }
}
