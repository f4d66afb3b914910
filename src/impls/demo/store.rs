use std::collections::HashMap;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use hex::ToHex;
use log::info;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::core::models::answer::AnswerSubmission;
use crate::core::models::results::SurveyResults;
use crate::core::models::survey::{Survey, SurveyDraft};
use crate::core::models::user::User;
use crate::error::Error;
use crate::impls::demo::fixtures;
use crate::request::{CreateSurveyRequest, Credentials};

fn hash_password(pass: &str, slt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pass);
    hasher.update(slt);
    hasher.finalize().encode_hex()
}

fn random_salt() -> String {
    thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect()
}

struct Account {
    user: User,
    salt: String,
    password: String,
    token: String,
}

impl Account {
    fn new(user: User, password: &str, token: String) -> Self {
        let salt = random_salt();
        Self {
            password: hash_password(password, &salt),
            user,
            salt,
            token,
        }
    }

    fn verify(&self, password: &str) -> bool {
        hash_password(password, &self.salt) == self.password
    }

    fn session(&self, message: &str) -> (User, String, String) {
        (self.user.clone().with_token(self.token.clone()), self.token.clone(), message.to_owned())
    }
}

struct Tally {
    total: u64,
    counts: Vec<Vec<u64>>,
}

impl Tally {
    fn zeroed(survey: &Survey) -> Self {
        Self {
            total: 0,
            counts: survey.questions.iter().map(|q| vec![0; q.answers.len()]).collect(),
        }
    }
}

struct State {
    accounts: Vec<Account>,
    surveys: Vec<Survey>,
    tallies: HashMap<String, Tally>,
    next_seq: u64,
}

impl State {
    fn account_by_token(&self, token: &str) -> Result<&Account, Error> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::Unauthorized("missing authorization token".into()));
        }
        self.accounts
            .iter()
            .find(|a| a.token == token)
            .ok_or_else(|| Error::Unauthorized("session has expired, please log in again".into()))
    }

    fn survey(&self, id: &str) -> Result<&Survey, Error> {
        self.surveys.iter().find(|s| s.id == id).ok_or_else(|| Error::not_found("Survey not found"))
    }
}

/// In-memory stand-in for the survey backend, seeded with sample accounts, surveys and tallies.
pub struct DemoStore {
    state: RwLock<State>,
    latency: Duration,
}

impl Default for DemoStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl DemoStore {
    pub fn seeded() -> Self {
        let accounts = fixtures::accounts()
            .into_iter()
            .map(|a| Account::new(User::new(a.id, a.username), a.password, a.token.to_owned()))
            .collect();
        let mut surveys = Vec::new();
        let mut tallies = HashMap::new();
        for seed in fixtures::surveys() {
            tallies.insert(
                seed.survey.id.clone(),
                Tally {
                    total: seed.total,
                    counts: seed.counts,
                },
            );
            surveys.push(seed.survey);
        }
        let next_seq = surveys.len() as u64 + 1;
        Self {
            state: RwLock::new(State {
                accounts,
                surveys,
                tallies,
                next_seq,
            }),
            latency: Duration::ZERO,
        }
    }

    /// Delays every operation, to mimic a remote backend.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Returns the user (carrying its token), the token and a status message.
    pub async fn login(&self, credentials: &Credentials) -> Result<(User, String, String), Error> {
        self.pause().await;
        let state = self.state.read().await;
        state
            .accounts
            .iter()
            .find(|a| a.user.username == credentials.username && a.verify(&credentials.password))
            .map(|a| a.session("Login successful (Demo Mode)"))
            .ok_or_else(|| Error::Unauthorized("invalid username or password; try admin/admin or demo/demo".into()))
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<(User, String, String), Error> {
        self.pause().await;
        let mut state = self.state.write().await;
        if state.accounts.iter().any(|a| a.user.username == credentials.username) {
            return Err(Error::Server {
                status: 409,
                message: "user already exists".into(),
            });
        }
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let account = Account::new(
            User::new(format!("user-{}", suffix), credentials.username.clone()),
            &credentials.password,
            format!("mock-token-{}", suffix),
        );
        let session = account.session("Registration successful (Demo Mode)");
        info!("registered demo user {}", credentials.username);
        state.accounts.push(account);
        Ok(session)
    }

    pub async fn user(&self, token: &str) -> Result<User, Error> {
        let state = self.state.read().await;
        state.account_by_token(token).map(|a| a.user.clone())
    }

    pub async fn my_surveys(&self, token: &str) -> Result<Vec<Survey>, Error> {
        self.pause().await;
        let state = self.state.read().await;
        let owner = &state.account_by_token(token)?.user.id;
        Ok(state
            .surveys
            .iter()
            .filter(|s| s.creator_id.as_deref() == Some(owner.as_str()))
            .cloned()
            .collect())
    }

    pub async fn create_survey(&self, request: &CreateSurveyRequest, token: &str) -> Result<Survey, Error> {
        self.pause().await;
        let mut state = self.state.write().await;
        let owner = state.account_by_token(token)?.user.id.clone();
        SurveyDraft::new(request.title.clone(), request.questions.clone()).validate()?;

        let survey = Survey {
            id: format!("SURVEY-{:03}", state.next_seq),
            title: request.title.clone(),
            questions: request
                .questions
                .iter()
                .enumerate()
                .map(|(i, q)| q.clone().with_id(format!("q{}", i + 1)))
                .collect(),
            created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            creator_id: Some(owner),
        };
        state.next_seq += 1;
        state.tallies.insert(survey.id.clone(), Tally::zeroed(&survey));
        state.surveys.push(survey.clone());
        info!("created survey {} ({} questions)", survey.id, survey.questions.len());
        Ok(survey)
    }

    pub async fn delete_survey(&self, id: &str, token: &str) -> Result<(), Error> {
        self.pause().await;
        let mut state = self.state.write().await;
        let owner = state.account_by_token(token)?.user.id.clone();
        let index = state
            .surveys
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::not_found("Survey not found"))?;
        if state.surveys[index].creator_id.as_deref() != Some(owner.as_str()) {
            return Err(Error::Forbidden("only the creator can delete this survey".into()));
        }
        state.surveys.remove(index);
        state.tallies.remove(id);
        info!("deleted survey {}", id);
        Ok(())
    }

    pub async fn survey(&self, id: &str) -> Result<Survey, Error> {
        self.pause().await;
        let state = self.state.read().await;
        state.survey(id).cloned()
    }

    pub async fn submit(&self, submission: &AnswerSubmission) -> Result<(), Error> {
        self.pause().await;
        let mut state = self.state.write().await;
        let survey = state.survey(&submission.survey_id)?.clone();
        submission.check_against(&survey).map_err(|e| Error::Server {
            status: 400,
            message: e.to_string(),
        })?;

        let tally = state
            .tallies
            .entry(survey.id.clone())
            .or_insert_with(|| Tally::zeroed(&survey));
        if tally.counts.len() != survey.questions.len() {
            *tally = Tally::zeroed(&survey);
        }
        tally.total += 1;
        for ((answer, question), counts) in submission.answers.iter().zip(&survey.questions).zip(tally.counts.iter_mut()) {
            counts.resize(question.answers.len(), 0);
            counts[answer.selected_answer_index] += 1;
        }
        info!("recorded response {} for survey {}", tally.total, survey.id);
        Ok(())
    }

    pub async fn results(&self, survey_id: &str) -> Result<SurveyResults, Error> {
        self.pause().await;
        let state = self.state.read().await;
        let survey = state.survey(survey_id)?;
        Ok(match state.tallies.get(survey_id) {
            Some(tally) => SurveyResults::from_counts(survey, tally.total, &tally.counts),
            None => SurveyResults::empty(survey),
        })
    }
}
