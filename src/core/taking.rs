use std::collections::BTreeMap;

use log::{info, warn};

use crate::core::models::answer::AnswerSubmission;
use crate::core::models::survey::Survey;
use crate::core::ports::api::SurveyApi;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TakingState {
    Loading,
    Loaded,
    Answering,
    Submitting,
    Submitted,
    Failed(String),
}

/// A respondent working through one survey: load it, pick one answer per question, submit once.
#[derive(Debug)]
pub struct SurveyTaking {
    survey_id: String,
    survey: Option<Survey>,
    selections: BTreeMap<usize, usize>,
    state: TakingState,
    notice: Option<String>,
}

impl SurveyTaking {
    pub fn new(survey_id: impl Into<String>) -> Self {
        Self {
            survey_id: survey_id.into(),
            survey: None,
            selections: BTreeMap::new(),
            state: TakingState::Loading,
            notice: None,
        }
    }

    pub fn state(&self) -> &TakingState {
        &self.state
    }

    pub fn survey(&self) -> Option<&Survey> {
        self.survey.as_ref()
    }

    /// Inline message from the last rejected action, such as an unanswered question.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn answered(&self) -> usize {
        self.selections.len()
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(&question).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.survey.as_ref().map_or(false, |s| self.selections.len() == s.questions.len())
    }

    pub async fn load<A>(&mut self, api: &A) -> Result<&Survey, Error>
    where
        A: SurveyApi + ?Sized,
    {
        if self.state != TakingState::Loading {
            return Err(Error::validation("survey is already loaded"));
        }
        let fetched = api.survey(&self.survey_id).await;
        match fetched {
            Ok(survey) => {
                self.state = TakingState::Loaded;
                Ok(self.survey.insert(survey))
            }
            Err(e) => {
                self.state = TakingState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn can_answer(&self) -> bool {
        match self.state {
            TakingState::Loaded | TakingState::Answering => true,
            // a failed submission keeps the survey so the respondent can try again
            TakingState::Failed(_) => self.survey.is_some(),
            _ => false,
        }
    }

    pub fn select(&mut self, question: usize, answer: usize) -> Result<(), Error> {
        if !self.can_answer() {
            return Err(Error::validation("answers can't be changed right now"));
        }
        let survey = self.survey.as_ref().ok_or_else(|| Error::validation("survey is not loaded"))?;
        let q = survey
            .questions
            .get(question)
            .ok_or_else(|| Error::validation(format!("there is no question {}", question + 1)))?;
        if answer >= q.answers.len() {
            return Err(Error::validation(format!("question {} has no answer {}", question + 1, answer + 1)));
        }
        self.selections.insert(question, answer);
        self.state = TakingState::Answering;
        self.notice = None;
        Ok(())
    }

    fn submission(&self) -> Result<AnswerSubmission, Error> {
        let survey = self.survey.as_ref().ok_or_else(|| Error::validation("survey is not loaded"))?;
        let mut picks = Vec::with_capacity(survey.questions.len());
        for i in 0..survey.questions.len() {
            match self.selections.get(&i) {
                Some(&answer) => picks.push(answer),
                None => return Err(Error::validation(format!("please answer question {}", i + 1))),
            }
        }
        AnswerSubmission::for_survey(survey, &picks)
    }

    /// Rejects incomplete answers locally; only a complete set reaches the backend.
    pub async fn submit<A>(&mut self, api: &A) -> Result<(), Error>
    where
        A: SurveyApi + ?Sized,
    {
        if !self.can_answer() {
            return Err(Error::validation("nothing to submit"));
        }
        let submission = match self.submission() {
            Ok(submission) => submission,
            Err(e) => {
                self.notice = Some(e.to_string());
                return Err(e);
            }
        };
        self.state = TakingState::Submitting;
        self.notice = None;
        let outcome = api.submit_answers(&submission).await;
        match outcome {
            Ok(()) => {
                info!("answers for {} submitted", self.survey_id);
                self.state = TakingState::Submitted;
                Ok(())
            }
            Err(e) => {
                warn!("submitting answers for {} failed: {}", self.survey_id, e);
                self.state = TakingState::Failed(e.to_string());
                Err(e)
            }
        }
    }
}
