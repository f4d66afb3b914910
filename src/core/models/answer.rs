use serde::{Deserialize, Serialize};

use crate::core::models::survey::Survey;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSelection {
    pub question_id: String,
    pub selected_answer_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub survey_id: String,
    pub answers: Vec<AnswerSelection>,
}

impl AnswerSubmission {
    /// Builds a submission from one selected answer index per question, in question order.
    pub fn for_survey(survey: &Survey, selections: &[usize]) -> Result<Self, Error> {
        let submission = Self {
            survey_id: survey.id.clone(),
            answers: survey
                .questions
                .iter()
                .zip(selections)
                .enumerate()
                .map(|(i, (q, &selected))| AnswerSelection {
                    question_id: q.id_or_position(i),
                    selected_answer_index: selected,
                })
                .collect(),
        };
        submission.check_against(survey)?;
        Ok(submission)
    }

    /// Answers are matched to questions by position: exactly one in-bounds index per question.
    pub fn check_against(&self, survey: &Survey) -> Result<(), Error> {
        if self.survey_id != survey.id {
            return Err(Error::validation(format!("answers belong to survey {}, not {}", self.survey_id, survey.id)));
        }
        if self.answers.len() != survey.questions.len() {
            return Err(Error::validation(format!(
                "expected {} answers, got {}",
                survey.questions.len(),
                self.answers.len()
            )));
        }
        for (i, (answer, question)) in self.answers.iter().zip(&survey.questions).enumerate() {
            if answer.selected_answer_index >= question.answers.len() {
                return Err(Error::validation(format!(
                    "answer {} is out of range for question {}",
                    answer.selected_answer_index + 1,
                    i + 1
                )));
            }
        }
        Ok(())
    }
}
