use serde::{Deserialize, Serialize};

use crate::core::models::survey::Survey;

/// Share of `count` in `total` as a percentage rounded to one decimal; `0.0` when nothing was counted.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerTally {
    pub text: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResults {
    pub question_id: String,
    pub question: String,
    pub answers: Vec<AnswerTally>,
}

impl QuestionResults {
    /// The answer with the highest count, first one wins on ties.
    pub fn leading(&self) -> Option<&AnswerTally> {
        self.answers.iter().fold(None, |best: Option<&AnswerTally>, a| match best {
            Some(b) if b.count >= a.count => Some(b),
            _ => Some(a),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResults {
    pub survey_id: String,
    pub total_responses: u64,
    pub questions: Vec<QuestionResults>,
}

impl SurveyResults {
    /// Builds a summary from raw per-answer counts, deriving every percentage.
    ///
    /// `counts[q][a]` is the tally of answer `a` of question `q`; missing entries count as zero.
    pub fn from_counts(survey: &Survey, total: u64, counts: &[Vec<u64>]) -> Self {
        let questions = survey
            .questions
            .iter()
            .enumerate()
            .map(|(qi, q)| QuestionResults {
                question_id: q.id_or_position(qi),
                question: q.question.clone(),
                answers: q
                    .answers
                    .iter()
                    .enumerate()
                    .map(|(ai, text)| {
                        let count = counts.get(qi).and_then(|c| c.get(ai)).copied().unwrap_or(0);
                        AnswerTally {
                            text: text.clone(),
                            count,
                            percentage: percentage(count, total),
                        }
                    })
                    .collect(),
            })
            .collect();
        Self {
            survey_id: survey.id.clone(),
            total_responses: total,
            questions,
        }
    }

    pub fn empty(survey: &Survey) -> Self {
        Self::from_counts(survey, 0, &[])
    }

    pub fn question(&self, question_id: &str) -> Option<&QuestionResults> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }
}
