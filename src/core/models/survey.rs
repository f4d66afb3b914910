use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const MIN_ANSWERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
    pub answers: Vec<String>,
}

impl Question {
    pub fn new<A, S>(question: impl Into<String>, answers: A) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            question: question.into(),
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Questions created without an id are addressed by position.
    pub fn id_or_position(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("q{}", index))
    }

    fn blank() -> Self {
        Self::new("", ["", ""])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
}

/// Editable survey held by the constructor before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDraft {
    pub title: String,
    pub questions: Vec<Question>,
}

impl Default for SurveyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            questions: vec![Question::blank()],
        }
    }
}

impl SurveyDraft {
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self { title: title.into(), questions }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn add_question(&mut self) -> usize {
        self.questions.push(Question::blank());
        self.questions.len() - 1
    }

    pub fn remove_question(&mut self, index: usize) -> Result<Question, Error> {
        self.check_question(index)?;
        if self.questions.len() == 1 {
            return Err(Error::validation("a survey needs at least one question"));
        }
        Ok(self.questions.remove(index))
    }

    pub fn set_question(&mut self, index: usize, text: impl Into<String>) -> Result<(), Error> {
        self.check_question(index)?;
        self.questions[index].question = text.into();
        Ok(())
    }

    pub fn add_answer(&mut self, question: usize) -> Result<usize, Error> {
        self.check_question(question)?;
        let answers = &mut self.questions[question].answers;
        answers.push(String::new());
        Ok(answers.len() - 1)
    }

    pub fn set_answer(&mut self, question: usize, answer: usize, text: impl Into<String>) -> Result<(), Error> {
        self.check_question(question)?;
        match self.questions[question].answers.get_mut(answer) {
            Some(slot) => {
                *slot = text.into();
                Ok(())
            }
            None => Err(Error::validation(format!("question {} has no answer {}", question + 1, answer + 1))),
        }
    }

    pub fn remove_answer(&mut self, question: usize, answer: usize) -> Result<String, Error> {
        self.check_question(question)?;
        let answers = &mut self.questions[question].answers;
        if answer >= answers.len() {
            return Err(Error::validation(format!("question {} has no answer {}", question + 1, answer + 1)));
        }
        if answers.len() == MIN_ANSWERS {
            return Err(Error::validation(format!("a question needs at least {} answers", MIN_ANSWERS)));
        }
        Ok(answers.remove(answer))
    }

    /// Replaces every question, e.g. with a generated candidate set.
    pub fn replace_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions.into_iter().map(|q| Question { id: None, ..q }).collect();
        if self.questions.is_empty() {
            self.questions.push(Question::blank());
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("enter a survey title"));
        }
        if self.questions.is_empty() {
            return Err(Error::validation("a survey needs at least one question"));
        }
        for (i, q) in self.questions.iter().enumerate() {
            if q.question.trim().is_empty() {
                return Err(Error::validation(format!("question {} is empty", i + 1)));
            }
            if q.answers.len() < MIN_ANSWERS {
                return Err(Error::validation(format!("question {} needs at least {} answers", i + 1, MIN_ANSWERS)));
            }
            for (j, a) in q.answers.iter().enumerate() {
                if a.trim().is_empty() {
                    return Err(Error::validation(format!("question {}, answer {} is empty", i + 1, j + 1)));
                }
            }
        }
        Ok(())
    }

    fn check_question(&self, index: usize) -> Result<(), Error> {
        if index >= self.questions.len() {
            return Err(Error::validation(format!("there is no question {}", index + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn filled() -> SurveyDraft {
        SurveyDraft::new(
            "Lunch",
            vec![Question::new("Soup?", ["Yes", "No"]), Question::new("Bread?", ["White", "Rye", "None"])],
        )
    }

    #[test]
    fn test_default_draft_has_one_blank_question() {
        let draft = SurveyDraft::default();
        assert_eq!(draft.questions.len(), 1);
        assert_eq!(draft.questions[0].answers.len(), 2);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_reports_positions() {
        assert!(filled().validate().is_ok());

        let mut draft = filled();
        draft.set_title("   ");
        assert_eq!(draft.validate().unwrap_err().to_string(), "enter a survey title");

        let mut draft = filled();
        draft.set_question(1, " ").unwrap();
        assert_eq!(draft.validate().unwrap_err().to_string(), "question 2 is empty");

        let mut draft = filled();
        draft.set_answer(1, 2, "").unwrap();
        assert_eq!(draft.validate().unwrap_err().to_string(), "question 2, answer 3 is empty");
    }

    #[test]
    fn test_minimums_are_kept() {
        let mut draft = SurveyDraft::default();
        assert!(draft.remove_question(0).is_err());
        assert!(draft.remove_answer(0, 1).is_err());

        let idx = draft.add_answer(0).unwrap();
        assert_eq!(idx, 2);
        assert!(draft.remove_answer(0, 2).is_ok());

        draft.add_question();
        assert!(draft.remove_question(1).is_ok());
        assert!(draft.remove_question(3).is_err());
    }

    #[test]
    fn test_replace_questions_drops_ids() {
        let mut draft = filled();
        draft.replace_questions(vec![Question::new("Tea?", ["Yes", "No"]).with_id("q9")]);
        assert_eq!(draft.questions.len(), 1);
        assert_eq!(draft.questions[0].id, None);

        draft.replace_questions(Vec::new());
        assert_eq!(draft.questions.len(), 1);
    }

    #[test]
    fn test_survey_wire_format() {
        let survey = Survey {
            id: "SURVEY-001".into(),
            title: "t".into(),
            questions: vec![Question::new("q", ["a", "b"]).with_id("q1")],
            created_at: Some("2024-11-25T10:00:00Z".into()),
            creator_id: Some("admin-001".into()),
        };
        let json = serde_json::to_value(&survey).unwrap();
        assert_eq!(json["createdAt"], "2024-11-25T10:00:00Z");
        assert_eq!(json["creatorId"], "admin-001");
        assert_eq!(json["questions"][0]["id"], "q1");

        let parsed: Survey = serde_json::from_str(r#"{"id":"x","title":"t","questions":[{"question":"q","answers":["a","b"]}]}"#).unwrap();
        assert_eq!(parsed.questions[0].id_or_position(0), "q0");
        assert_eq!(parsed.creator_id, None);
    }
}
