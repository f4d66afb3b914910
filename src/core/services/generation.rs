use log::warn;

use crate::core::models::generation::GenerationRequest;
use crate::core::models::survey::{Question, SurveyDraft};
use crate::core::ports::api::SurveyGenerator;
use crate::core::session::SessionContext;
use crate::error::Error;

/// Asks the generator for a candidate question set; the caller reviews it before saving.
pub async fn generate<G>(generator: &G, session: &SessionContext, request: &GenerationRequest) -> Result<Vec<Question>, Error>
where
    G: SurveyGenerator + ?Sized,
{
    request.validate()?;
    let token = session.token()?;
    let generated = generator.generate_survey(request, token.as_deref()).await?;
    if let Some(message) = generated.error_message.filter(|m| !m.trim().is_empty()) {
        warn!("generator reported: {}", message);
        return Err(Error::Generation(message));
    }
    Ok(generated
        .questions
        .into_iter()
        .map(|q| Question::new(q.question, q.answers))
        .collect())
}

/// Fills a draft from a theme: the theme becomes the title when none was typed.
pub async fn fill_draft<G>(generator: &G, session: &SessionContext, draft: &mut SurveyDraft, request: &GenerationRequest) -> Result<(), Error>
where
    G: SurveyGenerator + ?Sized,
{
    let questions = generate(generator, session, request).await?;
    if draft.title.trim().is_empty() {
        draft.set_title(request.theme.trim());
    }
    draft.replace_questions(questions);
    Ok(())
}
