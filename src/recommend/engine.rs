use chrono::NaiveDate;

use crate::attempts::{Attempt, Completion};
use crate::catalog::{Catalog, FALLBACK_LINK};
use crate::error::CoachError;
use crate::models::TextGenerator;
use crate::perf;
use crate::recommend::parse::{parse_suggestion, Suggestion};
use crate::recommend::prompt::build_suggestion_prompt;
use crate::recommend::selection::{SelectedProblem, UserBehavior};
use crate::revision::check_revision_needed;

pub const REVISION_REASON: &str = "This problem is due for revision as it was solved exactly 7 days ago.";

fn user_behavior(previous: &Attempt) -> UserBehavior {
    match previous.completed {
        Completion::No => UserBehavior::Skipped,
        Completion::Yes => UserBehavior::Completed,
    }
}

/// Selection for a revision that is due; no model involved
pub fn revision_selection(due: &Attempt, previous: &Attempt) -> SelectedProblem {
    SelectedProblem {
        title: due.title.clone(),
        link: due.link().unwrap_or(FALLBACK_LINK).to_string(),
        difficulty: due.difficulty.as_str().to_string(),
        previous_difficulty: previous.difficulty,
        recent_tags: previous.tags.clone(),
        user_behavior: Some(user_behavior(previous)),
        reason: REVISION_REASON.to_string(),
        is_revision: true,
        was_incomplete: previous.completed == Completion::No,
    }
}

/// Selection built from a parsed model suggestion
pub fn suggestion_selection(suggestion: Suggestion, previous: &Attempt) -> SelectedProblem {
    SelectedProblem {
        title: suggestion.title,
        link: suggestion.link,
        difficulty: suggestion.difficulty,
        previous_difficulty: previous.difficulty,
        recent_tags: previous.tags.clone(),
        user_behavior: Some(user_behavior(previous)),
        reason: suggestion.reason,
        is_revision: false,
        was_incomplete: previous.completed == Completion::No,
    }
}

/// Picks the next problem: a due revision first, otherwise whatever the
/// suggestion generator proposes.
pub struct RecommendationEngine<'a, G: TextGenerator> {
    generator: &'a G,
}

impl<'a, G: TextGenerator> RecommendationEngine<'a, G> {
    pub fn new(generator: &'a G) -> Self {
        RecommendationEngine { generator }
    }

    /// Run one recommendation cycle. Nothing is persisted here.
    ///
    /// A generator failure or an unparseable suggestion ends the cycle with
    /// an error; the parse error carries the raw response.
    pub async fn recommend(
        &self,
        catalog: &Catalog,
        previous: &Attempt,
        history: &[Attempt],
        today: NaiveDate,
    ) -> Result<SelectedProblem, CoachError> {
        let _perf = perf::PerfTimer::new("recommend_total");

        if let Some(due) = check_revision_needed(history, catalog, today) {
            return Ok(revision_selection(&due, previous));
        }

        let prompt = build_suggestion_prompt(previous, history);
        let model = self.generator.name().to_string();
        tracing::debug!(model = %model, prompt_len = prompt.len(), "Requesting suggestion");

        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            CoachError::generation(format!("Suggestion generator failed: {:#}", e))
                .with_model(model.clone())
        })?;

        let suggestion = parse_suggestion(&raw).map_err(|e| {
            tracing::warn!(
                model = %model,
                error = %e,
                raw_preview = %raw.chars().take(200).collect::<String>(),
                "Unparseable suggestion"
            );
            CoachError::parse(format!("Failed to parse AI response: {}", e))
                .with_model(model.clone())
                .with_raw_response(raw.clone())
        })?;

        tracing::info!(
            title = %suggestion.title,
            difficulty = %suggestion.difficulty,
            model = %model,
            "Suggestion accepted"
        );
        Ok(suggestion_selection(suggestion, previous))
    }
}
