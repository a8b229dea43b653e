//! End-to-end flows behind each command. Components are built by the caller
//! from the startup configuration and passed in.

use chrono::NaiveDate;

use crate::attempts::{Attempt, AttemptStore};
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::error::CoachError;
use crate::models::TextGenerator;
use crate::notify::{MailTransport, Notification, NotificationComposer, NotificationDispatcher};
use crate::recommend::{RecommendationEngine, SelectedProblem, SelectionStore};
use crate::revision::check_revision_needed;

#[derive(Debug, Clone)]
pub struct NotifyOutcome {
    pub notification: Notification,
    pub sent: bool,
}

/// Save the attempt, pick the next problem and persist it as the selected
/// problem. A failed recommendation leaves the previous selection in place.
pub async fn record_attempt<G: TextGenerator>(
    config: &AppConfig,
    generator: &G,
    attempt: Attempt,
    today: NaiveDate,
) -> Result<SelectedProblem, CoachError> {
    let store = AttemptStore::new(config.storage.history_path());
    let history = store.append(attempt.clone()).await?;

    let catalog = Catalog::load(&config.storage.catalog_path())?;
    let selected = RecommendationEngine::new(generator)
        .recommend(&catalog, &attempt, &history, today)
        .await?;

    SelectionStore::new(config.storage.selected_path()).save(&selected).await?;
    Ok(selected)
}

/// Compose and send a message for `problem`
pub async fn notify_problem<G: TextGenerator, T: MailTransport>(
    config: &AppConfig,
    generator: &G,
    transport: &T,
    problem: &SelectedProblem,
    today: NaiveDate,
) -> Result<NotifyOutcome, CoachError> {
    let recipient = config.require_recipient()?;

    let day = today.format("%A").to_string();
    let notification = NotificationComposer::new(generator)
        .compose(problem, &day)
        .await;
    let sent = NotificationDispatcher::new(transport)
        .send(&notification, Some(recipient))
        .await?;

    Ok(NotifyOutcome { notification, sent })
}

/// Compose and send a message for the persisted selected problem
pub async fn notify_selected<G: TextGenerator, T: MailTransport>(
    config: &AppConfig,
    generator: &G,
    transport: &T,
    today: NaiveDate,
) -> Result<NotifyOutcome, CoachError> {
    config.require_recipient()?;
    let problem = SelectionStore::new(config.storage.selected_path()).load().await?;
    notify_problem(config, generator, transport, &problem, today).await
}

/// The revision due today, if any
pub async fn due_revision(config: &AppConfig, today: NaiveDate) -> Result<Option<Attempt>, CoachError> {
    let history = AttemptStore::new(config.storage.history_path()).load_all().await?;
    if history.is_empty() {
        return Ok(None);
    }
    let catalog = Catalog::load(&config.storage.catalog_path())?;
    Ok(check_revision_needed(&history, &catalog, today))
}

/// The most recent `last` attempts, oldest first; all when `last` is None
pub async fn history(config: &AppConfig, last: Option<usize>) -> Result<Vec<Attempt>, CoachError> {
    let mut attempts = AttemptStore::new(config.storage.history_path()).load_all().await?;
    if let Some(n) = last {
        let start = attempts.len().saturating_sub(n);
        attempts.drain(..start);
    }
    Ok(attempts)
}
