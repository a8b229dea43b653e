use std::cell::{Cell, RefCell};

use chrono::{Duration, NaiveDate};
use coach_lib::attempts::{Attempt, AttemptStore, Completion, Difficulty};
use coach_lib::config::AppConfig;
use coach_lib::error::ErrorKind;
use coach_lib::models::TextGenerator;
use coach_lib::notify::{MailTransport, OutgoingEmail};
use coach_lib::recommend::{SelectionStore, UserBehavior, REVISION_REASON};
use coach_lib::workflow;

const CATALOG: &str = "\
Title,Difficulty,Question Type,Leetcode Question Link
Two Sum,Easy,Array,https://leetcode.com/problems/two-sum
Add Two Numbers,Medium,Linked List,https://leetcode.com/problems/add-two-numbers
";

struct FakeModel {
    reply: Option<String>,
    calls: Cell<usize>,
}

impl FakeModel {
    fn replying(text: &str) -> Self {
        FakeModel { reply: Some(text.to_string()), calls: Cell::new(0) }
    }

    fn down() -> Self {
        FakeModel { reply: None, calls: Cell::new(0) }
    }
}

impl TextGenerator for FakeModel {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.reply.clone().ok_or_else(|| anyhow::anyhow!("service unavailable"))
    }
}

#[derive(Default)]
struct Outbox {
    sent: RefCell<Vec<OutgoingEmail>>,
}

impl MailTransport for Outbox {
    fn name(&self) -> &str {
        "outbox"
    }

    async fn deliver(&self, email: &OutgoingEmail) -> anyhow::Result<()> {
        self.sent.borrow_mut().push(email.clone());
        Ok(())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn setup() -> (tempfile::TempDir, AppConfig) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("leetcode_question.csv"), CATALOG).unwrap();
    let mut config = AppConfig::default();
    config.storage.data_dir = Some(dir.path().to_path_buf());
    config.email.recipient = Some("learner@example.com".to_string());
    (dir, config)
}

#[tokio::test]
async fn test_revision_due_skips_generator() {
    let (_dir, config) = setup();
    let store = AttemptStore::new(config.storage.history_path());
    store
        .append(Attempt::new("Two Sum", Difficulty::Easy, Completion::Yes, today() - Duration::days(7)))
        .await
        .unwrap();

    let model = FakeModel::replying("unused");
    let previous = Attempt::new("Climbing Stairs", Difficulty::Easy, Completion::Yes, today());
    let selected = workflow::record_attempt(&config, &model, previous, today()).await.unwrap();

    assert_eq!(model.calls.get(), 0);
    assert!(selected.is_revision);
    assert_eq!(selected.title, "Two Sum");
    assert_eq!(selected.link, "https://leetcode.com/problems/two-sum");
    assert_eq!(selected.reason, REVISION_REASON);

    let saved = SelectionStore::new(config.storage.selected_path()).load().await.unwrap();
    assert_eq!(saved, selected);

    // history is appended, not rewritten with backfilled data
    let history = store.load_all().await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].link.is_none());
}

#[tokio::test]
async fn test_suggestion_is_persisted() {
    let (_dir, config) = setup();
    let model = FakeModel::replying(
        "```json\n{\"Title\": \"Add Two Numbers\", \"Difficulty\": \"Medium\", \"Link\": \"https://leetcode.com/problems/add-two-numbers\", \"Reason\": \"Step up.\"}\n```",
    );
    let previous = Attempt::new("Two Sum", Difficulty::Easy, Completion::No, today())
        .with_tags(vec!["array".into()]);

    let selected = workflow::record_attempt(&config, &model, previous, today()).await.unwrap();
    assert_eq!(model.calls.get(), 1);
    assert_eq!(selected.title, "Add Two Numbers");
    assert_eq!(selected.user_behavior, Some(UserBehavior::Skipped));

    let text = std::fs::read_to_string(config.storage.selected_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["Tag"], " not Complete");
    assert_eq!(value["User Behavior"], "skipped");
    assert_eq!(value["Recent Tags"][0], "array");
}

#[tokio::test]
async fn test_parse_failure_keeps_previous_selection() {
    let (_dir, config) = setup();
    let good = FakeModel::replying(
        r#"{"Title": "Add Two Numbers", "Difficulty": "Medium", "Link": "https://leetcode.com/problems/add-two-numbers", "Reason": "r"}"#,
    );
    workflow::record_attempt(
        &config,
        &good,
        Attempt::new("Two Sum", Difficulty::Easy, Completion::Yes, today()),
        today(),
    )
    .await
    .unwrap();
    let before = std::fs::read_to_string(config.storage.selected_path()).unwrap();

    let chatty = FakeModel::replying("I think you should try something with linked lists.");
    let err = workflow::record_attempt(
        &config,
        &chatty,
        Attempt::new("Add Two Numbers", Difficulty::Medium, Completion::Yes, today()),
        today(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Parse);
    assert!(err.raw_response.unwrap().contains("linked lists"));
    assert_eq!(std::fs::read_to_string(config.storage.selected_path()).unwrap(), before);
}

#[tokio::test]
async fn test_corrupt_history_aborts_record() {
    let (_dir, config) = setup();
    std::fs::write(config.storage.history_path(), "{ not an array").unwrap();

    let model = FakeModel::replying("unused");
    let err = workflow::record_attempt(
        &config,
        &model,
        Attempt::new("Two Sum", Difficulty::Easy, Completion::Yes, today()),
        today(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Storage);
    assert_eq!(model.calls.get(), 0);
}

#[tokio::test]
async fn test_notify_selected_with_fallback_body() {
    let (_dir, config) = setup();
    let good = FakeModel::replying(
        r#"{"Title": "Add Two Numbers", "Difficulty": "Medium", "Link": "https://leetcode.com/problems/add-two-numbers", "Reason": "r"}"#,
    );
    workflow::record_attempt(
        &config,
        &good,
        Attempt::new("Two Sum", Difficulty::Easy, Completion::Yes, today()),
        today(),
    )
    .await
    .unwrap();

    let outbox = Outbox::default();
    let outcome = workflow::notify_selected(&config, &FakeModel::down(), &outbox, today())
        .await
        .unwrap();

    assert!(outcome.sent);
    let sent = outbox.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "learner@example.com");
    assert_eq!(sent[0].subject, "🎉 Great Work! Ready for the Next DSA Challenge?");
    assert_eq!(
        sent[0].body,
        "Here's your problem of the day: Add Two Numbers\nhttps://leetcode.com/problems/add-two-numbers"
    );
}

#[tokio::test]
async fn test_notify_without_recipient_sends_nothing() {
    let (_dir, mut config) = setup();
    config.email.recipient = None;

    let outbox = Outbox::default();
    let err = workflow::notify_selected(&config, &FakeModel::down(), &outbox, today())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Config);
    assert!(outbox.sent.borrow().is_empty());
}

#[tokio::test]
async fn test_due_revision_and_history() {
    let (_dir, config) = setup();
    assert!(workflow::due_revision(&config, today()).await.unwrap().is_none());

    let store = AttemptStore::new(config.storage.history_path());
    let mut broken = Attempt::new("Add Two Numbers", Difficulty::Medium, Completion::Yes, today());
    broken.date_attempted = "not-a-date".to_string();
    store.append(broken).await.unwrap();
    store
        .append(Attempt::new("two sum", Difficulty::Easy, Completion::Yes, today() - Duration::days(7)))
        .await
        .unwrap();
    store
        .append(Attempt::new("Add Two Numbers", Difficulty::Medium, Completion::Yes, today() - Duration::days(8)))
        .await
        .unwrap();

    let due = workflow::due_revision(&config, today()).await.unwrap().unwrap();
    assert_eq!(due.title, "Two Sum");

    let last_two = workflow::history(&config, Some(2)).await.unwrap();
    assert_eq!(last_two.len(), 2);
    assert_eq!(last_two[0].title, "two sum");
    assert_eq!(workflow::history(&config, None).await.unwrap().len(), 3);
}

struct PromptLog {
    prompts: RefCell<Vec<String>>,
}

impl TextGenerator for PromptLog {
    fn name(&self) -> &str {
        "prompt-log"
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok("Keep going!".to_string())
    }
}

#[tokio::test]
async fn test_notify_prompt_names_the_weekday() {
    let (_dir, config) = setup();
    let problem = SelectionStore::new(config.storage.selected_path());
    let selected = workflow::record_attempt(
        &config,
        &FakeModel::replying(
            r#"{"Title": "Add Two Numbers", "Difficulty": "Medium", "Link": "https://leetcode.com/problems/add-two-numbers", "Reason": "r"}"#,
        ),
        Attempt::new("Two Sum", Difficulty::Easy, Completion::Yes, today()),
        today(),
    )
    .await
    .unwrap();
    assert_eq!(problem.load().await.unwrap(), selected);

    let log = PromptLog { prompts: RefCell::new(Vec::new()) };
    let outbox = Outbox::default();
    let outcome = workflow::notify_problem(&config, &log, &outbox, &selected, today())
        .await
        .unwrap();

    assert!(outcome.sent);
    assert_eq!(outcome.notification.body, "Keep going!");
    let prompts = log.prompts.borrow();
    assert_eq!(prompts.len(), 1);
    // 2024-06-15 is a Saturday
    assert!(prompts[0].contains("Today is Saturday."));
}
