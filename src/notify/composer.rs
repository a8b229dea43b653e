use crate::logging::log_fallback;
use crate::models::TextGenerator;
use crate::recommend::{SelectedProblem, UserBehavior};

/// Subject and body ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Message tone, chosen by strict precedence: revision, then skipped,
/// then completed, then the neutral default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Revision,
    Skipped,
    Completed,
    Default,
}

impl Template {
    pub fn select(problem: &SelectedProblem) -> Self {
        if problem.is_revision {
            return Template::Revision;
        }
        match problem.user_behavior {
            Some(UserBehavior::Skipped) => Template::Skipped,
            Some(UserBehavior::Completed) => Template::Completed,
            None => Template::Default,
        }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            Template::Revision => "🧠 Time to Revise a DSA Problem!",
            Template::Skipped => "💪 It's Okay to Skip — Let's Tackle a New DSA Problem!",
            Template::Completed => "🎉 Great Work! Ready for the Next DSA Challenge?",
            Template::Default => "🚀 Your Daily DSA Problem Awaits!",
        }
    }

    pub fn prompt(&self, problem: &SelectedProblem, day: &str) -> String {
        let title = &problem.title;
        let link = &problem.link;
        let difficulty = problem.previous_difficulty;
        match self {
            Template::Revision => format!(
                "You are an AI tutor sending a short motivational revision email.\n\
                 Today is {day}.\n\
                 The student is revisiting: \"{title}\" (link: {link}).\n\n\
                 Write:\n\
                 - A friendly greeting\n\
                 - Mention it's a revision task and why it's helpful\n\
                 - Encourage them to recall the key idea\n\
                 - End with a motivational boost\n"
            ),
            Template::Skipped => format!(
                "You are an AI tutor reaching out to a student who skipped their last DSA problem.\n\
                 Today is {day}.\n\
                 Here's the new opportunity: \"{title}\" ({difficulty}) - {link}\n\n\
                 Write:\n\
                 - A kind, empathetic message\n\
                 - Normalize skipping (everyone does it!)\n\
                 - Emphasize progress over perfection\n\
                 - Encourage giving this new problem a try\n\
                 - Keep it short, warm, and motivational\n"
            ),
            Template::Completed => format!(
                "You are an AI tutor congratulating a student for solving a previous DSA problem.\n\
                 Today is {day}.\n\
                 The next challenge is: \"{title}\" ({difficulty}) - {link}\n\n\
                 Write:\n\
                 - A big congratulations\n\
                 - Acknowledge their consistency\n\
                 - Encourage them to keep the streak going\n\
                 - Add a link to the new problem\n"
            ),
            Template::Default => format!(
                "You are an AI tutor encouraging a student to continue DSA practice.\n\
                 Today is {day}.\n\
                 The problem for today is: \"{title}\" ({difficulty}) - {link}\n\n\
                 Write:\n\
                 - A warm greeting\n\
                 - Explain how today's problem fits their journey\n\
                 - Motivate and guide them to keep practicing\n"
            ),
        }
    }
}

/// Body used whenever the text generator cannot produce one
pub fn fallback_body(problem: &SelectedProblem) -> String {
    format!("Here's your problem of the day: {}\n{}", problem.title, problem.link)
}

pub struct NotificationComposer<'a, G: TextGenerator> {
    generator: &'a G,
}

impl<'a, G: TextGenerator> NotificationComposer<'a, G> {
    pub fn new(generator: &'a G) -> Self {
        NotificationComposer { generator }
    }

    /// Always yields a usable message: generator errors and empty output
    /// fall back to a fixed body under the same subject.
    /// `day` is the weekday name mentioned in the prompt, e.g. "Monday".
    pub async fn compose(&self, problem: &SelectedProblem, day: &str) -> Notification {
        let template = Template::select(problem);
        let prompt = template.prompt(problem, day);
        tracing::debug!(template = ?template, title = %problem.title, "Composing notification");

        let body = match self.generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                log_fallback("compose", "empty generator response");
                fallback_body(problem)
            }
            Err(e) => {
                log_fallback("compose", &format!("{:#}", e));
                fallback_body(problem)
            }
        };

        Notification {
            subject: template.subject().to_string(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attempts::Difficulty;

    struct FixedModel(Option<&'static str>);

    impl TextGenerator for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            self.0.map(str::to_string).ok_or_else(|| anyhow::anyhow!("quota exceeded"))
        }
    }

    fn problem(is_revision: bool, behavior: Option<UserBehavior>) -> SelectedProblem {
        SelectedProblem {
            title: "Valid Anagram".into(),
            link: "https://leetcode.com/problems/valid-anagram".into(),
            difficulty: "Easy".into(),
            previous_difficulty: Difficulty::Medium,
            recent_tags: vec![],
            user_behavior: behavior,
            reason: "r".into(),
            is_revision,
            was_incomplete: behavior == Some(UserBehavior::Skipped),
        }
    }

    #[test]
    fn test_template_precedence() {
        assert_eq!(Template::select(&problem(true, Some(UserBehavior::Skipped))), Template::Revision);
        assert_eq!(Template::select(&problem(true, Some(UserBehavior::Completed))), Template::Revision);
        assert_eq!(Template::select(&problem(false, Some(UserBehavior::Skipped))), Template::Skipped);
        assert_eq!(Template::select(&problem(false, Some(UserBehavior::Completed))), Template::Completed);
        assert_eq!(Template::select(&problem(false, None)), Template::Default);
    }

    #[test]
    fn test_subjects_are_distinct() {
        let subjects = [
            Template::Revision.subject(),
            Template::Skipped.subject(),
            Template::Completed.subject(),
            Template::Default.subject(),
        ];
        for (i, a) in subjects.iter().enumerate() {
            for b in &subjects[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_prompt_mentions_problem_and_day() {
        let p = problem(false, Some(UserBehavior::Skipped));
        let prompt = Template::Skipped.prompt(&p, "Friday");
        assert!(prompt.contains("Today is Friday."));
        assert!(prompt.contains("\"Valid Anagram\" (Medium) - https://leetcode.com/problems/valid-anagram"));
        assert!(prompt.contains("empathetic"));
    }

    #[tokio::test]
    async fn test_generated_body_is_trimmed() {
        let model = FixedModel(Some("\n  Hi there, keep going!  \n"));
        let n = NotificationComposer::new(&model)
            .compose(&problem(false, Some(UserBehavior::Completed)), "Monday")
            .await;
        assert_eq!(n.subject, "🎉 Great Work! Ready for the Next DSA Challenge?");
        assert_eq!(n.body, "Hi there, keep going!");
    }

    #[tokio::test]
    async fn test_fallback_is_deterministic() {
        let model = FixedModel(None);
        let composer = NotificationComposer::new(&model);
        let p = problem(true, Some(UserBehavior::Completed));

        let first = composer.compose(&p, "Wednesday").await;
        let second = composer.compose(&p, "Wednesday").await;
        assert_eq!(first, second);
        assert_eq!(first.subject, "🧠 Time to Revise a DSA Problem!");
        assert_eq!(
            first.body,
            "Here's your problem of the day: Valid Anagram\nhttps://leetcode.com/problems/valid-anagram"
        );
    }

    #[tokio::test]
    async fn test_record_without_behavior_gets_skipped_template() {
        let json = r#"{"Title": "Two Sum", "Leetcode Question Link": "https://leetcode.com/problems/two-sum"}"#;
        let p: SelectedProblem = serde_json::from_str(json).unwrap();
        let n = NotificationComposer::new(&FixedModel(None)).compose(&p, "Tuesday").await;
        assert_eq!(n.subject, Template::Skipped.subject());
        assert_eq!(n.body, "Here's your problem of the day: Two Sum\nhttps://leetcode.com/problems/two-sum");
    }

    #[tokio::test]
    async fn test_empty_generation_falls_back() {
        let model = FixedModel(Some("   "));
        let n = NotificationComposer::new(&model)
            .compose(&problem(false, None), "Sunday")
            .await;
        assert_eq!(n.subject, "🚀 Your Daily DSA Problem Awaits!");
        assert!(n.body.starts_with("Here's your problem of the day"));
    }
}
