use crate::attempts::Attempt;

/// How many of the latest attempts are summarized in the prompt
pub const HISTORY_WINDOW: usize = 5;

/// One line per attempt: title, difficulty, outcome, date
pub fn summarize_attempt(attempt: &Attempt) -> String {
    let outcome = if attempt.completed.is_completed() { "Completed" } else { "Skipped" };
    format!(
        "- {} ({}): {} on {}",
        attempt.title, attempt.difficulty, outcome, attempt.date_attempted
    )
}

fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "none".to_string()
    } else {
        tags.join(", ")
    }
}

/// Prompt asking the suggestion generator for the next problem as JSON
pub fn build_suggestion_prompt(previous: &Attempt, history: &[Attempt]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let recent = history[start..]
        .iter()
        .map(summarize_attempt)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an AI tutor designed to help a student practice Data Structures and Algorithms (DSA) on LeetCode.

The student recently attempted the LeetCode problem titled **"{title}"** with difficulty **{difficulty}**.
Completion status: **{completed}**.
Date: {date}.

### Guidelines for Selecting the Next Problem:
- If the last problem was **Easy** and **not completed**, suggest the **same or easier**.
- If **Medium** and **not completed**, suggest an **Easy or Medium** problem.
- If **Hard** and **not completed**, suggest a **Medium**.
- If completed, increase or maintain challenge level, staying within similar or varied topics.
- Avoid repeating tags: {tags}

Summary of Recent Attempts:
{recent}

Return result as:
{{
    "Title": "<problem title>",
    "Difficulty": "<difficulty>",
    "Link": "<Leetcode link>",
    "Reason": "<1-sentence reason>"
}}
ONLY return valid JSON.
"#,
        title = previous.title,
        difficulty = previous.difficulty,
        completed = previous.completed,
        date = previous.date_attempted,
        tags = format_tags(&previous.tags),
        recent = recent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attempts::{Completion, Difficulty};
    use chrono::NaiveDate;

    fn attempt(n: u32, completed: Completion) -> Attempt {
        Attempt::new(
            format!("Problem {}", n),
            Difficulty::Medium,
            completed,
            NaiveDate::from_ymd_opt(2024, 1, n).unwrap(),
        )
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summarize_attempt(&attempt(3, Completion::No)),
            "- Problem 3 (Medium): Skipped on 2024-01-03"
        );
        assert_eq!(
            summarize_attempt(&attempt(4, Completion::Yes)),
            "- Problem 4 (Medium): Completed on 2024-01-04"
        );
    }

    #[test]
    fn test_prompt_includes_last_five_only() {
        let history: Vec<Attempt> = (1..=7).map(|n| attempt(n, Completion::Yes)).collect();
        let previous = history.last().unwrap().clone().with_tags(vec!["graph".into(), "bfs".into()]);

        let prompt = build_suggestion_prompt(&previous, &history);
        assert!(!prompt.contains("Problem 2 (Medium)"));
        assert!(prompt.contains("- Problem 3 (Medium): Completed on 2024-01-03"));
        assert!(prompt.contains("- Problem 7 (Medium): Completed on 2024-01-07"));
        assert!(prompt.contains("titled **\"Problem 7\"** with difficulty **Medium**"));
        assert!(prompt.contains("Completion status: **yes**"));
        assert!(prompt.contains("Avoid repeating tags: graph, bfs"));
        assert!(prompt.contains("\"Reason\": \"<1-sentence reason>\""));
    }

    #[test]
    fn test_prompt_with_short_history() {
        let previous = attempt(1, Completion::No);
        let prompt = build_suggestion_prompt(&previous, std::slice::from_ref(&previous));
        assert!(prompt.contains("- Problem 1 (Medium): Skipped on 2024-01-01"));
        assert!(prompt.contains("Avoid repeating tags: none"));
    }
}
