use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}', expected Easy, Medium or Hard", other)),
        }
    }
}

/// Whether the learner finished the problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    Yes,
    No,
}

impl Completion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Completion::Yes => "yes",
            Completion::No => "no",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Completion::Yes)
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Completion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Completion::Yes),
            "no" | "n" | "false" => Ok(Completion::No),
            other => Err(format!("unknown completion '{}', expected yes or no", other)),
        }
    }
}

/// One recorded practice session. Field names on disk match the history
/// file written by earlier versions of the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: Difficulty,
    #[serde(rename = "Time Taken", default)]
    pub time_taken: String,
    #[serde(rename = "Completed")]
    pub completed: Completion,
    #[serde(rename = "Tags", default)]
    pub tags: Vec<String>,
    /// Kept as text: a malformed date must not make the whole history unreadable
    #[serde(rename = "date_attempted")]
    pub date_attempted: String,
    #[serde(rename = "Leetcode Question Link", default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Attempt {
    pub fn new(
        title: impl Into<String>,
        difficulty: Difficulty,
        completed: Completion,
        date_attempted: NaiveDate,
    ) -> Self {
        Attempt {
            title: title.into(),
            difficulty,
            time_taken: String::new(),
            completed,
            tags: Vec::new(),
            date_attempted: date_attempted.format(DATE_FORMAT).to_string(),
            link: None,
        }
    }

    pub fn with_time_taken(mut self, time_taken: impl Into<String>) -> Self {
        self.time_taken = time_taken.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Parsed attempt date, None when the stored text is not YYYY-MM-DD
    pub fn attempted_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_attempted.trim(), DATE_FORMAT).ok()
    }

    /// Stored link with surrounding whitespace removed, None when blank
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// Split comma-separated tag input, trimming each tag and dropping empties
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_serializes_with_history_keys() {
        let attempt = Attempt::new(
            "Two Sum",
            Difficulty::Easy,
            Completion::Yes,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .with_time_taken("20 mins")
        .with_tags(vec!["array".into(), "hash table".into()]);

        let value = serde_json::to_value(&attempt).unwrap();
        assert_eq!(value["Title"], "Two Sum");
        assert_eq!(value["Difficulty"], "Easy");
        assert_eq!(value["Time Taken"], "20 mins");
        assert_eq!(value["Completed"], "yes");
        assert_eq!(value["Tags"][1], "hash table");
        assert_eq!(value["date_attempted"], "2024-03-01");
        assert!(value.get("Leetcode Question Link").is_none());
    }

    #[test]
    fn test_malformed_date_still_deserializes() {
        let json = r#"{"Title":"X","Difficulty":"Hard","Time Taken":"","Completed":"no","Tags":[],"date_attempted":"not-a-date"}"#;
        let attempt: Attempt = serde_json::from_str(json).unwrap();
        assert!(attempt.attempted_on().is_none());
        assert_eq!(attempt.completed, Completion::No);
    }

    #[test]
    fn test_blank_link_is_none() {
        let mut attempt = Attempt::new(
            "Two Sum",
            Difficulty::Easy,
            Completion::Yes,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        attempt.link = Some("   ".to_string());
        assert!(attempt.link().is_none());
    }

    #[test]
    fn test_parse_tags_keeps_order() {
        assert_eq!(
            parse_tags(" graph, bfs ,, dp "),
            vec!["graph".to_string(), "bfs".to_string(), "dp".to_string()]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!("No".parse::<Completion>().unwrap(), Completion::No);
    }
}
