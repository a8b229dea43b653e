//! Two-stage parsing of a free-text suggestion: locate the first balanced
//! `{...}` block, then decode it against the suggestion schema.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuggestionParseError {
    #[error("response contains no complete JSON object")]
    NoJsonObject,
    #[error("suggestion does not match the expected record: {0}")]
    InvalidRecord(#[source] serde_json::Error),
    #[error("suggestion field '{0}' is empty")]
    EmptyField(&'static str),
}

/// The record the suggestion generator is asked to return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Reason")]
    pub reason: String,
}

/// First balanced brace-delimited block, skipping braces inside JSON strings.
/// None when there is no `{` or the first one is never closed.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut brace_count = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => brace_count += 1,
            '}' if !in_string => {
                brace_count -= 1;
                if brace_count == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Remove trailing commas from JSON (invalid but common in LLM outputs)
pub fn remove_trailing_commas(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let chars: Vec<char> = json.chars().collect();
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &ch) in chars.iter().enumerate() {
        if escape_next {
            escape_next = false;
            result.push(ch);
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            ',' if !in_string => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if matches!(next, Some('}') | Some(']')) {
                    continue;
                }
            }
            _ => {}
        }
        result.push(ch);
    }

    result
}

/// Decode one suggestion out of raw generator output
pub fn parse_suggestion(raw: &str) -> Result<Suggestion, SuggestionParseError> {
    let candidate = extract_json_object(raw).ok_or(SuggestionParseError::NoJsonObject)?;
    let cleaned = remove_trailing_commas(candidate);
    let suggestion: Suggestion =
        serde_json::from_str(&cleaned).map_err(SuggestionParseError::InvalidRecord)?;

    if suggestion.title.trim().is_empty() {
        return Err(SuggestionParseError::EmptyField("Title"));
    }
    if suggestion.link.trim().is_empty() {
        return Err(SuggestionParseError::EmptyField("Link"));
    }

    Ok(suggestion)
}
