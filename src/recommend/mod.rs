pub mod engine;
pub mod parse;
pub mod prompt;
pub mod selection;

pub use engine::{RecommendationEngine, REVISION_REASON};
pub use parse::{parse_suggestion, Suggestion, SuggestionParseError};
pub use selection::{SelectedProblem, SelectionStore, UserBehavior};
