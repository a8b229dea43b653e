pub mod model;
pub mod store;

pub use model::{Attempt, Completion, Difficulty, parse_tags};
pub use store::AttemptStore;
