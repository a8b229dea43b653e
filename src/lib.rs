pub mod attempts;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod notify;
pub mod perf;
pub mod persist;
pub mod recommend;
pub mod revision;
pub mod workflow;

pub use cli::run;
