use serde::{Serialize, Deserialize};
use std::fmt;

/// Broad failure categories. Each one maps to a fixed handling policy:
/// configuration, storage and parse errors abort the current command and
/// generation errors are reported to the operator. A rejected email is not
/// an error; the dispatcher reports it as an unsent message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Config,
    Storage,
    Parse,
    Generation,
    Io,
    Json,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Storage => "storage",
            ErrorKind::Parse => "parse",
            ErrorKind::Generation => "generation",
            ErrorKind::Io => "io",
            ErrorKind::Json => "json",
        }
    }
}

/// Unified error type for the coach.
/// Library functions return Result<T, CoachError>; HTTP collaborators use
/// anyhow internally and are converted at the component boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachError {
    pub kind: ErrorKind,
    pub message: String,
    pub model: Option<String>,
    pub context: Option<String>,
    pub source: Option<String>,
    /// Raw model output kept for diagnosis when a suggestion cannot be parsed
    pub raw_response: Option<String>,
}

impl CoachError {
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        CoachError {
            kind,
            message: message.into(),
            model: None,
            context: None,
            source: None,
            raw_response: None,
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Generation, message)
    }

    /// Add model context to the error
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_raw_response<S: Into<String>>(mut self, raw: S) -> Self {
        self.raw_response = Some(raw.into());
        self
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for CoachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref model) = self.model {
            write!(f, " (model: {})", model)?;
        }
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for CoachError {}

impl From<anyhow::Error> for CoachError {
    fn from(err: anyhow::Error) -> Self {
        CoachError::generation(format!("{:#}", err)).with_source("anyhow")
    }
}

impl From<std::io::Error> for CoachError {
    fn from(err: std::io::Error) -> Self {
        CoachError::new(ErrorKind::Io, format!("I/O error: {}", err)).with_source("std::io")
    }
}

impl From<serde_json::Error> for CoachError {
    fn from(err: serde_json::Error) -> Self {
        CoachError::new(ErrorKind::Json, format!("JSON error: {}", err)).with_source("serde_json")
    }
}

impl From<toml::de::Error> for CoachError {
    fn from(err: toml::de::Error) -> Self {
        CoachError::config(format!("Invalid configuration file: {}", err)).with_source("toml")
    }
}

impl From<csv::Error> for CoachError {
    fn from(err: csv::Error) -> Self {
        CoachError::storage(format!("Catalog error: {}", err)).with_source("csv")
    }
}
