use thiserror::Error;

#[derive(Error, Debug)]
pub enum CobError {
    #[error("Missing argument: {0}")]
    MissingArgument(String),
    #[error("External tool `{tool}` failed: {message}")]
    ExternalTool { tool: String, message: String },
    #[error("Seed error: {0}")]
    Seed(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CobError {
    pub fn external(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool { tool: tool.into(), message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, CobError>;
