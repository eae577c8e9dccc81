use thiserror::Error;

#[derive(Error, Debug)]
pub enum PymatuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot resolve module '{module}': {reason}")]
    Resolution { module: String, reason: String },

    #[error("Parse error in module '{module}' at line {line}, column {column}")]
    Parse {
        module: String,
        line: usize,
        column: usize,
    },

    #[error("Structural error: {0}")]
    Structural(String),

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PymatuningError {
    pub fn resolution(module: impl ToString, reason: impl ToString) -> Self {
        Self::Resolution {
            module: module.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PymatuningError>;
