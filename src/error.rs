use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("ticket '{0}' not found")]
    TicketNotFound(String),

    #[error("invalid ticket ID '{0}': expected 'T-' followed by 4 to 8 digits")]
    InvalidTicketId(String),

    #[error("ID generation failed: {0}")]
    IdGenerationFailed(String),

    // Persistence errors
    #[error("failed to write persisted tickets: {0}")]
    PersistenceWrite(String),

    #[error("failed to read persisted tickets: {0}")]
    PersistenceRead(String),

    // Export errors
    #[error("export unavailable: {0}")]
    DependencyUnavailable(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("cannot {action} from the {view} view")]
    InvalidTransition { action: String, view: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DeskError>;
