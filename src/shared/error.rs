use thiserror::Error;

/// Status reported for failures that never produced an HTTP response.
pub const CONNECTION_STATUS: u16 = 0;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Dados inválidos: {0}")]
    Validation(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Erro de conexão com o servidor")]
    Connection,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status associated with the failure, when one applies.
    /// Connection failures carry the fixed sentinel status.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Connection => Some(CONNECTION_STATUS),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, AppError::Connection)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
