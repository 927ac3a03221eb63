use crate::database::DatabaseError;
use sqlx::Error as SqlxError;
use thiserror::Error;
use uuid::Uuid;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database errors
    #[error("SQL error: {0}")]
    Sqlx(#[from] SqlxError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Backend unreachable or misbehaving
    #[error("Backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Terminal I/O errors (CLI)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Check if error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Generic message safe to show to an end user
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(_) => "No data found".to_string(),
            AppError::Validation(msg) => msg.clone(),
            _ => "Something went wrong, please try again".to_string(),
        }
    }
}

/// Repository-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database query error
    #[error("Query error: {0}")]
    Query(SqlxError),

    /// Record not found
    #[error("Record not found")]
    NotFound(String),

    /// Duplicate record
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for repository operations
pub type RepoResult<T> = Result<T, RepositoryError>;

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => AppError::NotFound(msg),
            RepositoryError::Query(e) => AppError::Sqlx(e),
            RepositoryError::Duplicate(msg) => AppError::Validation(format!("Duplicate: {}", msg)),
            RepositoryError::ConstraintViolation(msg) => AppError::Validation(msg),
            RepositoryError::InvalidInput(msg) => AppError::Validation(msg),
            RepositoryError::Unavailable(msg) => AppError::Backend(msg),
        }
    }
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::RowNotFound => RepositoryError::NotFound("Record not found".to_string()),
            SqlxError::PoolTimedOut | SqlxError::PoolClosed => {
                RepositoryError::Unavailable(err.to_string())
            }
            SqlxError::Database(db_err) => {
                // Check for common PostgreSQL error codes
                let code = db_err.code().map(|c| c.to_string());
                if code.as_deref() == Some("23505") {
                    // Unique violation
                    RepositoryError::Duplicate(db_err.message().to_string())
                } else if code.as_deref() == Some("23503") || code.as_deref() == Some("23514") {
                    // Foreign key / check constraint violation
                    RepositoryError::ConstraintViolation(db_err.message().to_string())
                } else {
                    RepositoryError::Query(err)
                }
            }
            _ => RepositoryError::Query(err),
        }
    }
}

/// Terminal conditions of a quiz traversal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("No quiz found for type '{0}'")]
    QuizNotFound(String),

    #[error("Quiz '{0}' has no root question")]
    RootQuestionMissing(String),

    #[error("Question {0} not found")]
    QuestionNotFound(Uuid),

    #[error("No classification found for answer {0}")]
    NoClassification(Uuid),

    #[error("Question {0} was already visited on this path")]
    CycleDetected(Uuid),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl QuizError {
    /// Message shown to the user; backend details stay in the logs
    pub fn message(&self) -> &'static str {
        match self {
            QuizError::QuizNotFound(_)
            | QuizError::RootQuestionMissing(_)
            | QuizError::QuestionNotFound(_) => "No data found",
            QuizError::NoClassification(_) => "No matching species found",
            QuizError::CycleDetected(_) | QuizError::Backend(_) => {
                "Something went wrong, please try again"
            }
        }
    }

    /// Check if this is a "nothing there" outcome rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            QuizError::QuizNotFound(_)
                | QuizError::RootQuestionMissing(_)
                | QuizError::QuestionNotFound(_)
        )
    }
}

impl From<RepositoryError> for QuizError {
    fn from(err: RepositoryError) -> Self {
        QuizError::Backend(err.to_string())
    }
}
