use sea_orm::error::{DbErr, SqlErr};
use serde::Serialize;

/// Prefix carried by storage errors raised from entity validation hooks.
pub const VALIDATION_ERROR_PREFIX: &str = "Validation error: ";

#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[serde(skip)] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Other error: {0}")]
    Other(
        #[from]
        #[serde(skip)]
        anyhow::Error,
    ),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                return ServiceError::ConstraintViolation(format!(
                    "unique constraint violated: {}",
                    msg
                ));
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return ServiceError::ConstraintViolation(format!(
                    "foreign key constraint violated: {}",
                    msg
                ));
            }
            _ => {}
        }

        match err {
            DbErr::Custom(msg) => match msg.strip_prefix(VALIDATION_ERROR_PREFIX) {
                Some(detail) => ServiceError::ValidationError(detail.to_string()),
                None => ServiceError::DatabaseError(DbErr::Custom(msg)),
            },
            DbErr::RecordNotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::DatabaseError(other),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

/// Builds the storage error an entity hook returns when a row fails validation.
pub fn validation_db_err(err: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(format!("{}{}", VALIDATION_ERROR_PREFIX, err))
}

impl ServiceError {
    /// Wraps a raw database error without classifying it.
    pub fn db_error(error: DbErr) -> Self {
        ServiceError::DatabaseError(error)
    }

    /// True for the two error kinds that stem from schema rules rather than infrastructure.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::ConstraintViolation(_)
        )
    }
}
