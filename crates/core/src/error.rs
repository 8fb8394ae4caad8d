use crate::entity::EntityKind;
use crate::types::DbId;

/// Domain-level error returned by validation, reference checks and the
/// CRUD service.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required string field was empty or absent.
    #[error("{field} must not be empty")]
    FieldRequired { field: &'static str },

    /// A numeric or temporal field is out of range.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// A non-positive identifier was supplied for a reference field.
    #[error("{field} must be a positive integer, got {id}")]
    InvalidIdentifier { field: &'static str, id: DbId },

    /// A foreign key points at a row that does not exist.
    #[error("{entity} with id {id} not found")]
    ReferenceNotFound { entity: EntityKind, id: DbId },

    /// The entity addressed by the operation does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: EntityKind, id: DbId },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidField`].
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure reported by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected a write because of a foreign key constraint.
    ///
    /// Only reachable when a concurrent request removes a parent (or adds a
    /// dependent) between the reference check and the write.
    #[error("foreign key constraint violated: {0}")]
    ForeignKey(String),

    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL foreign_key_violation
            if db_err.code().as_deref() == Some("23503") {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::ForeignKey(constraint);
            }
        }
        StoreError::Backend(Box::new(err))
    }
}
