//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::validation::ValidationErrors;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Repository-level errors.
///
/// `Constraint` and `ForeignKey` are storage-side integrity failures and are
/// never used for field validation.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Foreign key violation: {relation} {id} does not exist")]
    ForeignKey { relation: &'static str, id: Uuid },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_stay_distinct_from_validation() {
        let id = Uuid::nil();
        let err: DomainError = RepoError::ForeignKey {
            relation: "category",
            id,
        }
        .into();

        assert!(matches!(err, DomainError::Repo(RepoError::ForeignKey { .. })));
        assert_eq!(
            err.to_string(),
            format!("Foreign key violation: category {id} does not exist")
        );
    }
}
