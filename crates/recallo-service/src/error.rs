use recallo_srs::SrsError;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by service operations.
///
/// Nothing here is logged and swallowed: every variant aborts the operation
/// (rolling back its transaction) and is returned to the caller, which decides
/// on user-facing messaging.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0} not found: {1}")]
    NotFound(&'static str, Uuid),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("No owner could be resolved for card {0}")]
    OwnerNotFound(Uuid),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Insufficient gold: {required} required, {available} available")]
    InsufficientGold { required: i64, available: i64 },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Stable machine-readable code for the boundary layer.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(..) => "not_found",
            Self::InvalidState(_) => "invalid_state",
            Self::OwnerNotFound(_) => "owner_not_found",
            Self::Conflict(_) => "conflict",
            Self::InsufficientGold { .. } => "insufficient_gold",
            Self::Validation(_) => "validation",
            Self::Database(_) => "database",
        }
    }
}

impl From<SrsError> for ServiceError {
    fn from(err: SrsError) -> Self {
        match err {
            SrsError::InvalidState(msg) => Self::InvalidState(msg),
            SrsError::InsufficientGold {
                required,
                available,
            } => Self::InsufficientGold {
                required,
                available,
            },
            SrsError::AlreadyInverted(card_id) => Self::Conflict(format!(
                "card {card_id} is already inverted or already has an inverted child"
            )),
            err @ SrsError::UnknownGoalStatus(_) => Self::InvalidState(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_service_errors() {
        let err = ServiceError::from(SrsError::InvalidState("no goal".to_string()));
        assert_eq!(err.kind(), "invalid_state");

        let err = ServiceError::from(SrsError::InsufficientGold {
            required: 10,
            available: 3,
        });
        assert!(matches!(
            err,
            ServiceError::InsufficientGold {
                required: 10,
                available: 3
            }
        ));

        let err = ServiceError::from(SrsError::AlreadyInverted(Uuid::nil()));
        assert_eq!(err.kind(), "conflict");

        let err = ServiceError::from(SrsError::UnknownGoalStatus("DONE".to_string()));
        assert_eq!(err.to_string(), "Invalid state: unknown daily goal status: DONE");
    }

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::NotFound("card", Uuid::nil());
        assert_eq!(
            err.to_string(),
            "card not found: 00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(err.kind(), "not_found");
    }
}
