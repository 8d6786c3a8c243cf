//! Error types for request dispatch.

use scribe_engine::EngineError;
use scribe_types::EntityKind;

/// Result alias for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Everything that can turn a request line into an error response.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The engine rejected the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The selection named a field the entity does not have.
    #[error("{entity} has no field {field:?}")]
    UnknownField {
        /// Entity the field was requested on.
        entity: EntityKind,
        /// The requested field name.
        field: String,
    },

    /// The selection gave a sub-selection to a scalar field.
    #[error("{entity} field {field:?} is not a relation")]
    NotARelation {
        /// Entity the field was requested on.
        entity: EntityKind,
        /// The scalar field name.
        field: String,
    },

    /// The request line was not a valid request.
    #[error("invalid request: {0}")]
    Json(#[from] serde_json::Error),
}

impl DispatchError {
    /// Stable machine-readable name of the error kind, reported to clients.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Engine(err) => err.kind(),
            Self::UnknownField { .. } => "UnknownField",
            Self::NotARelation { .. } => "NotARelation",
            Self::Json(_) => "InvalidRequest",
        }
    }
}

#[cfg(test)]
mod tests {
    use scribe_types::UserId;

    use super::*;

    #[test]
    fn engine_kinds_pass_through() {
        let err = DispatchError::from(EngineError::UserNotFound(UserId::new()));
        assert_eq!(err.kind(), "UserNotFound");
        assert!(err.to_string().starts_with("user not found"));
    }

    #[test]
    fn selection_errors_name_entity_and_field() {
        let err = DispatchError::UnknownField {
            entity: EntityKind::Post,
            field: String::from("likes"),
        };
        assert_eq!(err.kind(), "UnknownField");
        assert_eq!(err.to_string(), "post has no field \"likes\"");
    }
}
