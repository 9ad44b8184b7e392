//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// The payload is not structurally what the action expects. Individual
    /// field problems never surface here; they are corrected by the validator.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Collaborator error: {0}")]
    CollaboratorError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
