//! In-memory world errors.

use crate::error::{ErrorSeverity, ReportedError};
use crate::state::{EntityId, ItemSerial};

/// Errors raised while populating a [`crate::WorldState`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// An entity with the same id is already present.
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    /// The referenced entity does not exist.
    #[error("entity {0} not found")]
    UnknownEntity(EntityId),

    /// The entity does not carry the referenced item.
    #[error("entity {entity} does not carry {serial}")]
    UnknownItem { entity: EntityId, serial: ItemSerial },
}

impl ReportedError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity(_) => "DUPLICATE_ENTITY",
            Self::UnknownEntity(_) => "UNKNOWN_ENTITY",
            Self::UnknownItem { .. } => "UNKNOWN_ITEM",
        }
    }
}
