//! Common error infrastructure for ability-core.
//!
//! Nothing in the ability engine is fatal to the host process. Errors are
//! classified so callers can decide between logging, retrying on the next
//! enforcement cycle, or rejecting invalid input up front.

use crate::state::{EntityId, ItemKind};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the next scheduled cycle will retry on its own
/// - **Validation**: invalid input, rejected without retry
/// - **Internal**: unexpected state inconsistency worth investigating
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Recoverable error - the enforcement loop retries on its own cadence.
    ///
    /// Examples: weapon could not be created, inventory full
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown entity, invalid configuration
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: event for an entity whose registry entry is missing
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for errors reported by the ability crates.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait ReportedError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failures surfaced by ability operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    /// The host could not create an item for the entity.
    #[error("failed to grant {kind} to entity {entity}")]
    ItemGrantFailure { entity: EntityId, kind: ItemKind },

    /// A hook fired for an entity in a state the handler did not expect.
    #[error("inconsistent state for entity {entity}: {detail}")]
    StateInconsistency {
        entity: EntityId,
        detail: &'static str,
    },

    /// The host does not know the entity.
    #[error("entity {0} not found")]
    UnknownEntity(EntityId),
}

impl ReportedError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ItemGrantFailure { .. } => ErrorSeverity::Recoverable,
            Self::StateInconsistency { .. } => ErrorSeverity::Internal,
            Self::UnknownEntity(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemGrantFailure { .. } => "ITEM_GRANT_FAILURE",
            Self::StateInconsistency { .. } => "STATE_INCONSISTENCY",
            Self::UnknownEntity(_) => "UNKNOWN_ENTITY",
        }
    }
}
