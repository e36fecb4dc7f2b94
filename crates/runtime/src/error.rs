//! Errors surfaced by the plugin lifecycle.
use ability_core::{AbilityError, ConfigError, EntityId, ErrorSeverity, ReportedError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PluginError>;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("plugin is already enabled")]
    AlreadyEnabled,

    #[error("plugin is not enabled")]
    NotEnabled,

    #[error("plugin is disabled by configuration")]
    DisabledByConfig,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl ReportedError for PluginError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyEnabled => "ALREADY_ENABLED",
            Self::NotEnabled => "NOT_ENABLED",
            Self::DisabledByConfig => "DISABLED_BY_CONFIG",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

/// Logs a failed ability operation at error level in debug mode, debug level otherwise.
pub(crate) fn report(debug: bool, entity: EntityId, error: &AbilityError) {
    if debug {
        tracing::error!(
            target: "ability::errors",
            %entity,
            code = error.error_code(),
            severity = error.severity().as_str(),
            %error,
            "ability operation failed"
        );
    } else {
        tracing::debug!(
            target: "ability::errors",
            %entity,
            code = error.error_code(),
            %error,
            "ability operation failed"
        );
    }
}
