//! Engine-level errors

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::foundation::collections::ComponentId;

/// Engine-level errors
///
/// Load and update failures are reported once and never retried. A collision
/// that stops a move is not an error; see [`crate::physics::Actor`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// A component failed to resolve its assets; fatal to startup
    #[error("Load failed for {component}: {source}")]
    LoadFailed {
        /// Identifier or kind of the failing component
        component: String,
        /// What went wrong
        #[source]
        source: Box<EngineError>,
    },

    /// A component failed to prepare itself
    #[error("Prepare failed for {component}: {source}")]
    PrepareFailed {
        /// Identifier or kind of the failing component
        component: String,
        /// What went wrong
        #[source]
        source: Box<EngineError>,
    },

    /// A component's per-frame update failed; the rest of the pass is skipped
    #[error("Update failed for {component}: {source}")]
    UpdateFailed {
        /// Identifier or kind of the failing component
        component: String,
        /// What went wrong
        #[source]
        source: Box<EngineError>,
    },

    /// An animation key is not present in the sheet
    #[error("Missing animation {0:?}")]
    MissingAnimation(String),

    /// A handle does not resolve (removed, or checked out by a running pass)
    #[error("Component {0:?} is not available")]
    MissingComponent(ComponentId),

    /// A pass was started before a root component was set
    #[error("No root component has been set")]
    NoRoot,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Game-specific error
    #[error("{0}")]
    Custom(String),
}

impl EngineError {
    /// Whether this error already names the component that failed
    pub const fn is_attributed(&self) -> bool {
        matches!(
            self,
            Self::LoadFailed { .. } | Self::PrepareFailed { .. } | Self::UpdateFailed { .. }
        )
    }
}
