//! Container settings.
//!
//! Settings are plain data so they can be loaded from a configuration
//! file with `serde` and handed to
//! [`ContainerBuilder::settings`](crate::container::ContainerBuilder::settings).

use serde::{Deserialize, Serialize};

/// What to do with a constructor parameter that has no declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UntypedParameterPolicy {
    /// Leave it out of the argument list; the constructor fills it.
    #[default]
    Skip,
    /// Fail with [`ContainerError::UntypedParameter`](crate::error::ContainerError::UntypedParameter).
    Reject,
}

/// Behavior switches for a container.
///
/// ```
/// use wiring_container::settings::{ContainerSettings, UntypedParameterPolicy};
///
/// let settings = ContainerSettings::default();
/// assert_eq!(settings.untyped_parameters, UntypedParameterPolicy::Skip);
/// assert!(settings.detect_cycles);
/// assert!(settings.discover);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContainerSettings {
    /// Policy for untyped constructor parameters.
    pub untyped_parameters: UntypedParameterPolicy,
    /// Fail fast on cycles instead of recursing until the stack runs out.
    pub detect_cycles: bool,
    /// Seed the type catalog with compile-time registered descriptors.
    pub discover: bool,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            untyped_parameters: UntypedParameterPolicy::Skip,
            detect_cycles: true,
            discover: true,
        }
    }
}
