//! Error types for container operations.
//!
//! Failures are wrapped one layer at a time as they cross a public
//! boundary: a missing descriptor or failing factory becomes a
//! [`ResolutionError`], and [`Container::has`](crate::container::Container::has)
//! wraps that again in an [`EntryNotFoundError`]. The original cause is
//! always reachable through [`std::error::Error::source`].

use std::error::Error;
use std::fmt;

use wiring_support::rendering::render_chain;

use crate::identifier::Identifier;

/// Boxed error returned by fallible factories and constructors.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Main error type for all container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// The identifier could not be turned into a type descriptor and no
    /// working factory is bound to it.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Existence check failed; wraps the underlying error.
    #[error(transparent)]
    EntryNotFound(#[from] EntryNotFoundError),

    /// A type ended up depending on itself.
    #[error(transparent)]
    CyclicDependency(#[from] CyclicDependencyError),

    /// The descriptor is abstract (interface-like) or has no constructor.
    #[error(
        "Cannot instantiate {identifier}: it is abstract or has no constructor\n  Hint: bind it to a concrete type or a factory"
    )]
    NotInstantiable { identifier: Identifier },

    /// An untyped constructor parameter was met while untyped parameters
    /// are rejected.
    #[error(
        "Cannot inject parameter `{parameter}` of {identifier}: it has no declared type\n  Hint: declare its type or allow untyped parameters to be skipped"
    )]
    UntypedParameter {
        identifier: Identifier,
        parameter: String,
    },

    /// The constructor itself failed.
    #[error("Failed to construct {identifier}: {source}")]
    ConstructionFailed {
        identifier: Identifier,
        #[source]
        source: BoxError,
    },

    /// No-argument construction was asked of a type whose constructor
    /// takes parameters.
    #[error("Cannot construct {identifier} without arguments: its constructor takes {required} parameter(s)")]
    ArgumentCount { identifier: Identifier, required: usize },

    /// The resolved instance is not of the requested Rust type.
    #[error("{identifier} resolved to {actual}, expected {expected}")]
    TypeMismatch {
        identifier: Identifier,
        expected: &'static str,
        actual: &'static str,
    },

    /// The identifier resolved to no instance where one was required.
    #[error("{identifier} resolved to no instance")]
    NullInstance { identifier: Identifier },

    /// `get_binding` was called for an identifier that has no binding.
    #[error("No binding registered for {identifier}")]
    Unbound { identifier: Identifier },
}

impl ContainerError {
    /// Stable, machine-readable error code.
    ///
    /// Wrapping errors report the code of what they wrap.
    pub fn code(&self) -> &'static str {
        match self {
            ContainerError::Resolution(err) => err.code(),
            ContainerError::EntryNotFound(err) => err.code(),
            ContainerError::CyclicDependency(_) => "cyclic_dependency",
            ContainerError::NotInstantiable { .. } => "not_instantiable",
            ContainerError::UntypedParameter { .. } => "untyped_parameter",
            ContainerError::ConstructionFailed { .. } => "construction_failed",
            ContainerError::ArgumentCount { .. } => "argument_count",
            ContainerError::TypeMismatch { .. } => "type_mismatch",
            ContainerError::NullInstance { .. } => "null_instance",
            ContainerError::Unbound { .. } => "unbound",
        }
    }

    /// Records which type needed the identifier that failed to resolve.
    ///
    /// Only the innermost requirer is kept.
    pub(crate) fn required_by(self, requirer: &Identifier) -> Self {
        match self {
            ContainerError::Resolution(mut err) if err.required_by.is_none() => {
                err.required_by = Some(requirer.clone());
                ContainerError::Resolution(err)
            }
            other => other,
        }
    }
}

/// Why an identifier could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionCause {
    /// No type descriptor is known under this name.
    #[error("no type descriptor registered for {name}")]
    UnknownType { name: Identifier },

    /// The bound factory returned an error.
    #[error("factory failed: {0}")]
    FactoryFailed(#[source] BoxError),
}

/// An identifier could not be turned into an instance or a descriptor.
///
/// Always carries its cause.
#[derive(Debug)]
pub struct ResolutionError {
    /// The identifier that was requested
    pub identifier: Identifier,
    /// What went wrong
    pub cause: ResolutionCause,
    /// The type whose constructor asked for it (if known)
    pub required_by: Option<Identifier>,
    /// Known identifiers that look alike
    pub suggestions: Vec<String>,
}

impl ResolutionError {
    pub(crate) fn unknown_type(identifier: &str, name: &str) -> Self {
        Self {
            identifier: identifier.into(),
            cause: ResolutionCause::UnknownType { name: name.into() },
            required_by: None,
            suggestions: Vec::new(),
        }
    }

    pub(crate) fn factory_failed(identifier: &str, source: BoxError) -> Self {
        Self {
            identifier: identifier.into(),
            cause: ResolutionCause::FactoryFailed(source),
            required_by: None,
            suggestions: Vec::new(),
        }
    }

    pub(crate) fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn code(&self) -> &'static str {
        match self.cause {
            ResolutionCause::UnknownType { .. } => "unknown_type",
            ResolutionCause::FactoryFailed(_) => "factory_failed",
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot resolve {}: {}", self.identifier, self.cause)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        if let ResolutionCause::UnknownType { .. } = self.cause {
            write!(
                f,
                "\n  Hint: register a descriptor for it or bind {} to a factory",
                self.identifier.short_name()
            )?;
        }
        Ok(())
    }
}

impl Error for ResolutionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// Raised by existence checks around whatever made the lookup fail.
#[derive(Debug)]
pub struct EntryNotFoundError {
    pub identifier: Identifier,
    source: Box<ContainerError>,
}

impl EntryNotFoundError {
    pub(crate) fn new(identifier: &str, source: ContainerError) -> Self {
        Self {
            identifier: identifier.into(),
            source: Box::new(source),
        }
    }

    /// Code of the wrapped failure.
    pub fn code(&self) -> &'static str {
        self.source.code()
    }

    /// The wrapped failure.
    pub fn inner(&self) -> &ContainerError {
        &self.source
    }
}

impl fmt::Display for EntryNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No entry found for {}: {}", self.identifier, self.source)
    }
}

impl Error for EntryNotFoundError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// A type was reached again while it was still being built.
#[derive(Debug)]
pub struct CyclicDependencyError {
    /// The resolution path that closes the cycle.
    /// Example: ["A", "B", "A"]
    pub chain: Vec<Identifier>,
}

impl fmt::Display for CyclicDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circular dependency detected:\n  {}", render_chain(&self.chain))?;
        write!(
            f,
            "\n  Hint: break the cycle with a factory binding for one of these types"
        )
    }
}

impl Error for CyclicDependencyError {}

/// Convenient Result type for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;
