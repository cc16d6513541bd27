//! Binding registry: how identifiers are overridden.
//!
//! The registry maps an [`Identifier`] to a [`BindingSource`]: either a
//! factory producing the value, or another identifier to resolve instead.
//! It never stores built values.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::BoxError;
use crate::identifier::Identifier;
use crate::instance::Instance;

/// Type alias for factory functions.
///
/// A factory takes no arguments and returns an optional instance; `None`
/// is a legitimate "nothing" result, errors abort the resolution.
pub type FactoryFn = Arc<dyn Fn() -> Result<Option<Instance>, BoxError> + Send + Sync>;

/// What an identifier is bound to.
#[derive(Clone)]
pub enum BindingSource {
    /// Invoked on every resolution.
    Factory(FactoryFn),
    /// Resolve this type name instead.
    Alias(Identifier),
}

impl BindingSource {
    /// Wraps an infallible factory.
    pub fn factory(factory: impl Fn() -> Option<Instance> + Send + Sync + 'static) -> Self {
        BindingSource::Factory(Arc::new(move || Ok(factory())))
    }

    /// Wraps a factory that may fail.
    pub fn fallible(
        factory: impl Fn() -> Result<Option<Instance>, BoxError> + Send + Sync + 'static,
    ) -> Self {
        BindingSource::Factory(Arc::new(factory))
    }

    pub fn alias(target: impl Into<Identifier>) -> Self {
        BindingSource::Alias(target.into())
    }

    pub fn is_factory(&self) -> bool {
        matches!(self, BindingSource::Factory(_))
    }

    pub fn as_alias(&self) -> Option<&Identifier> {
        match self {
            BindingSource::Alias(target) => Some(target),
            BindingSource::Factory(_) => None,
        }
    }
}

impl From<Identifier> for BindingSource {
    fn from(target: Identifier) -> Self {
        BindingSource::Alias(target)
    }
}

impl From<&str> for BindingSource {
    fn from(target: &str) -> Self {
        BindingSource::Alias(target.into())
    }
}

impl From<String> for BindingSource {
    fn from(target: String) -> Self {
        BindingSource::Alias(target.into())
    }
}

impl fmt::Debug for BindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingSource::Factory(_) => f.write_str("Factory(..)"),
            BindingSource::Alias(target) => f.debug_tuple("Alias").field(&target.as_str()).finish(),
        }
    }
}

/// Insertion-ordered binding storage owned by one container.
#[derive(Debug, Default, Clone)]
pub(crate) struct BindingRegistry {
    bindings: IndexMap<Identifier, BindingSource>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `identifier`, returning what it replaced.
    pub fn insert(&mut self, identifier: Identifier, source: BindingSource) -> Option<BindingSource> {
        debug!(identifier = %identifier, source = ?source, "Bound identifier");
        self.bindings.insert(identifier, source)
    }

    pub fn get(&self, identifier: &str) -> Option<&BindingSource> {
        self.bindings.get(identifier)
    }

    pub fn all(&self) -> &IndexMap<Identifier, BindingSource> {
        &self.bindings
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.bindings.keys()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
