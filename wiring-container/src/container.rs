//! # The Container
//!
//! Resolves identifiers into freshly built instances.
//!
//! # Architecture
//! ```text
//! get(id) ──> resolved(id) ──┬─> Resolved::Instance ───────────────> value
//!                            └─> Resolved::Pending(descriptor)
//!                                      │
//!                                 instantiate()
//!                                      │  get(param type) for each typed parameter
//!                                      ▼
//!                                   instance
//! ```
//!
//! Every resolution is transient: nothing built is ever cached.
//!
//! # Examples
//! ```rust
//! use std::sync::Arc;
//! use wiring_container::prelude::*;
//!
//! #[derive(Default)]
//! struct Repository;
//!
//! struct Service {
//!     repository: Arc<Repository>,
//! }
//!
//! let mut container = Container::new();
//! container
//!     .register_descriptor(
//!         TypeDescriptor::builder("Repository").default_constructor::<Repository>(),
//!     )
//!     .register_descriptor(
//!         TypeDescriptor::builder("Service")
//!             .parameter("repository", "Repository")
//!             .constructor(|args| Ok(Service { repository: args.take()? })),
//!     );
//!
//! let service: Arc<Service> = container.resolve("Service").expect("Failed to resolve");
//! let _repository: &Repository = &service.repository;
//! assert!(container.has("Service").unwrap());
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info, instrument, trace, warn};
use wiring_support::rendering::suggest;

use crate::catalog::TypeCatalog;
use crate::descriptor::{Arguments, Injectable, TypeDescriptor};
use crate::error::{
    BoxError, ContainerError, CyclicDependencyError, EntryNotFoundError, ResolutionError, Result,
};
use crate::graph::GraphValidator;
use crate::identifier::Identifier;
use crate::instance::Instance;
use crate::provider::Provider;
use crate::registry::{BindingRegistry, BindingSource, FactoryFn};
use crate::settings::{ContainerSettings, UntypedParameterPolicy};

const MAX_SUGGESTIONS: usize = 3;

// ============================================================
// ContainerBuilder
// ============================================================

/// Configures and creates a [`Container`].
///
/// # Examples
/// ```rust,ignore
/// let container = Container::builder()
///     .untyped_parameters(UntypedParameterPolicy::Reject)
///     .register::<Service>()
///     .provider(PersistenceProvider)
///     .build();
/// ```
pub struct ContainerBuilder {
    settings: ContainerSettings,
    descriptors: Vec<TypeDescriptor>,
    providers: Vec<Box<dyn Provider>>,
}

impl ContainerBuilder {
    fn new() -> Self {
        Self {
            settings: ContainerSettings::default(),
            descriptors: Vec::new(),
            providers: Vec::new(),
        }
    }

    /// Replaces all settings at once.
    pub fn settings(mut self, settings: ContainerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn untyped_parameters(mut self, policy: UntypedParameterPolicy) -> Self {
        self.settings.untyped_parameters = policy;
        self
    }

    pub fn detect_cycles(mut self, detect: bool) -> Self {
        self.settings.detect_cycles = detect;
        self
    }

    /// Whether to start from the compile-time registered descriptors.
    pub fn discover(mut self, discover: bool) -> Self {
        self.settings.discover = discover;
        self
    }

    /// Describes an [`Injectable`] type.
    pub fn register<T: Injectable>(self) -> Self {
        self.descriptor(T::descriptor())
    }

    /// Adds a hand-built descriptor.
    pub fn descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Installs a [`Provider`] once the container exists.
    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    #[instrument(skip(self), name = "container_build")]
    pub fn build(self) -> Container {
        let catalog = if self.settings.discover {
            TypeCatalog::discovered()
        } else {
            TypeCatalog::new()
        };

        let mut container = Container {
            bindings: BindingRegistry::new(),
            catalog,
            settings: self.settings,
        };

        for descriptor in self.descriptors {
            container.register_descriptor(descriptor);
        }
        for provider in &self.providers {
            container.add_provider(provider.as_ref());
        }

        info!(
            described = container.catalog.len(),
            bound = container.bindings.len(),
            "Container ready"
        );
        container
    }
}

// ═══════════════════════════════════════════
// Resolved
// ═══════════════════════════════════════════

/// Result of resolving an identifier, before any instantiation.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// A factory produced this value (possibly nothing).
    Instance(Option<Instance>),
    /// A type still to be built.
    Pending(TypeDescriptor),
}

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Constructor-injection container.
///
/// Holds the binding registry, the type catalog and the settings. It has
/// no internal locking: share it behind a lock when several threads bind
/// and resolve concurrently.
#[derive(Clone)]
pub struct Container {
    bindings: BindingRegistry,
    catalog: TypeCatalog,
    settings: ContainerSettings,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Container with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    pub fn settings(&self) -> &ContainerSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    // ── Type catalog ──

    /// Describes an [`Injectable`] type.
    pub fn register<T: Injectable>(&mut self) -> &mut Self {
        self.register_descriptor(T::descriptor())
    }

    /// Adds a descriptor, replacing any with the same identifier.
    pub fn register_descriptor(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        debug!(identifier = %descriptor.identifier(), "Registered descriptor");
        self.catalog.insert(descriptor);
        self
    }

    /// Lets a [`Provider`] add its bindings and descriptors.
    pub fn add_provider(&mut self, provider: &dyn Provider) -> &mut Self {
        debug!(provider = provider.name(), "Installing provider");
        provider.register(self);
        self
    }

    // ── Binding registry ──

    /// Binds `identifier` to a factory or to another identifier.
    ///
    /// Overwrites any previous binding for `identifier`.
    ///
    /// ```rust
    /// use wiring_container::prelude::*;
    ///
    /// let mut container = Container::new();
    /// container
    ///     .bind("Storage", "DiskStorage")
    ///     .bind("Storage", BindingSource::factory(|| Some(Instance::new(7u8))));
    ///
    /// assert_eq!(container.bindings().len(), 1);
    /// assert!(container.bindings()["Storage"].is_factory());
    /// ```
    pub fn bind(
        &mut self,
        identifier: impl Into<Identifier>,
        source: impl Into<BindingSource>,
    ) -> &mut Self {
        self.bindings.insert(identifier.into(), source.into());
        self
    }

    /// Binds `identifier` to itself.
    ///
    /// Resolution behaves as if it were unbound, but the binding is listed
    /// by [`bindings`](Self::bindings).
    pub fn bind_self(&mut self, identifier: impl Into<Identifier>) -> &mut Self {
        let identifier = identifier.into();
        self.bind(identifier.clone(), identifier)
    }

    /// Binds `identifier` to an infallible factory.
    pub fn bind_factory(
        &mut self,
        identifier: impl Into<Identifier>,
        factory: impl Fn() -> Option<Instance> + Send + Sync + 'static,
    ) -> &mut Self {
        self.bind(identifier, BindingSource::factory(factory))
    }

    /// Binds `identifier` to a factory that may fail.
    pub fn bind_fallible(
        &mut self,
        identifier: impl Into<Identifier>,
        factory: impl Fn() -> std::result::Result<Option<Instance>, BoxError> + Send + Sync + 'static,
    ) -> &mut Self {
        self.bind(identifier, BindingSource::fallible(factory))
    }

    /// Read-only view of every binding, in insertion order.
    pub fn bindings(&self) -> &IndexMap<Identifier, BindingSource> {
        self.bindings.all()
    }

    /// The raw source bound to `identifier`.
    pub fn binding(&self, identifier: &str) -> Option<&BindingSource> {
        self.bindings.get(identifier)
    }

    /// Produces the value of a binding.
    ///
    /// A factory is invoked. An alias is built by no-argument
    /// construction of its target, without resolving any parameters.
    ///
    /// # Errors
    /// - [`ContainerError::Unbound`] when nothing is bound to `identifier`
    /// - [`ContainerError::ArgumentCount`] when the target's constructor
    ///   takes parameters
    pub fn get_binding(&self, identifier: &str) -> Result<Option<Instance>> {
        let source = self
            .bindings
            .get(identifier)
            .ok_or_else(|| ContainerError::Unbound {
                identifier: identifier.into(),
            })?;

        match source {
            BindingSource::Factory(factory) => Ok(self.invoke(identifier, factory)?),
            BindingSource::Alias(target) => {
                let descriptor = self
                    .catalog
                    .describe(target.as_str())
                    .ok_or_else(|| self.unknown_type(identifier, target.as_str()))?;

                if !descriptor.parameters().is_empty() {
                    return Err(ContainerError::ArgumentCount {
                        identifier: target.clone(),
                        required: descriptor.parameters().len(),
                    });
                }
                descriptor.construct(&mut Arguments::new()).map(Some)
            }
        }
    }

    // ── Resolution ──

    /// Resolves `identifier` and builds whatever it names.
    ///
    /// Returns `None` only when a factory produced nothing.
    ///
    /// # Errors
    /// - [`ContainerError::Resolution`] when a name cannot be described or a factory fails
    /// - any construction error from the dependency tree
    pub fn get(&self, identifier: &str) -> Result<Option<Instance>> {
        self.get_in(identifier, &mut ResolutionPath::default())
    }

    /// Whether `identifier` can be answered.
    ///
    /// Pending types report whether they are instantiable; factory results
    /// report whether they produced something. Dependencies are not built.
    ///
    /// # Errors
    /// Any resolution failure, wrapped in [`EntryNotFoundError`].
    pub fn has(&self, identifier: &str) -> std::result::Result<bool, EntryNotFoundError> {
        match self.resolved(identifier) {
            Ok(Resolved::Pending(descriptor)) => Ok(descriptor.is_instantiable()),
            Ok(Resolved::Instance(value)) => Ok(value.is_some()),
            Err(err) => Err(EntryNotFoundError::new(identifier, err.into())),
        }
    }

    /// Resolves `identifier` and downcasts the result.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use wiring_container::prelude::*;
    ///
    /// let mut container = Container::new();
    /// container.bind_factory("port", || Some(Instance::new(8080u16)));
    ///
    /// let port: Arc<u16> = container.resolve("port").unwrap();
    /// assert_eq!(*port, 8080);
    /// ```
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self, identifier: &str) -> Result<Arc<T>> {
        let instance = self
            .get(identifier)?
            .ok_or_else(|| ContainerError::NullInstance {
                identifier: identifier.into(),
            })?;

        instance
            .downcast::<T>()
            .map_err(|actual| ContainerError::TypeMismatch {
                identifier: identifier.into(),
                expected: type_name::<T>(),
                actual: actual.type_name(),
            })
    }

    /// Builds an [`Injectable`] type through its type identifier.
    pub fn make<T: Injectable>(&self) -> Result<Arc<T>> {
        self.resolve::<T>(Identifier::of::<T>().as_str())
    }

    /// First resolution step: follow the binding, if any.
    ///
    /// A factory binding is invoked and its value returned as
    /// [`Resolved::Instance`]. Anything else is looked up in the catalog
    /// and returned as [`Resolved::Pending`]. Aliases are followed one
    /// level only.
    pub fn resolved(&self, identifier: &str) -> std::result::Result<Resolved, ResolutionError> {
        let mut name = identifier;

        if let Some(source) = self.bindings.get(identifier) {
            match source {
                BindingSource::Factory(factory) => {
                    return self.invoke(identifier, factory).map(Resolved::Instance);
                }
                BindingSource::Alias(target) => {
                    trace!(from = identifier, to = %target, "Following alias");
                    name = target.as_str();
                }
            }
        }

        self.catalog
            .describe(name)
            .cloned()
            .map(Resolved::Pending)
            .ok_or_else(|| self.unknown_type(identifier, name))
    }

    /// Builds a described type, resolving its typed parameters first.
    pub fn instantiate(&self, descriptor: &TypeDescriptor) -> Result<Instance> {
        self.instantiate_in(descriptor, &mut ResolutionPath::default())
    }

    /// Checks the whole dependency graph without building anything.
    ///
    /// # Errors
    /// Unknown types, cycles, non-instantiable dependencies and (when
    /// rejected) untyped parameters.
    pub fn validate(&self) -> Result<()> {
        GraphValidator::new(&self.bindings, &self.catalog, &self.settings).validate()
    }

    // ── Internal ──

    fn get_in(&self, identifier: &str, path: &mut ResolutionPath) -> Result<Option<Instance>> {
        match self.resolved(identifier)? {
            Resolved::Instance(value) => Ok(value),
            Resolved::Pending(descriptor) => self.instantiate_in(&descriptor, path).map(Some),
        }
    }

    fn instantiate_in(&self, descriptor: &TypeDescriptor, path: &mut ResolutionPath) -> Result<Instance> {
        let identifier = descriptor.identifier();
        if !descriptor.is_instantiable() {
            return Err(ContainerError::NotInstantiable {
                identifier: identifier.clone(),
            });
        }

        if self.settings.detect_cycles {
            path.enter(identifier)?;
        }

        let mut arguments = Arguments::new();
        for parameter in descriptor.parameters() {
            match parameter.declared_type() {
                Some(declared) => {
                    trace!(
                        identifier = %identifier,
                        parameter = parameter.name(),
                        declared = %declared,
                        "Resolving parameter"
                    );
                    let value = self
                        .get_in(declared.as_str(), path)
                        .map_err(|err| err.required_by(identifier))?;
                    arguments.push(parameter.name(), value);
                }
                None => match self.settings.untyped_parameters {
                    UntypedParameterPolicy::Skip => {
                        trace!(
                            identifier = %identifier,
                            parameter = parameter.name(),
                            "Skipping untyped parameter"
                        );
                    }
                    UntypedParameterPolicy::Reject => {
                        return Err(ContainerError::UntypedParameter {
                            identifier: identifier.clone(),
                            parameter: parameter.name().to_string(),
                        });
                    }
                },
            }
        }

        let instance = descriptor.construct(&mut arguments)?;

        if self.settings.detect_cycles {
            path.leave();
        }
        trace!(identifier = %identifier, "Constructed");
        Ok(instance)
    }

    fn invoke(
        &self,
        identifier: &str,
        factory: &FactoryFn,
    ) -> std::result::Result<Option<Instance>, ResolutionError> {
        trace!(identifier, "Invoking factory");
        factory().map_err(|cause| ResolutionError::factory_failed(identifier, cause))
    }

    fn unknown_type(&self, identifier: &str, name: &str) -> ResolutionError {
        ResolutionError::unknown_type(identifier, name)
            .with_suggestions(suggestions(&self.bindings, &self.catalog, name))
    }
}

/// Known identifiers close to `name`, for error hints.
pub(crate) fn suggestions(bindings: &BindingRegistry, catalog: &TypeCatalog, name: &str) -> Vec<String> {
    let known = bindings
        .identifiers()
        .chain(catalog.identifiers())
        .map(Identifier::as_str);
    suggest(name, known, MAX_SUGGESTIONS)
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.len())
            .field("described", &self.catalog.len())
            .field("settings", &self.settings)
            .finish()
    }
}

// ═══════════════════════════════════════════
// ResolutionPath
// ═══════════════════════════════════════════

/// Types currently being built, outermost first.
#[derive(Debug, Default)]
struct ResolutionPath {
    stack: Vec<Identifier>,
}

impl ResolutionPath {
    fn enter(&mut self, identifier: &Identifier) -> Result<()> {
        if let Some(start) = self.stack.iter().position(|entered| entered == identifier) {
            let mut chain = self.stack[start..].to_vec();
            chain.push(identifier.clone());

            warn!(cycle = ?chain, "Circular dependency detected");
            return Err(ContainerError::CyclicDependency(CyclicDependencyError { chain }));
        }
        self.stack.push(identifier.clone());
        Ok(())
    }

    fn leave(&mut self) {
        self.stack.pop();
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, ContainerBuilder, Resolved};
    pub use crate::descriptor::{Arguments, Dependency, Injectable, TypeDescriptor};
    pub use crate::error::{ContainerError, EntryNotFoundError, ResolutionError, Result};
    pub use crate::identifier::Identifier;
    pub use crate::instance::Instance;
    pub use crate::provider::Provider;
    pub use crate::registry::BindingSource;
    pub use crate::settings::{ContainerSettings, UntypedParameterPolicy};
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct Repository;

    struct Service {
        repository: Arc<Repository>,
        retries: u32,
    }

    struct Sentinel;

    fn repository() -> TypeDescriptor {
        TypeDescriptor::builder("Repository").default_constructor::<Repository>()
    }

    fn service() -> TypeDescriptor {
        TypeDescriptor::builder("Service")
            .untyped("retries")
            .parameter("repository", "Repository")
            .constructor(|args| {
                Ok(Service {
                    repository: args.take()?,
                    retries: 3,
                })
            })
    }

    fn container() -> Container {
        Container::builder()
            .discover(false)
            .descriptor(repository())
            .descriptor(service())
            .build()
    }

    #[test]
    fn unbound_type_is_built_fresh_each_time() {
        let container = container();

        let a = container.get("Repository").unwrap().unwrap();
        let b = container.get("Repository").unwrap().unwrap();

        assert!(a.is::<Repository>());
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn factory_result_is_returned_as_is() {
        let sentinel = Arc::new(Sentinel);
        let mut container = container();
        container.bind_factory("Logger", {
            let sentinel = sentinel.clone();
            move || Some(Instance::from_arc(sentinel.clone()))
        });

        let logger: Arc<Sentinel> = container.resolve("Logger").unwrap();
        assert!(Arc::ptr_eq(&logger, &sentinel));
    }

    #[test]
    fn factory_invoked_once_per_get() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut container = container();
        container.bind_factory("counter", {
            let calls = calls.clone();
            move || Some(Instance::new(calls.fetch_add(1, Ordering::SeqCst)))
        });

        for _ in 0..3 {
            container.get("counter").unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn constructor_dependencies_are_resolved() {
        let container = container();

        let service: Arc<Service> = container.resolve("Service").unwrap();
        assert_eq!(service.retries, 3);

        let again: Arc<Service> = container.resolve("Service").unwrap();
        assert!(!Arc::ptr_eq(&service.repository, &again.repository));
    }

    #[test]
    fn alias_behaves_like_target() {
        let mut container = container();
        container.bind("storage", "Repository");

        let instance = container.get("storage").unwrap().unwrap();
        assert!(instance.is::<Repository>());
        assert!(container.has("storage").unwrap());
    }

    #[test]
    fn aliases_are_followed_one_level() {
        let mut container = container();
        container
            .bind("outer", "inner")
            .bind_factory("inner", || Some(Instance::new(1u8)));

        let err = container.get("outer").unwrap_err();
        assert_eq!(err.code(), "unknown_type");
    }

    #[test]
    fn self_binding_is_recorded_and_harmless() {
        let mut container = container();
        container.bind_self("Repository");

        assert!(container.bindings()["Repository"].as_alias().is_some());
        assert!(container.get("Repository").unwrap().unwrap().is::<Repository>());
    }

    #[test]
    fn rebinding_keeps_latest() {
        let mut container = container();
        container
            .bind_factory("X", || Some(Instance::new(1u32)))
            .bind_factory("X", || Some(Instance::new(2u32)));

        assert_eq!(*container.resolve::<u32>("X").unwrap(), 2);
        assert_eq!(container.bindings().len(), 1);
    }

    #[test]
    fn unknown_type_fails_resolution() {
        let container = container();

        match container.get("NonexistentType").unwrap_err() {
            ContainerError::Resolution(err) => {
                assert_eq!(err.identifier, "NonexistentType");
            }
            other => panic!("Expected Resolution, got: {other:?}"),
        }

        let err = container.has("NonexistentType").unwrap_err();
        assert!(matches!(err.inner(), ContainerError::Resolution(_)));
        assert_eq!(err.code(), "unknown_type");
    }

    #[test]
    fn missing_dependency_names_requirer() {
        let container = Container::builder()
            .discover(false)
            .descriptor(service())
            .build();

        match container.get("Service").unwrap_err() {
            ContainerError::Resolution(err) => {
                assert_eq!(err.identifier, "Repository");
                assert_eq!(err.required_by, Some(Identifier::from("Service")));
            }
            other => panic!("Expected Resolution, got: {other:?}"),
        }
    }

    #[test]
    fn suggestions_for_typos() {
        let container = container();

        match container.get("Repositry").unwrap_err() {
            ContainerError::Resolution(err) => {
                assert_eq!(err.suggestions, ["Repository"]);
            }
            other => panic!("Expected Resolution, got: {other:?}"),
        }
    }

    #[test]
    fn failing_factory_is_a_resolution_error() {
        let mut container = container();
        container.bind_fallible("Config", || Err("config file missing".into()));

        let err = container.get("Config").unwrap_err();
        assert_eq!(err.code(), "factory_failed");
        assert!(err.to_string().contains("config file missing"));
        assert!(container.has("Config").is_err());
    }

    #[test]
    fn has_reports_answerability() {
        let mut container = container();
        container
            .register_descriptor(TypeDescriptor::interface("Logger"))
            .bind_factory("nothing", || None);

        assert!(container.has("Service").unwrap());
        assert!(!container.has("Logger").unwrap());
        assert!(!container.has("nothing").unwrap());

        container.bind_factory("Logger", || Some(Instance::new(Sentinel)));
        assert!(container.has("Logger").unwrap());
    }

    #[test]
    fn has_does_not_build_dependencies() {
        let container = Container::builder()
            .discover(false)
            .descriptor(service())
            .build();

        // Service is instantiable in itself; its missing Repository only
        // shows once something tries to build it.
        assert!(container.has("Service").unwrap());
        assert_eq!(container.get("Service").unwrap_err().code(), "unknown_type");
    }

    #[test]
    fn interface_cannot_be_built() {
        let mut container = container();
        container.register_descriptor(TypeDescriptor::interface("Logger"));

        let err = container.get("Logger").unwrap_err();
        assert!(matches!(err, ContainerError::NotInstantiable { .. }));
    }

    #[test]
    fn null_factory_result() {
        let mut container = container();
        container.bind_factory("maybe", || None);

        assert!(container.get("maybe").unwrap().is_none());
        assert!(matches!(
            container.resolve::<u8>("maybe"),
            Err(ContainerError::NullInstance { .. })
        ));
    }

    #[test]
    fn wrong_type_requested() {
        let container = container();
        match container.resolve::<Service>("Repository") {
            Err(ContainerError::TypeMismatch { actual, .. }) => {
                assert!(actual.ends_with("Repository"));
            }
            Err(other) => panic!("Expected TypeMismatch, got: {other:?}"),
            Ok(_) => panic!("Expected TypeMismatch, got a Service"),
        }
    }

    #[test]
    fn untyped_parameters_can_be_rejected() {
        let container = Container::builder()
            .discover(false)
            .untyped_parameters(UntypedParameterPolicy::Reject)
            .descriptor(repository())
            .descriptor(service())
            .build();

        match container.get("Service").unwrap_err() {
            ContainerError::UntypedParameter { parameter, .. } => assert_eq!(parameter, "retries"),
            other => panic!("Expected UntypedParameter, got: {other:?}"),
        }
    }

    #[test]
    fn cycle_is_detected() {
        struct A;
        struct B;

        let container = Container::builder()
            .discover(false)
            .descriptor(
                TypeDescriptor::builder("A")
                    .parameter("b", "B")
                    .constructor(|_| Ok(A)),
            )
            .descriptor(
                TypeDescriptor::builder("B")
                    .parameter("a", "A")
                    .constructor(|_| Ok(B)),
            )
            .build();

        match container.get("A").unwrap_err() {
            ContainerError::CyclicDependency(err) => {
                let chain: Vec<_> = err.chain.iter().map(Identifier::as_str).collect();
                assert_eq!(chain, ["A", "B", "A"]);
            }
            other => panic!("Expected CyclicDependency, got: {other:?}"),
        }
    }

    #[test]
    fn factory_breaks_cycle() {
        struct A;
        struct B;

        let mut container = Container::builder()
            .discover(false)
            .descriptor(
                TypeDescriptor::builder("A")
                    .parameter("b", "B")
                    .constructor(|_| Ok(A)),
            )
            .descriptor(
                TypeDescriptor::builder("B")
                    .parameter("a", "A")
                    .constructor(|_| Ok(B)),
            )
            .build();
        container.bind_factory("B", || Some(Instance::new(B)));

        assert!(container.get("A").unwrap().unwrap().is::<A>());
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        struct Top;
        struct Left;
        struct Right;

        let container = Container::builder()
            .discover(false)
            .descriptor(repository())
            .descriptor(
                TypeDescriptor::builder("Left")
                    .parameter("repository", "Repository")
                    .constructor(|_| Ok(Left)),
            )
            .descriptor(
                TypeDescriptor::builder("Right")
                    .parameter("repository", "Repository")
                    .constructor(|_| Ok(Right)),
            )
            .descriptor(
                TypeDescriptor::builder("Top")
                    .parameter("left", "Left")
                    .parameter("right", "Right")
                    .constructor(|_| Ok(Top)),
            )
            .build();

        assert!(container.get("Top").unwrap().unwrap().is::<Top>());
    }

    #[test]
    fn get_binding_invokes_factory() {
        let mut container = container();
        container.bind_factory("port", || Some(Instance::new(8080u16)));

        let port = container.get_binding("port").unwrap().unwrap();
        assert_eq!(port.downcast_ref::<u16>(), Some(&8080));
    }

    #[test]
    fn get_binding_constructs_alias_without_arguments() {
        let mut container = container();
        container.bind("storage", "Repository").bind("app", "Service");

        assert!(container.get_binding("storage").unwrap().unwrap().is::<Repository>());
        assert!(matches!(
            container.get_binding("app"),
            Err(ContainerError::ArgumentCount { required: 2, .. })
        ));
        assert!(matches!(
            container.get_binding("missing"),
            Err(ContainerError::Unbound { .. })
        ));
    }

    #[test]
    fn resolved_is_pending_for_types() {
        let mut container = container();
        container.bind_factory("value", || Some(Instance::new(1u8)));

        assert!(matches!(container.resolved("Service"), Ok(Resolved::Pending(d)) if d.identifier() == "Service"));
        assert!(matches!(container.resolved("value"), Ok(Resolved::Instance(Some(_)))));
    }

    #[test]
    fn instantiate_descriptor_directly() {
        let container = container();
        let instance = container.instantiate(&service()).unwrap();
        assert!(instance.is::<Service>());
    }

    #[test]
    fn debug_display() {
        let mut container = container();
        container.bind_self("Repository");

        let debug = format!("{container:?}");
        assert!(debug.contains("Container"));
        assert!(debug.contains("described: 2"));
        assert!(debug.contains("bindings: 1"));
    }
}
