//! Type descriptors: the static stand-in for constructor reflection.
//!
//! A [`TypeDescriptor`] tells the container what a type's constructor
//! needs (an ordered parameter list, each with an optional declared type)
//! and how to call it. Descriptors come from the [`Injectable`] trait,
//! usually derived, or are assembled by hand with
//! [`TypeDescriptor::builder`].
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//! use wiring_container::descriptor::TypeDescriptor;
//!
//! struct Repository;
//! struct Service {
//!     repository: Arc<Repository>,
//!     retries: u32,
//! }
//!
//! let descriptor = TypeDescriptor::builder("Service")
//!     .parameter("repository", "Repository")
//!     .untyped("retries")
//!     .constructor(|args| {
//!         Ok(Service {
//!             repository: args.take::<Repository>()?,
//!             retries: 3,
//!         })
//!     });
//!
//! assert!(descriptor.is_instantiable());
//! assert_eq!(descriptor.parameters().len(), 2);
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, ContainerError, Result};
use crate::identifier::Identifier;
use crate::instance::Instance;

/// Constructor function stored in a descriptor.
///
/// Receives only the values of typed parameters, in declaration order.
pub type ConstructorFn = Arc<dyn Fn(&mut Arguments) -> std::result::Result<Instance, BoxError> + Send + Sync>;

/// A type the container can describe and build.
///
/// Usually derived with `#[derive(Injectable)]`. A hand-written
/// descriptor should use `Identifier::of::<Self>()` as its identifier so
/// that `Arc<Self>` parameters find it.
pub trait Injectable: Send + Sync + Sized + 'static {
    fn descriptor() -> TypeDescriptor;
}

/// A constructor parameter type the container knows how to fill.
///
/// `Arc<T>` requires a value; `Option<Arc<T>>` also accepts a factory
/// that produced nothing. `T` may be a trait object such as
/// `dyn Logger`, in which case the value must have been produced as
/// `Arc<dyn Logger>` (see [`DescriptorBuilder::shared_constructor`]).
pub trait Dependency: Sized {
    /// Identifier resolved for this parameter.
    fn declared_type() -> Identifier;

    /// Turns the resolved value into the parameter type.
    fn from_argument(
        parameter: &str,
        value: Option<Instance>,
    ) -> std::result::Result<Self, ArgumentError>;
}

impl<T: ?Sized + Send + Sync + 'static> Dependency for Arc<T> {
    fn declared_type() -> Identifier {
        Identifier::of::<T>()
    }

    fn from_argument(
        parameter: &str,
        value: Option<Instance>,
    ) -> std::result::Result<Self, ArgumentError> {
        let value = value.ok_or_else(|| ArgumentError::Null {
            parameter: parameter.to_string(),
        })?;
        downcast_argument(parameter, value)
    }
}

impl<T: ?Sized + Send + Sync + 'static> Dependency for Option<Arc<T>> {
    fn declared_type() -> Identifier {
        Identifier::of::<T>()
    }

    fn from_argument(
        parameter: &str,
        value: Option<Instance>,
    ) -> std::result::Result<Self, ArgumentError> {
        value
            .map(|value| downcast_argument(parameter, value))
            .transpose()
    }
}

fn downcast_argument<T: ?Sized + Send + Sync + 'static>(
    parameter: &str,
    value: Instance,
) -> std::result::Result<Arc<T>, ArgumentError> {
    value.downcast::<T>().map_err(|actual| ArgumentError::Mismatch {
        parameter: parameter.to_string(),
        expected: type_name::<T>(),
        actual: actual.type_name(),
    })
}

/// One constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    declared_type: Option<Identifier>,
}

impl Parameter {
    /// A parameter the container resolves through `declared_type`.
    pub fn typed(name: impl Into<String>, declared_type: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type.into()),
        }
    }

    /// A parameter without a declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> Option<&Identifier> {
        self.declared_type.as_ref()
    }
}

/// Describes how to construct one type.
///
/// Cloning is cheap; the constructor is shared.
#[derive(Clone)]
pub struct TypeDescriptor {
    identifier: Identifier,
    parameters: Vec<Parameter>,
    constructor: Option<ConstructorFn>,
}

impl TypeDescriptor {
    /// Starts describing a concrete type.
    pub fn builder(identifier: impl Into<Identifier>) -> DescriptorBuilder {
        DescriptorBuilder {
            identifier: identifier.into(),
            parameters: Vec::new(),
        }
    }

    /// Describes an abstract, interface-like type.
    ///
    /// It can be bound, but never instantiated directly.
    pub fn interface(identifier: impl Into<Identifier>) -> Self {
        Self {
            identifier: identifier.into(),
            parameters: Vec::new(),
            constructor: None,
        }
    }

    /// Descriptor of an [`Injectable`] type.
    pub fn of<T: Injectable>() -> Self {
        T::descriptor()
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Constructor parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// `false` for interfaces.
    pub fn is_instantiable(&self) -> bool {
        self.constructor.is_some()
    }

    /// Calls the constructor with already resolved arguments.
    ///
    /// # Errors
    /// - [`ContainerError::NotInstantiable`] for interfaces
    /// - [`ContainerError::ConstructionFailed`] when the constructor fails
    pub fn construct(&self, arguments: &mut Arguments) -> Result<Instance> {
        let constructor = self
            .constructor
            .as_ref()
            .ok_or_else(|| ContainerError::NotInstantiable {
                identifier: self.identifier.clone(),
            })?;

        constructor(arguments).map_err(|source| ContainerError::ConstructionFailed {
            identifier: self.identifier.clone(),
            source,
        })
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("identifier", &self.identifier)
            .field("parameters", &self.parameters)
            .field("instantiable", &self.is_instantiable())
            .finish()
    }
}

/// Builds a concrete [`TypeDescriptor`].
#[derive(Debug)]
pub struct DescriptorBuilder {
    identifier: Identifier,
    parameters: Vec<Parameter>,
}

impl DescriptorBuilder {
    /// Adds a parameter resolved through `declared_type`.
    pub fn parameter(
        mut self,
        name: impl Into<String>,
        declared_type: impl Into<Identifier>,
    ) -> Self {
        self.parameters.push(Parameter::typed(name, declared_type));
        self
    }

    /// Adds a parameter whose declared type comes from its Rust type.
    pub fn dependency<D: Dependency>(self, name: impl Into<String>) -> Self {
        self.parameter(name, D::declared_type())
    }

    /// Adds a parameter without a declared type.
    pub fn untyped(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::untyped(name));
        self
    }

    /// Finishes the descriptor with its constructor.
    pub fn constructor<T, F>(self, constructor: F) -> TypeDescriptor
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Arguments) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        TypeDescriptor {
            identifier: self.identifier,
            parameters: self.parameters,
            constructor: Some(Arc::new(move |arguments: &mut Arguments| {
                constructor(arguments).map(Instance::new)
            })),
        }
    }

    /// Finishes the descriptor with a constructor that hands out its value
    /// as a shared `Arc<U>`.
    ///
    /// This is how an implementation serves an interface: a constructor
    /// returning `Arc<dyn Logger>` can stand behind any binding whose
    /// consumers take `Arc<dyn Logger>`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use wiring_container::descriptor::TypeDescriptor;
    ///
    /// trait Logger: Send + Sync {}
    /// struct ConsoleLogger;
    /// impl Logger for ConsoleLogger {}
    ///
    /// let descriptor = TypeDescriptor::builder("ConsoleLogger")
    ///     .shared_constructor(|_| Ok(Arc::new(ConsoleLogger) as Arc<dyn Logger>));
    /// assert!(descriptor.is_instantiable());
    /// ```
    pub fn shared_constructor<U, F>(self, constructor: F) -> TypeDescriptor
    where
        U: ?Sized + Send + Sync + 'static,
        F: Fn(&mut Arguments) -> std::result::Result<Arc<U>, BoxError> + Send + Sync + 'static,
    {
        TypeDescriptor {
            identifier: self.identifier,
            parameters: self.parameters,
            constructor: Some(Arc::new(move |arguments: &mut Arguments| {
                constructor(arguments).map(Instance::from_arc)
            })),
        }
    }

    /// Finishes the descriptor with `T::default()` as its constructor.
    pub fn default_constructor<T: Default + Send + Sync + 'static>(self) -> TypeDescriptor {
        self.constructor(|_| Ok(T::default()))
    }
}

/// Reasons a constructor could not use its arguments.
#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    #[error("constructor asked for more than the {supplied} argument(s) supplied")]
    Exhausted { supplied: usize },

    #[error("argument `{parameter}` resolved to no instance")]
    Null { parameter: String },

    #[error("argument `{parameter}` holds {actual}, expected {expected}")]
    Mismatch {
        parameter: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Ordered arguments for one constructor call.
///
/// Holds one entry per typed parameter. Each `take*` call consumes the
/// next entry.
#[derive(Debug, Default)]
pub struct Arguments {
    values: Vec<(String, Option<Instance>)>,
    cursor: usize,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the value resolved for `parameter`.
    pub fn push(&mut self, parameter: impl Into<String>, value: Option<Instance>) {
        self.values.push((parameter.into(), value));
    }

    /// Number of arguments supplied, taken or not.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Takes the next raw value.
    pub fn next_instance(&mut self) -> std::result::Result<(String, Option<Instance>), ArgumentError> {
        let (name, value) = self
            .values
            .get(self.cursor)
            .cloned()
            .ok_or(ArgumentError::Exhausted {
                supplied: self.values.len(),
            })?;
        self.cursor += 1;
        Ok((name, value))
    }

    /// Takes the next value as `Arc<T>`; it must be present.
    pub fn take<T: ?Sized + Send + Sync + 'static>(&mut self) -> std::result::Result<Arc<T>, ArgumentError> {
        self.take_dependency::<Arc<T>>()
    }

    /// Takes the next value as `Arc<T>`, accepting "no instance".
    pub fn take_optional<T: ?Sized + Send + Sync + 'static>(
        &mut self,
    ) -> std::result::Result<Option<Arc<T>>, ArgumentError> {
        self.take_dependency::<Option<Arc<T>>>()
    }

    /// Takes the next value as any [`Dependency`].
    pub fn take_dependency<D: Dependency>(&mut self) -> std::result::Result<D, ArgumentError> {
        let (name, value) = self.next_instance()?;
        D::from_argument(&name, value)
    }
}

/// Compile-time registration of a descriptor, collected with `inventory`.
///
/// `#[derive(Injectable)]` submits one of these for every non-generic
/// type so containers can discover it without explicit registration.
pub struct DescriptorRegistration {
    describe: fn() -> TypeDescriptor,
}

impl DescriptorRegistration {
    pub const fn new(describe: fn() -> TypeDescriptor) -> Self {
        Self { describe }
    }

    pub fn describe(&self) -> TypeDescriptor {
        (self.describe)()
    }
}

inventory::collect!(DescriptorRegistration);
