//! Core container implementation for wiring.

pub mod catalog;
pub mod container;
pub mod descriptor;
pub mod error;
mod graph;
pub mod identifier;
pub mod instance;
pub mod provider;
pub mod registry;
pub mod settings;

pub use catalog::TypeCatalog;
pub use container::{Container, ContainerBuilder, Resolved, prelude};
pub use descriptor::{
    ArgumentError, Arguments, Dependency, DescriptorRegistration, Injectable, Parameter,
    TypeDescriptor,
};
pub use error::{
    BoxError, ContainerError, CyclicDependencyError, EntryNotFoundError, ResolutionCause,
    ResolutionError, Result,
};
pub use identifier::Identifier;
pub use instance::Instance;
pub use provider::Provider;
pub use registry::{BindingSource, FactoryFn};
pub use settings::{ContainerSettings, UntypedParameterPolicy};
