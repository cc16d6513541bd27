//! Dependency graph validation.
//!
//! Walks what the container *would* build, without building it:
//! - every declared parameter type resolves to a factory or a descriptor
//! - no type depends on itself, directly or not
//! - every required dependency is instantiable
//! - untyped parameters are absent when they are rejected
//!
//! Resolution rules are the same as at runtime: factory bindings are
//! leaves and aliases are followed one level.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::catalog::TypeCatalog;
use crate::container::suggestions;
use crate::descriptor::TypeDescriptor;
use crate::error::{ContainerError, CyclicDependencyError, ResolutionError};
use crate::identifier::Identifier;
use crate::registry::{BindingRegistry, BindingSource};
use crate::settings::{ContainerSettings, UntypedParameterPolicy};

/// Where an identifier leads.
enum Target<'a> {
    /// A factory; nothing further to check.
    Factory,
    Type(&'a TypeDescriptor),
}

/// Depth-first validator over bindings and descriptors.
pub(crate) struct GraphValidator<'a> {
    bindings: &'a BindingRegistry,
    catalog: &'a TypeCatalog,
    settings: &'a ContainerSettings,
    /// Currently being visited (for cycle detection)
    visiting: HashSet<Identifier>,
    /// Already validated
    validated: HashSet<Identifier>,
    /// Current DFS path (for error reporting)
    path: Vec<Identifier>,
}

impl<'a> GraphValidator<'a> {
    pub fn new(
        bindings: &'a BindingRegistry,
        catalog: &'a TypeCatalog,
        settings: &'a ContainerSettings,
    ) -> Self {
        Self {
            bindings,
            catalog,
            settings,
            visiting: HashSet::new(),
            validated: HashSet::new(),
            path: Vec::new(),
        }
    }

    /// Validates everything reachable from the bindings and the catalog.
    ///
    /// Abstract types are fine as roots; they only fail when something
    /// needs them built.
    #[instrument(skip(self), name = "graph_validation")]
    pub fn validate(&mut self) -> Result<(), ContainerError> {
        let (bindings, catalog) = (self.bindings, self.catalog);
        let roots: Vec<&'a Identifier> = bindings
            .identifiers()
            .chain(catalog.identifiers())
            .collect();

        debug!(roots = roots.len(), "Validating dependency graph");

        for root in roots {
            if let Target::Type(descriptor) = self.target(root.as_str())? {
                if descriptor.is_instantiable() {
                    self.visit(descriptor)?;
                }
            }
        }

        debug!("Dependency graph is valid");
        Ok(())
    }

    fn target(&self, identifier: &str) -> Result<Target<'a>, ContainerError> {
        let mut name = identifier;

        if let Some(source) = self.bindings.get(identifier) {
            match source {
                BindingSource::Factory(_) => return Ok(Target::Factory),
                BindingSource::Alias(target) => name = target.as_str(),
            }
        }

        let catalog = self.catalog;
        catalog.describe(name).map(Target::Type).ok_or_else(|| {
            let mut err = ResolutionError::unknown_type(identifier, name)
                .with_suggestions(suggestions(self.bindings, catalog, name));
            err.required_by = self.path.last().cloned();
            ContainerError::Resolution(err)
        })
    }

    fn visit(&mut self, descriptor: &'a TypeDescriptor) -> Result<(), ContainerError> {
        let identifier = descriptor.identifier();

        if self.validated.contains(identifier) {
            return Ok(());
        }

        if self.visiting.contains(identifier) {
            let start = self
                .path
                .iter()
                .position(|entered| entered == identifier)
                .unwrap_or(0);

            let mut chain = self.path[start..].to_vec();
            chain.push(identifier.clone());

            warn!(cycle = ?chain, "Circular dependency detected");
            return Err(ContainerError::CyclicDependency(CyclicDependencyError { chain }));
        }

        self.visiting.insert(identifier.clone());
        self.path.push(identifier.clone());

        for parameter in descriptor.parameters() {
            let Some(declared) = parameter.declared_type() else {
                if self.settings.untyped_parameters == UntypedParameterPolicy::Reject {
                    return Err(ContainerError::UntypedParameter {
                        identifier: identifier.clone(),
                        parameter: parameter.name().to_string(),
                    });
                }
                continue;
            };

            if let Target::Type(dependency) = self.target(declared.as_str())? {
                if !dependency.is_instantiable() {
                    return Err(ContainerError::NotInstantiable {
                        identifier: dependency.identifier().clone(),
                    });
                }
                self.visit(dependency)?;
            }
        }

        self.path.pop();
        self.visiting.remove(identifier);
        self.validated.insert(identifier.clone());

        Ok(())
    }
}
