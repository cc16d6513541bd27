//! The type catalog: which names the container can "introspect".
//!
//! A name resolves to a type only if the catalog holds a descriptor for
//! it. Descriptors registered at compile time (see
//! [`DescriptorRegistration`]) are gathered once per process and copied
//! into every catalog that asks for discovery.

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::descriptor::{DescriptorRegistration, TypeDescriptor};
use crate::identifier::Identifier;

static DISCOVERED: Lazy<Vec<TypeDescriptor>> = Lazy::new(|| {
    let descriptors: Vec<TypeDescriptor> = inventory::iter::<DescriptorRegistration>
        .into_iter()
        .map(DescriptorRegistration::describe)
        .collect();
    debug!(count = descriptors.len(), "Discovered registered descriptors");
    descriptors
});

/// Descriptors known to one container, keyed by identifier.
#[derive(Clone, Default)]
pub struct TypeCatalog {
    descriptors: IndexMap<Identifier, TypeDescriptor>,
}

impl TypeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding every compile-time registered descriptor.
    pub fn discovered() -> Self {
        let mut catalog = Self::new();
        for descriptor in DISCOVERED.iter() {
            catalog.insert(descriptor.clone());
        }
        catalog
    }

    /// Adds a descriptor, replacing one with the same identifier.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        trace!(identifier = %descriptor.identifier(), "Describing type");
        self.descriptors
            .insert(descriptor.identifier().clone(), descriptor)
    }

    /// Looks up the descriptor for `name`.
    pub fn describe(&self, name: &str) -> Option<&TypeDescriptor> {
        self.descriptors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.descriptors.keys()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.descriptors.values()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.descriptors.keys()).finish()
    }
}
