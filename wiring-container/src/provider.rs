//! Providers: reusable groups of bindings and descriptors.
//!
//! # Examples
//! ```rust
//! use wiring_container::prelude::*;
//!
//! struct SettingsProvider;
//!
//! impl Provider for SettingsProvider {
//!     fn register(&self, container: &mut Container) {
//!         container
//!             .bind_factory("http.port", || Some(Instance::new(8080u16)))
//!             .bind_factory("http.host", || Some(Instance::new(String::from("localhost"))));
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.add_provider(&SettingsProvider);
//! assert!(container.has("http.port").unwrap());
//! ```

use crate::container::Container;

/// A module that installs related bindings into a container.
///
/// Split registrations by concern (persistence, HTTP, mail, ...) and
/// install each provider with
/// [`Container::add_provider`](crate::container::Container::add_provider)
/// or [`ContainerBuilder::provider`](crate::container::ContainerBuilder::provider).
pub trait Provider: Send + Sync {
    /// Adds bindings and descriptors. Called once per installation.
    fn register(&self, container: &mut Container);

    /// Human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeDescriptor;
    use crate::instance::Instance;

    #[derive(Default)]
    struct DiskStorage;

    struct StorageProvider;

    impl Provider for StorageProvider {
        fn register(&self, container: &mut Container) {
            container
                .register_descriptor(
                    TypeDescriptor::builder("DiskStorage").default_constructor::<DiskStorage>(),
                )
                .bind("Storage", "DiskStorage")
                .bind_factory("storage.root", || Some(Instance::new(String::from("/var/data"))));
        }
    }

    #[test]
    fn provider_installs_bindings() {
        let mut container = Container::builder().discover(false).build();
        container.add_provider(&StorageProvider);

        assert_eq!(container.bindings().len(), 2);
        assert!(container.get("Storage").unwrap().unwrap().is::<DiskStorage>());
    }

    #[test]
    fn builder_installs_providers() {
        let container = Container::builder()
            .discover(false)
            .provider(StorageProvider)
            .build();

        assert!(container.has("storage.root").unwrap());
    }

    #[test]
    fn provider_has_name() {
        assert!(StorageProvider.name().contains("StorageProvider"));
    }
}
