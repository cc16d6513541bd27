//! # wiring: constructor-injection container for Rust
//!
//! Ask for a type by name and get a freshly built instance, with every
//! constructor dependency resolved the same way. Bindings override the
//! lookup: bind a name to a factory to hand out exact values, or to
//! another type name to substitute an implementation.
//!
//! ```rust
//! use std::sync::Arc;
//! use wiring::prelude::*;
//!
//! #[derive(Injectable)]
//! struct Repository;
//!
//! #[derive(Injectable)]
//! struct Service {
//!     repository: Arc<Repository>,
//! }
//!
//! let container = Container::new();
//! let service: Arc<Service> = container.make().unwrap();
//! let _repository: &Repository = &service.repository;
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

pub use wiring_container::*;
pub use wiring_macros::Injectable;
pub use wiring_support::rendering;

/// A container shared between threads.
///
/// The container does no locking of its own; this lock admits one
/// binder at a time and keeps resolvers out while it binds.
pub type SharedContainer = Arc<RwLock<Container>>;

/// Moves a container behind a [`SharedContainer`] lock.
pub trait IntoShared {
    fn into_shared(self) -> SharedContainer;
}

impl IntoShared for Container {
    fn into_shared(self) -> SharedContainer {
        Arc::new(RwLock::new(self))
    }
}

pub mod prelude {
    pub use super::{IntoShared, SharedContainer};
    pub use wiring_container::prelude::*;
    pub use wiring_macros::Injectable;
}

#[doc(hidden)]
pub mod __private {
    pub use inventory;
    pub use wiring_container::descriptor::DescriptorRegistration;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn shared_container_serializes_binds_and_reads() {
        let shared = Container::builder().discover(false).build().into_shared();

        let writers: Vec<_> = (0..4u32)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .write()
                        .bind_factory(format!("worker.{i}"), move || Some(Instance::new(i)));
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let container = shared.read();
        assert_eq!(container.bindings().len(), 4);
        assert_eq!(*container.resolve::<u32>("worker.2").unwrap(), 2);
    }
}
