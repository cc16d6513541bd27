//! Type-erased values handed out by the container.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// A resolved value.
///
/// Holds an `Arc<T>` behind `dyn Any`, together with the name of `T` so
/// that downcast failures can say what was actually produced. `T` may be
/// unsized: an `Arc<dyn Logger>` goes in and comes back out as itself,
/// whatever concrete type sits behind it.
/// Cloning an [`Instance`] shares the value; the container itself never
/// clones one to serve a later request.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use wiring_container::instance::Instance;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".into()
///     }
/// }
///
/// let instance = Instance::new(42u32);
/// assert_eq!(instance.downcast_ref::<u32>(), Some(&42));
/// assert!(instance.downcast::<String>().is_err());
///
/// let greeter = Instance::from_arc(Arc::new(English) as Arc<dyn Greeter>);
/// assert_eq!(greeter.downcast::<dyn Greeter>().unwrap().greet(), "hello");
/// ```
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    /// Wraps an owned value.
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value, sized or not.
    ///
    /// Downcasting the result to `T` yields the very same `Arc`, which is
    /// what factories returning a fixed object rely on.
    pub fn from_arc<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the type held.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn is<T: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.value.is::<Arc<T>>()
    }

    pub fn downcast_ref<T: ?Sized + Send + Sync + 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<Arc<T>>().map(|value| &**value)
    }

    /// Recovers the typed `Arc`, or gives the instance back on mismatch.
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(self) -> Result<Arc<T>, Instance> {
        if let Some(value) = self.value.downcast_ref::<Arc<T>>() {
            return Ok(Arc::clone(value));
        }
        Err(self)
    }

    /// Whether both handles point at the same value.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sentinel;

    #[test]
    fn from_arc_keeps_identity() {
        let shared = Arc::new(Sentinel);
        let instance = Instance::from_arc(shared.clone());
        let back = instance.downcast::<Sentinel>().unwrap();
        assert!(Arc::ptr_eq(&shared, &back));
    }

    #[test]
    fn mismatch_returns_instance() {
        let instance = Instance::new(String::from("x"));
        let back = instance.downcast::<u8>().unwrap_err();
        assert_eq!(back.type_name(), "alloc::string::String");
        assert!(back.is::<String>());
    }

    #[test]
    fn clones_share_value() {
        let a = Instance::new(1i64);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Instance::new(1i64)));
    }

    trait Named: Send + Sync {
        fn name(&self) -> &'static str;
    }

    impl Named for Sentinel {
        fn name(&self) -> &'static str {
            "sentinel"
        }
    }

    #[test]
    fn trait_objects_round_trip() {
        let shared: Arc<dyn Named> = Arc::new(Sentinel);
        let instance = Instance::from_arc(shared.clone());

        assert!(instance.is::<dyn Named>());
        assert!(!instance.is::<Sentinel>());
        assert_eq!(instance.downcast_ref::<dyn Named>().map(|named| named.name()), Some("sentinel"));

        let back = instance.downcast::<dyn Named>().unwrap();
        assert!(Arc::ptr_eq(&shared, &back));
    }

    #[test]
    fn debug_shows_type() {
        let debug = format!("{:?}", Instance::new(Sentinel));
        assert!(debug.contains("Sentinel"));
    }
}
