//! Identifiers naming resolvable entries.
//!
//! An [`Identifier`] is the key used by the binding registry and the
//! type catalog. It is usually a Rust type name, but the container never
//! interprets it: any string works, which is what lets bindings hand out
//! configuration values or aliases under arbitrary names.

use std::any::type_name;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Names a resolvable entry in the container.
///
/// Cloning is cheap (the text is shared).
///
/// # Examples
/// ```
/// use wiring_container::identifier::Identifier;
///
/// let id = Identifier::from("Logger");
/// assert_eq!(id.as_str(), "Logger");
///
/// let id = Identifier::of::<String>();
/// assert_eq!(id.as_str(), "alloc::string::String");
/// assert_eq!(id.short_name(), "String");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Arc<str>);

impl Identifier {
    /// Creates an identifier from any string.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Creates the identifier for type `T` from its type name.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Arc::from(type_name::<T>()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier with module paths stripped, for display.
    pub fn short_name(&self) -> String {
        wiring_support::rendering::short_name(&self.0)
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&Identifier> for Identifier {
    fn from(id: &Identifier) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
