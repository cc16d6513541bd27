//! Procedural macros for wiring.
//!
//! * `#[derive(Injectable)]` - describes a struct's constructor so the
//!   container can build it

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod injectable;

/// Derives `wiring::Injectable` for a struct.
///
/// Every field becomes a constructor parameter, in declaration order.
/// The parameter's declared type comes from the field's type through
/// `wiring::Dependency` (`Arc<T>` or `Option<Arc<T>>`).
///
/// Attributes:
/// * `#[inject(skip)]` - untyped parameter, filled with `Default::default()`
/// * `#[inject(name = "...")]` - resolve this identifier instead of the field's type
/// * `#[injectable(no_register)]` - do not register the type for discovery
/// * `#[injectable(provides = "dyn Trait")]` - build the value as
///   `Arc<dyn Trait>`, so it can stand behind a binding whose consumers
///   take `Arc<dyn Trait>` (it is then no longer available as `Arc<Self>`)
///
/// ```ignore
/// #[derive(Injectable)]
/// struct Service {
///     repository: Arc<Repository>,
///     #[inject(name = "app.config")]
///     config: Arc<Config>,
///     #[inject(skip)]
///     retries: u32,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(injectable, inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::expand(&input)
        .unwrap_or_else(darling::Error::write_errors)
        .into()
}
