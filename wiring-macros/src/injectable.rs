//! `#[derive(Injectable)]` implementation.

use darling::ast::{Data, Style};
use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, Ident, Type};

#[derive(FromDeriveInput)]
#[darling(attributes(injectable), supports(struct_any))]
struct InjectableInput {
    ident: Ident,
    generics: Generics,
    data: Data<(), InjectField>,
    #[darling(default)]
    no_register: bool,
    /// Interface the type is handed out as, e.g. `"dyn Logger"`.
    #[darling(default)]
    provides: Option<Type>,
}

#[derive(FromField)]
#[darling(attributes(inject))]
struct InjectField {
    ident: Option<Ident>,
    ty: Type,
    #[darling(default)]
    skip: bool,
    #[darling(default)]
    name: Option<String>,
}

pub fn expand(input: &DeriveInput) -> darling::Result<TokenStream> {
    let input = InjectableInput::from_derive_input(input)?;
    let ident = &input.ident;
    let fields = input
        .data
        .take_struct()
        .ok_or_else(|| darling::Error::unsupported_shape("enum").with_span(ident))?;

    let mut errors = darling::Error::accumulator();
    let mut parameters = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());

    for (position, field) in fields.iter().enumerate() {
        let parameter = match &field.ident {
            Some(ident) => ident.to_string(),
            None => position.to_string(),
        };
        let ty = &field.ty;

        if field.skip && field.name.is_some() {
            errors.push(
                darling::Error::custom("`skip` and `name` cannot be combined").with_span(ty),
            );
            continue;
        }

        parameters.push(match (&field.name, field.skip) {
            (_, true) => quote! { .untyped(#parameter) },
            (Some(name), false) => quote! { .parameter(#parameter, #name) },
            (None, false) => quote! { .dependency::<#ty>(#parameter) },
        });

        values.push(if field.skip {
            quote! { ::core::default::Default::default() }
        } else {
            quote! { _arguments.take_dependency::<#ty>()? }
        });
    }
    errors.finish()?;

    let construct = match fields.style {
        Style::Struct => {
            let names = fields.iter().map(|f| &f.ident);
            quote! { Self { #(#names: #values),* } }
        }
        Style::Tuple => quote! { Self(#(#values),*) },
        Style::Unit => quote! { Self },
    };

    let constructor = match &input.provides {
        Some(provides) => quote! {
            .shared_constructor(|_arguments: &mut ::wiring::Arguments| {
                let value: ::std::sync::Arc<#provides> = ::std::sync::Arc::new(#construct);
                ::core::result::Result::<_, ::wiring::BoxError>::Ok(value)
            })
        },
        None => quote! {
            .constructor(|_arguments: &mut ::wiring::Arguments| {
                ::core::result::Result::<Self, ::wiring::BoxError>::Ok(#construct)
            })
        },
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let registration = if input.no_register || !input.generics.params.is_empty() {
        quote! {}
    } else {
        quote! {
            ::wiring::__private::inventory::submit! {
                ::wiring::__private::DescriptorRegistration::new(
                    <#ident as ::wiring::Injectable>::descriptor
                )
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::wiring::Injectable for #ident #ty_generics #where_clause {
            fn descriptor() -> ::wiring::TypeDescriptor {
                ::wiring::TypeDescriptor::builder(::wiring::Identifier::of::<Self>())
                    #(#parameters)*
                    #constructor
            }
        }

        #registration
    })
}
