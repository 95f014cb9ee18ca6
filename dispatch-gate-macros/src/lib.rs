//! Procedural macros for dispatch-gate

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Name reported by `Action::name()`, overriding the variant name
    #[darling(default)]
    name: Option<String>,
}

impl ActionVariant {
    fn pattern(&self, enum_name: &syn::Ident) -> TokenStream2 {
        let variant = &self.ident;
        match &self.fields.style {
            darling::ast::Style::Unit => quote! { #enum_name::#variant },
            darling::ast::Style::Tuple => quote! { #enum_name::#variant(..) },
            darling::ast::Style::Struct => quote! { #enum_name::#variant { .. } },
        }
    }

    fn action_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.ident.to_string())
    }
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static
/// string. `#[action(name = "...")]` on a variant overrides the reported name.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum TodoAction {
///     Fetch,
///     #[action(name = "PageOpen")]
///     Open { page: u32 },
/// }
///
/// assert_eq!(TodoAction::Fetch.name(), "Fetch");
/// assert_eq!(TodoAction::Open { page: 1 }.name(), "PageOpen");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    if variants.is_empty() {
        return syn::Error::new_spanned(&input, "Action cannot be derived for an empty enum")
            .to_compile_error()
            .into();
    }

    let name_arms = variants.iter().map(|v| {
        let pattern = v.pattern(name);
        let action_name = v.action_name();
        quote! { #pattern => #action_name }
    });

    let expanded = quote! {
        impl #impl_generics dispatch_gate::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
