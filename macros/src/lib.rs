//! Derive macros for the Checklist reducer architecture
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Classifies action variants as commands or events
//!   and exposes variant names for logging
//! - `#[derive(State)]` - Generates a change counter for a `#[revision]` field
//!
//! # Example
//!
//! ```ignore
//! use checklist_macros::{Action, State};
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[command]
//!     AddTodo { title: String },
//!
//!     #[event]
//!     TodoAdded { id: u32, title: String },
//! }
//!
//! #[derive(State, Clone, Debug, Default)]
//! struct TodoState {
//!     titles: Vec<String>,
//!     #[revision]
//!     revision: u64,
//! }
//!
//! assert!(TodoAction::AddTodo { title: "test".into() }.is_command());
//! assert_eq!(TodoAction::TodoAdded { id: 0, title: "test".into() }.name(), "TodoAdded");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Variant, parse_macro_input};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_command()` - true for variants marked `#[command]`
/// - `is_event()` - true for variants marked `#[event]`
/// - `name()` - the variant name, for logs and diagnostics
///
/// Variants with neither attribute are neither commands nor events.
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]` attributes
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(&input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut command_arms = Vec::new();
    let mut event_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(variant, "Variant cannot be both #[command] and #[event]")
                .to_compile_error()
                .into();
        }

        let pattern = variant_pattern(variant);
        if is_command {
            command_arms.push(quote! { #pattern => true, });
        }
        if is_event {
            event_arms.push(quote! { #pattern => true, });
        }

        let label = variant.ident.to_string();
        name_arms.push(quote! { #pattern => #label, });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a command
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#event_arms)*
                    _ => false,
                }
            }

            /// Returns the variant name of this action
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for State structs
///
/// Generates a change counter for the field marked `#[revision]`:
/// - `revision()` - the current value
/// - `bump_revision()` - advance it by one (wrapping)
///
/// Reducers call `bump_revision()` whenever they apply a change, so observers
/// can tell a new snapshot from a republished one.
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-struct type
/// - More than one field is marked `#[revision]`
/// - The marked field has no name (tuple structs)
///
/// A struct without a `#[revision]` field derives nothing.
#[proc_macro_derive(State, attributes(revision))]
pub fn derive_state(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_state(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand_state(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(input, "#[derive(State)] can only be used on structs"));
    };

    let mut marked = data_struct
        .fields
        .iter()
        .filter(|field| has_attribute(&field.attrs, "revision"));

    let Some(field) = marked.next() else {
        return Ok(quote! {});
    };

    if let Some(extra) = marked.next() {
        return Err(syn::Error::new_spanned(extra, "Only one field can be marked #[revision]"));
    }

    let Some(field_name) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "#[revision] requires a named field"));
    };
    let field_ty = &field.ty;

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Current revision of this state
            #[must_use]
            pub const fn revision(&self) -> #field_ty {
                self.#field_name
            }

            /// Record that this state changed
            pub const fn bump_revision(&mut self) {
                self.#field_name = self.#field_name.wrapping_add(1);
            }
        }
    })
}

/// Match pattern for a variant that ignores its fields
fn variant_pattern(variant: &Variant) -> TokenStream2 {
    let ident: &Ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
