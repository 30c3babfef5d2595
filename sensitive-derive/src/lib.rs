//! Derive macro for `sensitive`.
//!
//! This crate generates the field registry behind `#[derive(Sensitive)]`. It:
//! - reads `#[sensitive("...")]`, `#[pii("...")]` and `#[sens("...")]` field
//!   attributes and keeps their bodies as raw strings
//! - emits `Record` and `Dive` implementations exposing annotated fields
//!
//! It does **not** interpret annotations beyond spotting `dive` fields. The
//! `sensitive` crate parses and validates them when the type is first scanned.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Result, parse_macro_input, spanned::Spanned};

mod annotation;
mod derive_struct;
mod generics;
use annotation::reject_container_annotations;
use derive_struct::derive_struct;
use generics::add_record_bounds;

/// Derives `sensitive::Record` and `sensitive::Dive` for structs with named
/// fields.
///
/// # Field Attributes
///
/// The annotation body is `<role>[,<key>=<value>]*` and may be placed under
/// any of the recognized identifiers. When several are present, `sensitive`
/// wins over `pii`, which wins over `sens`.
///
/// - **No annotation**: the field is registered but never read or written.
/// - `#[sensitive("subjectID")]`: the field identifies the data subject. It
///   must be a string, a `char` or an integer (`String`, `Box<str>`, `u64`,
///   ...).
/// - `#[sensitive("data")]`, `#[sensitive("data,kind=email")]`: the field is
///   personal data handed to the replacement callback. Only `String`,
///   `Box<str>`, `Cow<'static, str>`, `Option<String>`, `Box<String>` and
///   `Option<Box<String>>` are read; on any other type, a newtype around a
///   `String` included, the annotation is ignored.
/// - `#[sensitive("dive")]`: the field holds nested records. The field type
///   must implement `Dive`: a derived record, `Option`/`Box` of one, or a
///   `Vec`, `VecDeque`, `HashMap` or `BTreeMap` of those.
///
/// Fields whose name starts with `_` are registered but never scanned.
///
/// # Rejected Inputs
///
/// Enums, unions, tuple structs, types with lifetime parameters and
/// annotations placed on the type itself are rejected at compile time.
#[proc_macro_derive(Sensitive, attributes(sensitive, pii, sens))]
pub fn derive_sensitive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the `sensitive` crate root.
///
/// Handles crate renaming (e.g., `pii = { package = "sensitive", ... }`).
fn crate_root() -> TokenStream {
    match crate_name("sensitive") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::sensitive },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = format_ident!("{}", item);
    quote! { #root::#item_ident }
}

struct DeriveOutput {
    schema_fields: Vec<TokenStream>,
    ref_arms: Vec<TokenStream>,
    mut_arms: Vec<TokenStream>,
    dive_generics: Vec<Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    reject_container_annotations(&attrs)?;
    if let Some(lifetime) = generics.lifetimes().next() {
        return Err(syn::Error::new(
            lifetime.span(),
            "`Sensitive` cannot be derived for types with lifetime parameters",
        ));
    }

    let output = match data {
        Data::Struct(data) => derive_struct(data.fields, &generics)?,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "`Sensitive` cannot be derived for enums",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "`Sensitive` cannot be derived for unions",
            ));
        }
    };

    let crate_root = crate_root();
    let DeriveOutput {
        schema_fields,
        ref_arms,
        mut_arms,
        dive_generics,
    } = output;

    let generics = add_record_bounds(generics, &dive_generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let name = ident.to_string();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #crate_root::Record for #ident #ty_generics #where_clause {
            fn schema() -> #crate_root::Schema {
                #crate_root::Schema::new(#name)
                    #(.field(#schema_fields))*
            }

            fn field(
                &self,
                index: usize,
            ) -> ::core::option::Option<#crate_root::FieldRef<'_>> {
                match index {
                    #(#ref_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<#crate_root::FieldMut<'_>> {
                match index {
                    #(#mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        #[automatically_derived]
        impl #impl_generics #crate_root::Dive for #ident #ty_generics #where_clause {
            fn layout() -> #crate_root::Layout {
                #crate_root::Layout::record::<Self>()
            }

            fn is_absent(&self) -> bool {
                false
            }

            fn as_record(&self) -> ::core::option::Option<&dyn #crate_root::Record> {
                ::core::option::Option::Some(self)
            }

            fn as_record_mut(&mut self) -> ::core::option::Option<&mut dyn #crate_root::Record> {
                ::core::option::Option::Some(self)
            }

            fn visit(
                &self,
                f: &mut dyn ::core::ops::FnMut(&dyn #crate_root::Record) -> ::core::ops::ControlFlow<()>,
            ) -> ::core::ops::ControlFlow<()> {
                f(self)
            }

            fn visit_mut(
                &mut self,
                f: &mut dyn ::core::ops::FnMut(&mut dyn #crate_root::Record) -> ::core::ops::ControlFlow<()>,
            ) -> ::core::ops::ControlFlow<()> {
                f(self)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn expand_tokens(tokens: TokenStream) -> Result<TokenStream> {
        expand(syn::parse2(tokens).expect("should parse as DeriveInput"))
    }

    #[test]
    fn expands_record_and_dive_impls() {
        let expanded = expand_tokens(quote! {
            struct User {
                #[sensitive("subjectID")]
                id: String,
                #[sensitive("data,kind=email")]
                email: String,
            }
        })
        .unwrap()
        .to_string();
        assert!(expanded.contains(":: sensitive :: Record for User"));
        assert!(expanded.contains(":: sensitive :: Dive for User"));
        assert!(expanded.contains("Schema :: new (\"User\")"));
        assert!(expanded.contains(". tag (\"sensitive\" , \"data,kind=email\")"));
    }

    #[test]
    fn rejects_enums_unions_and_lifetimes() {
        let err = expand_tokens(quote! { enum E { A } }).unwrap_err();
        assert!(err.to_string().contains("enums"));

        let err = expand_tokens(quote! { union U { a: u32 } }).unwrap_err();
        assert!(err.to_string().contains("unions"));

        let err = expand_tokens(quote! { struct S<'a> { #[sensitive("data")] name: &'a str } })
            .unwrap_err();
        assert!(err.to_string().contains("lifetime parameters"));
    }

    #[test]
    fn rejects_annotations_on_the_type() {
        let err = expand_tokens(quote! {
            #[sensitive("dive")]
            struct S {}
        })
        .unwrap_err();
        assert!(err.to_string().contains("on fields"));
    }
}
