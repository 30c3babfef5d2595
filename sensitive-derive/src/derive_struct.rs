//! Struct-specific `Record` derivation.
//!
//! Every named field is registered in the schema, so the scanner sees the
//! full declaration order. Only annotated, non-hidden fields get an accessor
//! arm: the walker never asks for the others.

use proc_macro2::Span;
use quote::{quote, quote_spanned};
use syn::{Fields, FieldsNamed, LitInt, LitStr, Result, ext::IdentExt, spanned::Spanned};

use crate::{
    DeriveOutput,
    annotation::{is_dive, parse_field_annotations},
    crate_path,
    generics::collect_dive_params,
};

pub(crate) fn derive_struct(fields: Fields, generics: &syn::Generics) -> Result<DeriveOutput> {
    match fields {
        Fields::Named(fields) => derive_named_struct(fields, generics),
        Fields::Unnamed(fields) => Err(syn::Error::new(
            fields.span(),
            "`Sensitive` requires named fields; annotations are read per field name",
        )),
        Fields::Unit => Ok(DeriveOutput {
            schema_fields: Vec::new(),
            ref_arms: Vec::new(),
            mut_arms: Vec::new(),
            dive_generics: Vec::new(),
        }),
    }
}

fn derive_named_struct(fields: FieldsNamed, generics: &syn::Generics) -> Result<DeriveOutput> {
    let field_schema = crate_path("FieldSchema");
    let field_ref = crate_path("FieldRef");
    let field_mut = crate_path("FieldMut");

    let mut schema_fields = Vec::new();
    let mut ref_arms = Vec::new();
    let mut mut_arms = Vec::new();
    let mut dive_generics = Vec::new();

    for (index, field) in fields.named.into_iter().enumerate() {
        let span = field.span();
        let Some(ident) = field.ident else {
            return Err(syn::Error::new(span, "named field should have an identifier"));
        };
        let ty = &field.ty;
        let field_name = LitStr::new(&ident.unraw().to_string(), ident.span());
        let annotations = parse_field_annotations(&field.attrs)?;
        let dive = is_dive(&annotations);

        let constructor = if dive {
            collect_dive_params(ty, generics, &mut dive_generics);
            quote_spanned! { ty.span() => #field_schema::nested::<#ty>(#field_name) }
        } else {
            quote! { #field_schema::value::<#ty>(#field_name) }
        };
        let tags = annotations.iter().map(|annotation| {
            let id = annotation.id;
            let raw = &annotation.raw;
            quote! { .tag(#id, #raw) }
        });
        schema_fields.push(quote! { #constructor #(#tags)* });

        if annotations.is_empty() || field_name.value().starts_with('_') {
            continue;
        }
        let index = LitInt::new(&index.to_string(), Span::call_site());
        if dive {
            ref_arms.push(quote_spanned! { span =>
                #index => ::core::option::Option::Some(#field_ref::Nested(&self.#ident)),
            });
            mut_arms.push(quote_spanned! { span =>
                #index => ::core::option::Option::Some(#field_mut::Nested(&mut self.#ident)),
            });
        } else {
            ref_arms.push(quote_spanned! { span =>
                #index => ::core::option::Option::Some(#field_ref::Value(&self.#ident)),
            });
            mut_arms.push(quote_spanned! { span =>
                #index => ::core::option::Option::Some(#field_mut::Value(&mut self.#ident)),
            });
        }
    }

    Ok(DeriveOutput {
        schema_fields,
        ref_arms,
        mut_arms,
        dive_generics,
    })
}
