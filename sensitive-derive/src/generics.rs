//! Generic parameter bounds for the generated impls.
//!
//! `Record` and `Dive` are `'static` traits, so every type parameter gets a
//! `'static` bound. Type parameters that appear in a `dive` field type also
//! need `Dive`, because the field is registered with
//! `FieldSchema::nested::<FieldType>()`:
//!
//! ```ignore
//! #[derive(Sensitive)]
//! struct Page<T> {
//!     #[sensitive("dive")]
//!     items: Vec<T>, // T: Dive + 'static
//!     cursor: String,
//! }
//! ```
//!
//! `PhantomData<T>` never holds a record, and map keys are never walked, so
//! their parameters are not collected.

use syn::{GenericArgument, Generics, Ident, PathArguments, Type, parse_quote};

use crate::crate_path;

/// Collects the type parameters of `generics` that occur in the record
/// positions of a `dive` field type `ty`.
pub(crate) fn collect_dive_params(ty: &Type, generics: &Generics, used: &mut Vec<Ident>) {
    match ty {
        Type::Path(type_path) => {
            if let Some(qself) = &type_path.qself {
                collect_dive_params(&qself.ty, generics, used);
            }
            let is_phantom = type_path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "PhantomData");
            if is_phantom {
                return;
            }
            for segment in &type_path.path.segments {
                let is_param = generics
                    .type_params()
                    .any(|param| param.ident == segment.ident);
                if is_param && !used.contains(&segment.ident) {
                    used.push(segment.ident.clone());
                }
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    let is_map = segment.ident == "HashMap" || segment.ident == "BTreeMap";
                    for arg in args.args.iter().skip(usize::from(is_map)) {
                        match arg {
                            GenericArgument::Type(inner) => {
                                collect_dive_params(inner, generics, used);
                            }
                            GenericArgument::AssocType(assoc) => {
                                collect_dive_params(&assoc.ty, generics, used);
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
        Type::Reference(reference) => collect_dive_params(&reference.elem, generics, used),
        Type::Slice(slice) => collect_dive_params(&slice.elem, generics, used),
        Type::Array(array) => collect_dive_params(&array.elem, generics, used),
        Type::Paren(paren) => collect_dive_params(&paren.elem, generics, used),
        Type::Group(group) => collect_dive_params(&group.elem, generics, used),
        Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_dive_params(elem, generics, used);
            }
        }
        _ => {}
    }
}

/// Adds `'static` to every type parameter and `Dive` to those used by `dive`
/// fields.
pub(crate) fn add_record_bounds(mut generics: Generics, dive_params: &[Ident]) -> Generics {
    let dive_path = crate_path("Dive");
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
        if dive_params.contains(&param.ident) {
            param.bounds.push(parse_quote!(#dive_path));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::{ToTokens, quote};
    use syn::DeriveInput;

    use super::*;

    fn generics_of(tokens: proc_macro2::TokenStream) -> Generics {
        let input: DeriveInput = syn::parse2(tokens).expect("should parse as DeriveInput");
        input.generics
    }

    fn used_in(ty: proc_macro2::TokenStream, generics: &Generics) -> Vec<String> {
        let ty: Type = syn::parse2(ty).expect("should parse as Type");
        let mut used = Vec::new();
        collect_dive_params(&ty, generics, &mut used);
        used.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn collects_params_inside_containers() {
        let generics = generics_of(quote! { struct S<K, V, U> {} });
        assert_eq!(used_in(quote! { HashMap<K, Option<V>> }, &generics), vec!["V"]);
        assert_eq!(used_in(quote! { Vec<Box<U>> }, &generics), vec!["U"]);
        assert!(used_in(quote! { String }, &generics).is_empty());
    }

    #[test]
    fn phantom_data_is_skipped() {
        let generics = generics_of(quote! { struct S<T> {} });
        assert!(used_in(quote! { PhantomData<T> }, &generics).is_empty());
        assert!(used_in(quote! { ::core::marker::PhantomData<T> }, &generics).is_empty());
    }

    #[test]
    fn every_param_becomes_static_and_dive_params_get_dive() {
        let generics = generics_of(quote! { struct S<T, U> {} });
        let dive = vec![Ident::new("T", proc_macro2::Span::call_site())];
        let bounded = add_record_bounds(generics, &dive);
        let rendered = bounded.to_token_stream().to_string();
        assert_eq!(rendered.matches("'static").count(), 2);
        assert_eq!(rendered.matches("Dive").count(), 1);
        assert!(rendered.ends_with("U : 'static >"));
    }
}
