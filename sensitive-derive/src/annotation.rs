//! Parsing of `#[sensitive("...")]`, `#[pii("...")]` and `#[sens("...")]`
//! field attributes.
//!
//! The annotation body is kept as a raw string: the runtime crate parses and
//! validates it when the type is first scanned. The derive only reads the
//! role of the winning annotation to decide whether the field is a nested
//! record.

use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Result, spanned::Spanned};

/// Recognized annotation identifiers, in priority order.
pub(crate) const TAG_IDS: [&str; 3] = ["sensitive", "pii", "sens"];

const TAG_DIVE: &str = "dive";

/// A raw annotation found on a field.
#[derive(Clone, Debug)]
pub(crate) struct FieldAnnotation {
    pub(crate) id: &'static str,
    pub(crate) raw: LitStr,
}

/// Collects the recognized annotations of a field, in declaration order.
///
/// ## Accepted Forms
///
/// | Attribute                          | Raw annotation     |
/// |------------------------------------|--------------------|
/// | None                               | field is skipped   |
/// | `#[sensitive("data,kind=email")]`  | `data,kind=email`  |
/// | `#[pii = "subjectID"]`             | `subjectID`        |
pub(crate) fn parse_field_annotations(attrs: &[Attribute]) -> Result<Vec<FieldAnnotation>> {
    let mut found: Vec<FieldAnnotation> = Vec::new();
    for attr in attrs {
        let Some(id) = TAG_IDS.iter().copied().find(|id| attr.path().is_ident(id)) else {
            continue;
        };
        if found.iter().any(|annotation| annotation.id == id) {
            return Err(syn::Error::new(
                attr.span(),
                format!("multiple #[{id}] attributes on the same field"),
            ));
        }
        let raw = match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    format!(
                        "missing annotation: use #[{id}(\"<role>[,<key>=<value>]*\")] \
                         (e.g., #[{id}(\"data\")])"
                    ),
                ));
            }
            Meta::List(list) => syn::parse2::<LitStr>(list.tokens.clone()).map_err(|_| {
                syn::Error::new(
                    attr.span(),
                    format!("expected a string literal (e.g., #[{id}(\"data,kind=email\")])"),
                )
            })?,
            Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(raw), ..
                }) => raw.clone(),
                _ => {
                    return Err(syn::Error::new(
                        attr.span(),
                        format!("expected a string literal (e.g., #[{id} = \"data\"])"),
                    ));
                }
            },
        };
        found.push(FieldAnnotation { id, raw });
    }
    Ok(found)
}

/// Rejects annotations placed on the type itself.
pub(crate) fn reject_container_annotations(attrs: &[Attribute]) -> Result<()> {
    match attrs
        .iter()
        .find(|attr| TAG_IDS.iter().any(|id| attr.path().is_ident(id)))
    {
        Some(attr) => Err(syn::Error::new(
            attr.span(),
            "annotations belong on fields, not on the type",
        )),
        None => Ok(()),
    }
}

/// Returns `true` when the winning annotation has the `dive` role.
///
/// The winner is picked the same way the scanner picks it: identifiers in
/// [`TAG_IDS`] order, first non-empty body.
pub(crate) fn is_dive(annotations: &[FieldAnnotation]) -> bool {
    TAG_IDS
        .iter()
        .find_map(|id| {
            annotations
                .iter()
                .find(|annotation| annotation.id == *id && !annotation.raw.value().is_empty())
        })
        .is_some_and(|annotation| {
            annotation
                .raw
                .value()
                .split(',')
                .next()
                .is_some_and(|role| role.trim() == TAG_DIVE)
        })
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_nothing() {
        let attrs = parse_attrs(quote! { #[doc = "plain"] });
        assert!(parse_field_annotations(&attrs).unwrap().is_empty());
    }

    #[test]
    fn list_form_keeps_the_raw_body() {
        let attrs = parse_attrs(quote! { #[sensitive("data,kind=email")] });
        let annotations = parse_field_annotations(&attrs).unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].id, "sensitive");
        assert_eq!(annotations[0].raw.value(), "data,kind=email");
    }

    #[test]
    fn name_value_form_is_accepted() {
        let attrs = parse_attrs(quote! { #[pii = "subjectID"] });
        let annotations = parse_field_annotations(&attrs).unwrap();
        assert_eq!(annotations[0].id, "pii");
        assert_eq!(annotations[0].raw.value(), "subjectID");
    }

    #[test]
    fn different_identifiers_may_be_combined() {
        let attrs = parse_attrs(quote! {
            #[sens("data")]
            #[sensitive("dive")]
        });
        let annotations = parse_field_annotations(&attrs).unwrap();
        assert_eq!(annotations.len(), 2);
        assert!(is_dive(&annotations));
    }

    #[test]
    fn bare_attribute_errors_with_missing_annotation() {
        let attrs = parse_attrs(quote! { #[sensitive] });
        let err = parse_field_annotations(&attrs).unwrap_err();
        assert!(err.to_string().contains("missing annotation"));
    }

    #[test]
    fn non_string_argument_errors() {
        let attrs = parse_attrs(quote! { #[sensitive(data)] });
        let err = parse_field_annotations(&attrs).unwrap_err();
        assert!(err.to_string().contains("expected a string literal"));

        let attrs = parse_attrs(quote! { #[pii = 42] });
        let err = parse_field_annotations(&attrs).unwrap_err();
        assert!(err.to_string().contains("expected a string literal"));
    }

    #[test]
    fn duplicate_identifier_errors() {
        let attrs = parse_attrs(quote! {
            #[sensitive("data")]
            #[sensitive("dive")]
        });
        let err = parse_field_annotations(&attrs).unwrap_err();
        assert!(err.to_string().contains("multiple #[sensitive]"));
    }

    #[test]
    fn dive_follows_identifier_priority() {
        let attrs = parse_attrs(quote! {
            #[sens("dive")]
            #[pii("data")]
        });
        let annotations = parse_field_annotations(&attrs).unwrap();
        assert!(!is_dive(&annotations));

        let attrs = parse_attrs(quote! {
            #[sensitive("")]
            #[sens(" dive ,kind=x")]
        });
        let annotations = parse_field_annotations(&attrs).unwrap();
        assert!(is_dive(&annotations));
    }

    #[test]
    fn container_annotations_are_rejected() {
        let attrs = parse_attrs(quote! { #[sensitive("dive")] });
        assert!(reject_container_annotations(&attrs).is_err());
        let attrs = parse_attrs(quote! { #[derive(Clone)] });
        assert!(reject_container_annotations(&attrs).is_ok());
    }
}
