//! `#[derive(Record)]` — generated descriptor registration for `objbind`.
//!
//! The derive turns a named-field struct declaration into a static
//! [`TypeDescriptor`] the decoder can resolve, equivalent to registering the
//! type by hand with `DescriptorBuilder`:
//!
//! ```ignore
//! #[derive(Record)]
//! #[record(base = "Person")]
//! struct Employee {
//!     title: String,
//!     #[record(rename = "startDate")]
//!     start_date: NaiveDate,
//! }
//! ```
//!
//! Container attributes: `#[record(base = "Type")]` merges a base type's
//! fields in first; `#[record(requires_args)]` marks the type as not
//! zero-argument constructible; `#[record(from_scalar)]` wires the type's
//! `from_scalar` associated function as its scalar-coercion constructor.
//! Field attribute: `#[record(rename = "name")]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let name_str = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record requires named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ))
        }
    };

    let mut base: Option<syn::Path> = None;
    let mut requires_args = false;
    let mut from_scalar = false;
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("base") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                base = Some(lit.parse()?);
                Ok(())
            } else if meta.path.is_ident("requires_args") {
                requires_args = true;
                Ok(())
            } else if meta.path.is_ident("from_scalar") {
                from_scalar = true;
                Ok(())
            } else {
                Err(meta.error("unknown record attribute"))
            }
        })?;
    }

    let mut field_calls = Vec::new();
    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let mut field_name = ident.to_string();
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    field_name = lit.value();
                    Ok(())
                } else {
                    Err(meta.error("unknown record field attribute"))
                }
            })?;
        }
        let ty_expr = type_ref_expr(&field.ty)?;
        field_calls.push(quote! { .field(#field_name, #ty_expr) });
    }

    let base_call = base
        .map(|path| quote! { .base(<#path as objbind::Record>::descriptor) })
        .unwrap_or_default();
    let requires_call = requires_args
        .then(|| quote! { .requires_args() })
        .unwrap_or_default();
    let from_scalar_call = from_scalar
        .then(|| quote! { .from_scalar(#name::from_scalar) })
        .unwrap_or_default();

    Ok(quote! {
        impl objbind::Record for #name {
            fn descriptor() -> &'static objbind::TypeDescriptor {
                static DESC: objbind::__private::Lazy<objbind::TypeDescriptor> =
                    objbind::__private::Lazy::new(|| {
                        objbind::DescriptorBuilder::new(#name_str)
                            #base_call
                            #(#field_calls)*
                            #requires_call
                            #from_scalar_call
                            .build()
                    });
                &DESC
            }
        }
    })
}

/// Maps a field's declared Rust type to a `TypeRef` expression,
/// syntactically: known scalar and container names by their final path
/// segment, any other path as a nested record type.
fn type_ref_expr(ty: &Type) -> syn::Result<TokenStream2> {
    if let Type::Reference(reference) = ty {
        return type_ref_expr(&reference.elem);
    }
    let Type::Path(type_path) = ty else {
        return Err(syn::Error::new_spanned(ty, "unsupported field type"));
    };
    let segment = type_path
        .path
        .segments
        .last()
        .ok_or_else(|| syn::Error::new_spanned(ty, "unsupported field type"))?;
    let expr = match segment.ident.to_string().as_str() {
        "String" | "str" => quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::Str)),
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::Int))
        }
        "f32" | "f64" => quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::Float)),
        "bool" => quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::Bool)),
        "Decimal" => quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::Decimal)),
        "NaiveDate" => quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::Date)),
        "NaiveTime" => quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::Time)),
        "NaiveDateTime" => quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::DateTime)),
        "TimeDelta" | "Duration" => {
            quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::Duration))
        }
        "Option" => {
            // Optionality is a presence concern, not a shape concern.
            let inner = generic_arg(segment, 0)?;
            return type_ref_expr(inner);
        }
        "Vec" => {
            let inner = generic_arg(segment, 0)?;
            if is_u8(inner) {
                quote!(objbind::TypeRef::Scalar(objbind::ScalarKind::Bytes))
            } else {
                let inner_expr = type_ref_expr(inner)?;
                quote!(objbind::TypeRef::Seq(Box::new(#inner_expr)))
            }
        }
        "IndexMap" | "HashMap" | "BTreeMap" => {
            let value = generic_arg(segment, 1)?;
            let value_expr = type_ref_expr(value)?;
            quote!(objbind::TypeRef::Map(Box::new(#value_expr)))
        }
        _ => quote!(objbind::TypeRef::Record(<#ty as objbind::Record>::descriptor)),
    };
    Ok(expr)
}

fn generic_arg(segment: &syn::PathSegment, index: usize) -> syn::Result<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Err(syn::Error::new_spanned(
            segment,
            "expected a generic type argument",
        ));
    };
    args.args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(t) => Some(t),
            _ => None,
        })
        .nth(index)
        .ok_or_else(|| syn::Error::new_spanned(segment, "expected a generic type argument"))
}

fn is_u8(ty: &Type) -> bool {
    matches!(ty, Type::Path(p) if p.path.segments.last().is_some_and(|s| s.ident == "u8"))
}
