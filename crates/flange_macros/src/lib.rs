use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Expr, ExprLit, Lit, Meta};

// =============================================================================
// Dtype Derive Macro
// =============================================================================

/// Derive macro attaching a fixed type tag to a type.
///
/// The tag is given with the `#[dtype("...")]` attribute and is written next
/// to the data whenever the value is encoded.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Dtype)]
/// #[dtype("compas_robots/ToolModel")]
/// pub struct ToolModel { ... }
/// ```
///
/// This generates:
///
/// ```rust,ignore
/// impl flange_common::Dtype for ToolModel {
///     const DTYPE: &'static str = "compas_robots/ToolModel";
/// }
/// ```
#[proc_macro_derive(Dtype, attributes(dtype))]
pub fn derive_dtype(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    expand_dtype(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_dtype(ast: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    let dtype = dtype_attr(ast)?;

    Ok(quote! {
        impl #impl_generics flange_common::Dtype for #name #ty_generics #where_clause {
            const DTYPE: &'static str = #dtype;
        }
    })
}

// Find the #[dtype("...")] attribute
fn dtype_attr(ast: &DeriveInput) -> syn::Result<String> {
    let mut dtype: Option<String> = None;

    for attr in &ast.attrs {
        if !attr.path().is_ident("dtype") {
            continue;
        }
        let parsed = match &attr.meta {
            Meta::List(meta_list) => meta_list.parse_args::<Expr>().ok(),
            _ => None,
        };
        match parsed {
            Some(Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            })) => dtype = Some(lit_str.value()),
            _ => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected a string literal, e.g. #[dtype(\"my_crate/MyType\")]",
                ));
            }
        }
    }

    match dtype {
        None => Err(syn::Error::new_spanned(
            &ast.ident,
            "Dtype derive requires a #[dtype(\"...\")] attribute",
        )),
        Some(dtype) if dtype.is_empty() => {
            Err(syn::Error::new_spanned(&ast.ident, "dtype must not be empty"))
        }
        Some(dtype) => Ok(dtype),
    }
}
