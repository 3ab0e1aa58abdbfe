extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Path, Type, parse_macro_input, parse_quote};

/// Accepted `repr` forms for a derived layout.
#[derive(Debug, PartialEq, Eq)]
enum Repr {
    C,
    Transparent,
}

/// Find `#[repr(C)]` (packed allowed) or `#[repr(transparent)]`.
fn find_repr(input: &DeriveInput) -> syn::Result<Option<Repr>> {
    let mut repr = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("C") {
                repr = Some(Repr::C);
            } else if meta.path.is_ident("transparent") {
                repr = Some(Repr::Transparent);
            } else if meta.input.peek(syn::token::Paren) {
                // packed(N) / align(N)
                let _content;
                syn::parenthesized!(_content in meta.input);
            }
            Ok(())
        })?;
    }
    Ok(repr)
}

/// Path to the `typed_view` crate: `::typed_view` unless overridden with
/// `#[swap_layout(crate = "some::path")]`.
fn crate_path(input: &DeriveInput) -> syn::Result<Path> {
    let mut path = parse_quote!(::typed_view);
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("swap_layout")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                path = lit.parse()?;
                Ok(())
            } else {
                Err(meta.error("unknown swap_layout attribute, expected `crate`"))
            }
        })?;
    }
    Ok(path)
}

/// Field types in declaration order.
fn field_types(input: &DeriveInput) -> syn::Result<Vec<&Type>> {
    let Data::Struct(ds) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "SwapLayout can only be derived for structs",
        ));
    };
    match &ds.fields {
        Fields::Named(named) => Ok(named.named.iter().map(|f| &f.ty).collect()),
        Fields::Unnamed(unnamed) => Ok(unnamed.unnamed.iter().map(|f| &f.ty).collect()),
        Fields::Unit => Ok(Vec::new()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if find_repr(input)?.is_none() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "SwapLayout derive requires #[repr(C)] or #[repr(transparent)]",
        ));
    }
    let types = field_types(input)?;
    let krate = crate_path(input)?;

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // a layout that misses padding would otherwise only fail at swap time
    let size_check = input.generics.params.is_empty().then(|| {
        quote! {
            const _: () = ::core::assert!(
                <#ident as #krate::SwapLayout>::SIZE == ::core::mem::size_of::<#ident>(),
                "SwapLayout fields do not cover the whole struct (padding?)"
            );
        }
    });

    Ok(quote! {
        impl #impl_generics #krate::SwapLayout for #ident #ty_generics #where_clause {
            const SIZE: usize = 0 #( + <#types as #krate::SwapLayout>::SIZE )*;

            fn describe(layout: &mut #krate::LayoutBuilder) {
                #( <#types as #krate::SwapLayout>::describe(layout); )*
            }
        }

        #size_check
    })
}

/// Derive `typed_view::SwapLayout` for a `#[repr(C)]` or
/// `#[repr(transparent)]` struct whose fields all implement it.
///
/// Generated code names `::typed_view`. When the crate is reached through a
/// re-export, point the derive at it with
/// `#[swap_layout(crate = "binary_io::typed_view")]`.
#[proc_macro_derive(SwapLayout, attributes(swap_layout))]
pub fn derive_swap_layout(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
