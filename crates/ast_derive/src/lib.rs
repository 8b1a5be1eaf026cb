//! `#[derive(WalkAst)]`: generates `impl crate::walk::Walk` for syntax-tree
//! structs and enums by walking every field in declaration order.

use proc_macro::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields, Index};

#[proc_macro_derive(WalkAst)]
pub fn derive_walk_ast(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let span = input.span();

    let walk_body = match generate_walk_body(&input.data) {
        Ok(body) => body,
        Err(err) => return err.into_compile_error().into(),
    };

    // Arena and visitor are bound to reserved names so node fields called
    // `a` or `v` cannot shadow them inside the match arms.
    let expanded = quote_spanned! {span =>
        impl<'ast> crate::walk::Walk<'ast> for #name {
            #[inline(always)]
            fn walk<V: crate::walk::Visitor<'ast> + ?Sized>(
                &self,
                __arena: &'ast crate::ast::AstArena,
                __visitor: &mut V
            ) {
                #walk_body
            }
        }
    };

    expanded.into()
}

fn generate_walk_body(data: &Data) -> syn::Result<proc_macro2::TokenStream> {
    match data {
        Data::Struct(data_struct) => Ok(generate_fields_walk(&data_struct.fields)),
        Data::Enum(data_enum) => {
            let arms = data_enum
                .variants
                .iter()
                .map(|variant| generate_variant_arm(&variant.ident, &variant.fields));

            Ok(quote! {
                match self {
                    #(#arms)*
                }
            })
        }
        Data::Union(u) => Err(syn::Error::new_spanned(
            u.union_token,
            "WalkAst cannot be derived for unions",
        )),
    }
}

fn walk_call(binding: proc_macro2::TokenStream) -> proc_macro2::TokenStream {
    quote! { crate::walk::Walk::walk(#binding, __arena, __visitor); }
}

fn generate_fields_walk(fields: &Fields) -> proc_macro2::TokenStream {
    let walk_calls = fields.iter().enumerate().map(|(i, field)| match &field.ident {
        Some(ident) => walk_call(quote! { &self.#ident }),
        None => {
            let index = Index::from(i);
            walk_call(quote! { &self.#index })
        }
    });

    quote! { #(#walk_calls)* }
}

fn generate_variant_arm(variant_name: &syn::Ident, fields: &Fields) -> proc_macro2::TokenStream {
    match fields {
        Fields::Unit => quote! { Self::#variant_name => {} },
        Fields::Named(fields_named) => {
            let bindings: Vec<_> = fields_named
                .named
                .iter()
                .filter_map(|f| f.ident.as_ref())
                .collect();
            let walk_calls = bindings.iter().map(|name| walk_call(quote! { #name }));

            quote! {
                Self::#variant_name { #(#bindings),* } => {
                    #(#walk_calls)*
                }
            }
        }
        Fields::Unnamed(fields_unnamed) => {
            let bindings: Vec<_> = (0..fields_unnamed.unnamed.len())
                .map(|i| format_ident!("f{}", i))
                .collect();
            let walk_calls = bindings.iter().map(|var| walk_call(quote! { #var }));

            quote! {
                Self::#variant_name(#(#bindings),*) => {
                    #(#walk_calls)*
                }
            }
        }
    }
}
