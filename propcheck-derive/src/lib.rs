//! Derive macro for propcheck's `Arbitrary` trait.
//!
//! Records are generated field by field and shrink one field at a time;
//! enums pick a variant uniformly and shrink towards the first variant.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Field, Fields, GenericParam, Generics,
    Ident,
};

/// Derive `propcheck::Arbitrary` for a struct or enum.
///
/// Every field uses its type's `Arbitrary` generator unless annotated with
/// `#[arbitrary(with = "path::to::generator")]`, naming a function that
/// returns a `Gen` of the field's type.
///
/// # Example
///
/// ```rust,ignore
/// use propcheck::*;
///
/// #[derive(Arbitrary, Debug, Clone, PartialEq)]
/// struct Order {
///     #[arbitrary(with = "quantities")]
///     quantity: u32,
///     note: Option<String>,
/// }
///
/// fn quantities() -> Gen<u32> {
///     Gen::from_range(Range::new(1, 99))
/// }
///
/// let orders = Order::arbitrary();
/// ```
#[proc_macro_derive(Arbitrary, attributes(arbitrary))]
pub fn derive_arbitrary(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match arbitrary_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn arbitrary_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let generics = add_trait_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let generator = match &input.data {
        Data::Struct(data) => fields_generator(&data.fields, quote! { Self })?,
        Data::Enum(data) => {
            if data.variants.is_empty() {
                return Err(syn::Error::new_spanned(
                    input,
                    "Arbitrary cannot be derived for an enum without variants",
                ));
            }
            let last = data.variants.len() - 1;
            let arms = data
                .variants
                .iter()
                .enumerate()
                .map(|(index, variant)| {
                    let variant_name = &variant.ident;
                    let generator = fields_generator(&variant.fields, quote! { Self::#variant_name })?;
                    Ok(if index == last {
                        quote! { _ => #generator, }
                    } else {
                        quote! { #index => #generator, }
                    })
                })
                .collect::<Result<Vec<_>, syn::Error>>()?;

            quote! {
                ::propcheck::Gen::<usize>::from_range(::propcheck::Range::new(0, #last))
                    .bind(|variant| match variant {
                        #(#arms)*
                    })
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Arbitrary derive macro does not support unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::propcheck::Arbitrary for #name #ty_generics #where_clause {
            fn arbitrary() -> ::propcheck::Gen<Self> {
                #generator
            }
        }
    })
}

fn add_trait_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::propcheck::Arbitrary));
        }
    }
    generics
}

/// A `Gen<Self>` building `constructor` from `fields`.
///
/// Field generators are zipped left to right, so shrinking tries earlier
/// fields first.
fn fields_generator(fields: &Fields, constructor: TokenStream2) -> Result<TokenStream2, syn::Error> {
    let generators = fields
        .iter()
        .map(field_generator)
        .collect::<Result<Vec<_>, syn::Error>>()?;
    let vars: Vec<Ident> = (0..generators.len())
        .map(|i| Ident::new(&format!("field_{i}"), Span::call_site()))
        .collect();

    let value = match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            quote! { #constructor { #(#names: #vars),* } }
        }
        Fields::Unnamed(_) => quote! { #constructor(#(#vars),*) },
        Fields::Unit => quote! { #constructor },
    };

    let mut iter = generators.into_iter().zip(&vars);
    let Some((first_gen, first_var)) = iter.next() else {
        return Ok(quote! { ::propcheck::Gen::constant(#value) });
    };

    let (zipped, pattern) = iter.fold(
        (first_gen, quote! { #first_var }),
        |(gen, pattern), (next_gen, var)| {
            (
                quote! { #gen.zip(#next_gen) },
                quote! { (#pattern, #var) },
            )
        },
    );

    Ok(quote! {
        #zipped.map(|#pattern| #value)
    })
}

fn field_generator(field: &Field) -> Result<TokenStream2, syn::Error> {
    let mut with: Option<syn::ExprPath> = None;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("arbitrary")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("with") {
                let path: syn::LitStr = meta.value()?.parse()?;
                with = Some(path.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `with = \"path\"`"))
            }
        })?;
    }

    let field_type = &field.ty;
    Ok(match with {
        Some(path) => quote! { #path() },
        None => quote! { <#field_type as ::propcheck::Arbitrary>::arbitrary() },
    })
}
