//! TableRow derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Result};

struct RowField {
    ident: syn::Ident,
    column: String,
    primary: bool,
    skip: bool,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "TableRow can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "TableRow can only be derived for structs",
            ));
        }
    };

    let fields = fields.iter().map(parse_field).collect::<Result<Vec<_>>>()?;

    let mut primaries = fields.iter().filter(|f| f.primary);
    let primary = match (primaries.next(), primaries.next()) {
        (Some(field), None) => &field.ident,
        (None, _) => {
            return Err(syn::Error::new_spanned(
                &input,
                "TableRow requires one field marked #[row(primary)]",
            ));
        }
        (Some(_), Some(second)) => {
            return Err(syn::Error::new_spanned(
                &second.ident,
                "only one field may be marked #[row(primary)]",
            ));
        }
    };

    let inserts: Vec<_> = fields
        .iter()
        .filter(|f| !f.skip)
        .map(|f| {
            let ident = &f.ident;
            let column = &f.column;
            quote! {
                array.insert(#column, sqlprep::Value::from(::core::clone::Clone::clone(&self.#ident)));
            }
        })
        .collect();
    let capacity = inserts.len();

    Ok(quote! {
        impl #impl_generics sqlprep::TableRow for #name #ty_generics #where_clause {
            fn primary(&self) -> sqlprep::Value {
                sqlprep::Value::from(::core::clone::Clone::clone(&self.#primary))
            }

            fn to_array(&self) -> sqlprep::Array {
                let mut array = sqlprep::Array::with_capacity(#capacity);
                #(#inserts)*
                array
            }
        }
    })
}

fn parse_field(field: &syn::Field) -> Result<RowField> {
    let ident = field.ident.clone().unwrap();
    let mut parsed = RowField {
        column: ident.to_string(),
        ident,
        primary: false,
        skip: false,
    };

    for attr in &field.attrs {
        if !attr.path().is_ident("row") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary") {
                parsed.primary = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else if meta.path.is_ident("column") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.column = lit.value();
                Ok(())
            } else {
                Err(meta.error("unknown row attribute, expected `primary`, `column` or `skip`"))
            }
        })?;
    }

    Ok(parsed)
}
