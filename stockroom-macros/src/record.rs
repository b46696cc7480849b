use crate::derive_utils::apply_derives;
use crate::field_utils::ensure_leading_field;
use crate::value_object::BoolFlag;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Item, LitStr, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input,
};

/// #[record] 宏实现
/// - 若缺失则追加字段 `id: RecordId` 并置于字段最前
/// - 自动实现 `::stockroom_domain::record::Entity`（`PREFIX`/`id`）
/// - 合并派生：Debug（可关闭）、Clone、PartialEq；序列化由记录自行决定
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as RecordAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[record] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_ty: Type = syn::parse_quote! { ::stockroom_domain::value_object::RecordId };
    ensure_leading_field(fields_named, "id", &id_ty);

    let mut required: Vec<syn::Path> =
        vec![syn::parse_quote!(Clone), syn::parse_quote!(PartialEq)];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let prefix = &cfg.prefix;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::stockroom_domain::record::Entity for #ident #ty_generics #where_clause {
            const PREFIX: &'static str = #prefix;

            fn id(&self) -> &::stockroom_domain::value_object::RecordId {
                &self.id
            }
        }
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct RecordAttrConfig {
    prefix: LitStr,
    derive_debug: Option<bool>,
}

impl Parse for RecordAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut prefix: Option<LitStr> = None;
        let mut derive_debug: Option<bool> = None;

        while !input.is_empty() {
            let key: syn::Ident = input.fork().parse()?;
            if key == "prefix" {
                let _key: syn::Ident = input.parse()?;
                let _eq: Token![=] = input.parse()?;
                let lit: LitStr = input.parse()?;
                if prefix.is_some() {
                    return Err(syn::Error::new(lit.span(), "duplicate key 'prefix' in attribute"));
                }
                let value = lit.value();
                if value.is_empty() || !value.chars().all(|c| c.is_ascii_uppercase()) {
                    return Err(syn::Error::new(
                        lit.span(),
                        "prefix must be non-empty upper-case ASCII, e.g. \"CUST\"",
                    ));
                }
                prefix = Some(lit);
            } else if key == "debug" {
                let flag: BoolFlag = input.parse()?;
                if derive_debug.is_some() {
                    return Err(syn::Error::new(flag.key.span(), "duplicate key 'debug' in attribute"));
                }
                derive_debug = Some(flag.value);
            } else {
                return Err(syn::Error::new(
                    key.span(),
                    "unknown key in attribute; expected 'prefix' or 'debug'",
                ));
            }

            if input.is_empty() {
                break;
            }
            let _comma: Token![,] = input.parse()?;
        }

        let Some(prefix) = prefix else {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "missing required key 'prefix', e.g. #[record(prefix = \"CUST\")]",
            ));
        };

        Ok(Self {
            prefix,
            derive_debug,
        })
    }
}
