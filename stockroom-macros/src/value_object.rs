use crate::derive_utils::apply_derives;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并/追加派生：Default, Clone, (Debug 可控), Serialize, Deserialize, PartialEq, (Eq 可控)
/// - 参数：`#[value_object(debug = bool, eq = bool)]`，均默认 true；
///   含浮点字段的值对象需 `eq = false`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ValueObjectAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
    ];
    if cfg.derive_eq.unwrap_or(true) {
        required.push(syn::parse_quote!(Eq));
    }
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }

    match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required);
            TokenStream::from(quote! { #st })
        }
        Item::Enum(en) => {
            apply_derives(&mut en.attrs, required);
            TokenStream::from(quote! { #en })
        }
        other => syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
            .to_compile_error()
            .into(),
    }
}

// -------- parsing --------

struct ValueObjectAttrConfig {
    derive_debug: Option<bool>,
    derive_eq: Option<bool>,
}

impl Parse for ValueObjectAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self {
            derive_debug: None,
            derive_eq: None,
        };
        if input.is_empty() {
            return Ok(cfg);
        }

        let pairs: Punctuated<BoolFlag, Token![,]> = Punctuated::parse_terminated(input)?;
        for flag in pairs {
            let slot = match flag.key.to_string().as_str() {
                "debug" => &mut cfg.derive_debug,
                "eq" => &mut cfg.derive_eq,
                _ => {
                    return Err(syn::Error::new(
                        flag.key.span(),
                        "unknown key in attribute; expected 'debug' or 'eq'",
                    ));
                }
            };
            if slot.is_some() {
                return Err(syn::Error::new(
                    flag.key.span(),
                    format!("duplicate key '{}' in attribute", flag.key),
                ));
            }
            *slot = Some(flag.value);
        }
        Ok(cfg)
    }
}

/// `key = true|false` 形式的开关
pub(crate) struct BoolFlag {
    pub(crate) key: syn::Ident,
    pub(crate) value: bool,
}

impl Parse for BoolFlag {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        let expr: syn::Expr = input.parse()?;
        match expr {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Bool(b),
                ..
            }) => Ok(Self {
                key,
                value: b.value(),
            }),
            other => Err(syn::Error::new(
                other.span(),
                format!("expected boolean literal for '{key}'"),
            )),
        }
    }
}
