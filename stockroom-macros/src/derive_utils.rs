use quote::ToTokens;
use std::collections::HashSet;
use syn::{Attribute, Token, punctuated::Punctuated};

/// 在 attrs 上合并派生：required 在前，用户已声明的派生去重后保留在后，
/// 其他属性（`#[serde(..)]` 等）原样保留在 derive 之后。
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let mut retained = Vec::with_capacity(attrs.len());
    let mut declared = Vec::new();
    for attr in attrs.drain(..) {
        if !attr.path().is_ident("derive") {
            retained.push(attr);
            continue;
        }
        match attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated) {
            Ok(list) => declared.extend(list),
            // 无法解析的 derive 交给编译器报错
            Err(_) => retained.push(attr),
        }
    }

    let mut seen = HashSet::<String>::new();
    let merged: Vec<syn::Path> = required
        .into_iter()
        .chain(declared)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    let derive: Attribute = syn::parse_quote!(#[derive(#(#merged),*)]);
    *attrs = std::iter::once(derive).chain(retained).collect();
}

// 归一化 derive 的 key，避免 Serialize 与 serde::Serialize 重复
fn derive_key(p: &syn::Path) -> String {
    match p.segments.last() {
        Some(last) => match last.ident.to_string().as_str() {
            name @ ("Serialize" | "Deserialize") => format!("serde::{name}"),
            name => name.to_string(),
        },
        None => p.to_token_stream().to_string(),
    }
}
