//! Rust Source Parser
//!
//! Uses `syn` to collect every function body in a source file: free
//! functions, `impl` methods, trait default methods, and functions inside
//! inline modules. Test code is skipped.

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{
    parse_file, Attribute, Block, File, ImplItem, Item, ItemImpl, ItemTrait, Signature,
    TraitItem, Type,
};

/// A function found in a source file.
#[derive(Clone)]
pub struct SourceFunction {
    /// Qualified name: `name`, or `Type::name` for methods
    pub name: String,
    pub sig: Signature,
    pub body: Block,
    /// Tokens of the whole item with doc comments removed
    pub tokens: TokenStream,
}

impl SourceFunction {
    /// Unqualified name, as it appears at call sites.
    pub fn bare_name(&self) -> String {
        self.sig.ident.to_string()
    }
}

/// Parse a Rust source file and collect its functions in source order.
pub fn parse_source(source: &str) -> syn::Result<Vec<SourceFunction>> {
    let file: File = parse_file(source)?;
    let mut functions = Vec::new();
    collect_items(&file.items, &mut functions);
    Ok(functions)
}

fn collect_items(items: &[Item], out: &mut Vec<SourceFunction>) {
    for item in items {
        match item {
            Item::Fn(func) => {
                if is_test_code(&func.attrs, &func.sig) {
                    continue;
                }
                let mut stripped = func.clone();
                stripped.attrs.retain(|a| !a.path().is_ident("doc"));
                out.push(SourceFunction {
                    name: func.sig.ident.to_string(),
                    sig: func.sig.clone(),
                    body: (*func.block).clone(),
                    tokens: stripped.into_token_stream(),
                });
            }
            Item::Impl(imp) if !is_cfg_test(&imp.attrs) => collect_impl(imp, out),
            Item::Trait(tr) if !is_cfg_test(&tr.attrs) => collect_trait(tr, out),
            Item::Mod(m) if !is_cfg_test(&m.attrs) => {
                // Inline module content only; `mod foo;` has no body here
                if let Some((_, items)) = &m.content {
                    collect_items(items, out);
                }
            }
            _ => {}
        }
    }
}

fn collect_impl(imp: &ItemImpl, out: &mut Vec<SourceFunction>) {
    let owner = type_name(&imp.self_ty);
    for item in &imp.items {
        if let ImplItem::Fn(method) = item {
            if is_test_code(&method.attrs, &method.sig) {
                continue;
            }
            let mut stripped = method.clone();
            stripped.attrs.retain(|a| !a.path().is_ident("doc"));
            out.push(SourceFunction {
                name: format!("{}::{}", owner, method.sig.ident),
                sig: method.sig.clone(),
                body: method.block.clone(),
                tokens: stripped.into_token_stream(),
            });
        }
    }
}

fn collect_trait(tr: &ItemTrait, out: &mut Vec<SourceFunction>) {
    for item in &tr.items {
        let TraitItem::Fn(method) = item else {
            continue;
        };
        // Required methods have no body to measure
        let Some(body) = &method.default else {
            continue;
        };
        let mut stripped = method.clone();
        stripped.attrs.retain(|a| !a.path().is_ident("doc"));
        out.push(SourceFunction {
            name: format!("{}::{}", tr.ident, method.sig.ident),
            sig: method.sig.clone(),
            body: body.clone(),
            tokens: stripped.into_token_stream(),
        });
    }
}

/// Last path segment of an `impl` self type, e.g. `Scaled` for `Scaled<T>`.
fn type_name(ty: &Type) -> String {
    match ty {
        Type::Path(tp) => tp
            .path
            .segments
            .last()
            .map(|s| s.ident.to_string())
            .unwrap_or_default(),
        other => other.to_token_stream().to_string(),
    }
}

fn is_test_code(attrs: &[Attribute], sig: &Signature) -> bool {
    sig.ident.to_string().starts_with("test_")
        || attrs.iter().any(|a| a.path().is_ident("test"))
        || is_cfg_test(attrs)
}

fn is_cfg_test(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|a| {
        a.path().is_ident("cfg")
            && a
                .parse_args::<syn::Ident>()
                .is_ok_and(|ident| ident == "test")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(source: &str) -> Vec<String> {
        parse_source(source)
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect()
    }

    #[test]
    fn test_parse_free_functions() {
        let source = r#"
            pub fn add(a: i64, b: i64) -> i64 {
                a + b
            }

            fn helper() {}
        "#;
        assert_eq!(names(source), vec!["add", "helper"]);
    }

    #[test]
    fn test_parse_methods_and_trait_defaults() {
        let source = r#"
            struct Grid<T> { cells: Vec<T> }

            impl<T> Grid<T> {
                fn len(&self) -> usize { self.cells.len() }
            }

            trait Describe {
                fn name(&self) -> String;
                fn describe(&self) -> String { self.name() }
            }
        "#;
        assert_eq!(names(source), vec!["Grid::len", "Describe::describe"]);
    }

    #[test]
    fn test_skips_test_code() {
        let source = r#"
            fn real() {}

            #[test]
            fn checks_real() { real(); }

            fn test_helper() {}

            #[cfg(test)]
            mod tests {
                fn inside() {}
            }

            mod inner {
                fn nested() {}
            }
        "#;
        assert_eq!(names(source), vec!["real", "nested"]);
    }

    #[test]
    fn test_skips_test_only_impl_and_trait_blocks() {
        let source = r#"
            struct Grid;

            impl Grid {
                fn rows(&self) -> usize { 0 }
            }

            #[cfg(test)]
            impl Grid {
                fn fixture() -> Self { Grid }
            }

            #[cfg(test)]
            trait Assist {
                fn assist(&self) {}
            }
        "#;
        assert_eq!(names(source), vec!["Grid::rows"]);
    }

    #[test]
    fn test_doc_comments_removed_from_tokens() {
        let plain = parse_source("fn f() {}").unwrap();
        let documented = parse_source("/// Long explanation here.\nfn f() {}").unwrap();
        assert_eq!(
            plain[0].tokens.to_string(),
            documented[0].tokens.to_string()
        );
    }

    #[test]
    fn test_syntax_error() {
        assert!(parse_source("fn broken( {").is_err());
    }
}
