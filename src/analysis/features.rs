//! Per-function Feature Computation
//!
//! Walks each collected function body with `syn::visit` and measures the
//! structural properties used to predict inlining impact.

use super::parser::SourceFunction;
use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use syn::punctuated::Punctuated;
use syn::visit::{self, Visit};
use syn::{
    Block, Expr, ExprCall, ExprForLoop, ExprIf, ExprLoop, ExprMatch, ExprMethodCall, ExprWhile,
    FnArg, Local, Macro, Pat, PatIdent, ReturnType, Signature, Stmt, Token, Type,
};

/// Return types that count as simple scalars.
const PRIMITIVE_TYPES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
    "usize", "f32", "f64",
];

/// One row of the feature table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFeatures {
    pub function_name: String,
    pub file_name: String,
    pub cyclomatic_complexity: u32,
    pub parameter_count: u32,
    pub local_variable_count: u32,
    pub body_size_stmts: u32,
    pub token_count: u32,
    pub is_complex_return: u8,
    pub is_generic: u8,
    pub call_site_count: u32,
}

/// Compute feature rows for functions parsed from one file.
///
/// Call sites are matched by bare name against every call and method call
/// in the collected bodies.
pub fn extract_functions(file_name: &str, functions: &[SourceFunction]) -> Vec<FunctionFeatures> {
    let mut calls = CallCounter::default();
    for func in functions {
        calls.visit_block(&func.body);
    }

    functions
        .iter()
        .map(|func| {
            let mut body = BodyVisitor::default();
            body.visit_block(&func.body);

            FunctionFeatures {
                function_name: func.name.clone(),
                file_name: file_name.to_string(),
                cyclomatic_complexity: body.complexity,
                parameter_count: parameter_count(&func.sig),
                local_variable_count: body.locals,
                body_size_stmts: body.stmts,
                token_count: count_tokens(func.tokens.clone()),
                is_complex_return: is_complex_return(&func.sig.output) as u8,
                is_generic: is_generic(&func.sig) as u8,
                call_site_count: calls.count(&func.bare_name()),
            }
        })
        .collect()
}

/// Branch, size, and binding counts for one body.
struct BodyVisitor {
    complexity: u32,
    stmts: u32,
    locals: u32,
}

impl Default for BodyVisitor {
    fn default() -> Self {
        Self {
            complexity: 1,
            stmts: 0,
            locals: 0,
        }
    }
}

impl<'ast> Visit<'ast> for BodyVisitor {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match stmt {
            // Nested items are measured on their own, if at all
            Stmt::Item(_) => return,
            Stmt::Expr(Expr::Block(_), _) => {}
            _ => self.stmts += 1,
        }
        visit::visit_stmt(self, stmt);
    }

    fn visit_local(&mut self, local: &'ast Local) {
        self.locals += count_bindings(&local.pat);
        visit::visit_local(self, local);
    }

    fn visit_expr_if(&mut self, expr: &'ast ExprIf) {
        self.complexity += 1;
        visit::visit_expr_if(self, expr);
    }

    fn visit_expr_for_loop(&mut self, expr: &'ast ExprForLoop) {
        self.complexity += 1;
        self.locals += count_bindings(&expr.pat);
        visit::visit_expr_for_loop(self, expr);
    }

    fn visit_expr_while(&mut self, expr: &'ast ExprWhile) {
        self.complexity += 1;
        visit::visit_expr_while(self, expr);
    }

    fn visit_expr_loop(&mut self, expr: &'ast ExprLoop) {
        self.complexity += 1;
        visit::visit_expr_loop(self, expr);
    }

    fn visit_expr_match(&mut self, expr: &'ast ExprMatch) {
        self.complexity += expr.arms.len().saturating_sub(1) as u32;
        visit::visit_expr_match(self, expr);
    }

    fn visit_macro(&mut self, mac: &'ast Macro) {
        visit_macro_args(self, mac);
    }
}

/// Walk the expressions passed to a macro invocation.
///
/// Comma-separated arguments (`println!`, `assert_eq!`, `info!`) are tried
/// first, then a statement list (`vec![x; n]`). Anything else, such as a
/// `%value` tracing field, is skipped.
fn visit_macro_args<V>(visitor: &mut V, mac: &Macro)
where
    V: for<'a> Visit<'a>,
{
    if let Ok(args) = mac.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
        for expr in &args {
            visitor.visit_expr(expr);
        }
    } else if let Ok(stmts) = mac.parse_body_with(Block::parse_within) {
        // The invocation is already one statement of the enclosing body
        for stmt in &stmts {
            if !matches!(stmt, Stmt::Item(_)) {
                visit::visit_stmt(visitor, stmt);
            }
        }
    }
}

/// Identifiers bound by a pattern.
fn count_bindings(pat: &Pat) -> u32 {
    #[derive(Default)]
    struct Bindings(u32);

    impl<'ast> Visit<'ast> for Bindings {
        fn visit_pat_ident(&mut self, pat: &'ast PatIdent) {
            self.0 += 1;
            visit::visit_pat_ident(self, pat);
        }
    }

    let mut bindings = Bindings::default();
    bindings.visit_pat(pat);
    bindings.0
}

/// Calls by bare callee name.
#[derive(Default)]
struct CallCounter {
    counts: HashMap<String, u32>,
}

impl CallCounter {
    fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }
}

impl<'ast> Visit<'ast> for CallCounter {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if let Stmt::Item(_) = stmt {
            return;
        }
        visit::visit_stmt(self, stmt);
    }

    fn visit_expr_call(&mut self, call: &'ast ExprCall) {
        if let Expr::Path(path) = &*call.func {
            if let Some(segment) = path.path.segments.last() {
                *self.counts.entry(segment.ident.to_string()).or_default() += 1;
            }
        }
        visit::visit_expr_call(self, call);
    }

    fn visit_expr_method_call(&mut self, call: &'ast ExprMethodCall) {
        *self.counts.entry(call.method.to_string()).or_default() += 1;
        visit::visit_expr_method_call(self, call);
    }

    fn visit_macro(&mut self, mac: &'ast Macro) {
        visit_macro_args(self, mac);
    }
}

fn parameter_count(sig: &Signature) -> u32 {
    sig.inputs
        .iter()
        .filter(|arg| matches!(arg, FnArg::Typed(_)))
        .count() as u32
}

fn is_complex_return(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    match &**ty {
        Type::Tuple(tuple) => !tuple.elems.is_empty(),
        Type::Path(tp) if tp.qself.is_none() => match tp.path.get_ident() {
            Some(ident) => !PRIMITIVE_TYPES.iter().any(|p| ident == p),
            None => true,
        },
        _ => true,
    }
}

fn is_generic(sig: &Signature) -> bool {
    sig.generics.type_params().next().is_some()
        || sig.inputs.iter().any(|arg| match arg {
            FnArg::Typed(pat) => matches!(&*pat.ty, Type::ImplTrait(_)),
            FnArg::Receiver(_) => false,
        })
}

/// Lexer-level tokens, plus open and close for every delimited group.
///
/// A joint punctuation run (`->`, `+=`, `::`) is one token, and so is a
/// lifetime: only the last character of a run is counted.
fn count_tokens(tokens: TokenStream) -> u32 {
    tokens
        .into_iter()
        .map(|tree| match tree {
            TokenTree::Group(group) => {
                let delimiters = if group.delimiter() == Delimiter::None { 0 } else { 2 };
                delimiters + count_tokens(group.stream())
            }
            TokenTree::Punct(punct) if punct.spacing() == Spacing::Joint => 0,
            _ => 1,
        })
        .sum()
}
