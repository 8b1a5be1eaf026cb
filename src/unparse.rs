//! # Canonical unparser
//!
//! Renders an expression subtree into a compact single-line string: no
//! whitespace beyond the single space between a name list and its type, no
//! line breaks, no precedence parentheses. Equal trees always render to
//! byte-identical strings, so the output works as a comparison key.
//!
//! ## Known limitations
//!
//! - Binary operands are concatenated as-is; `(a+b)*c` parsed without its
//!   `Paren` node renders `a+b*c`.
//! - Function literal bodies are not rendered; every `FuncLit` renders as
//!   [`FUNC_LIT_PLACEHOLDER`].
//! - Only receive-only channels carry a direction marker; `chan<- T` and
//!   `chan T` render identically.
//! - An unnamed field, parameter or method group renders its type alone
//!   (`func(string)`). Keys built by writing the separator unconditionally
//!   (`func( string)`) will not match.
//! - Recursion depth follows tree depth. A pathologically nested tree can
//!   overflow the stack.

use std::fmt;

use crate::ast::{AstArena, ChanDir, Expr, ExprId, FieldId, Interner, ListRef};
use crate::error::{check_expr, TreeError};

/// Rendering of every function literal, whatever its signature or body.
pub const FUNC_LIT_PLACEHOLDER: &str = "";

/// Renders `id` from `arena`, resolving names through `interner`.
///
/// # Panics
/// Panics if the subtree holds a handle foreign to `arena` or `interner`, and
/// overflows the stack on a cyclic tree; use
/// [`Unparser::try_render`] for trees from an untrusted producer.
pub fn render(arena: &AstArena, interner: &Interner, id: ExprId) -> String {
    Unparser::new(arena, interner).render(id)
}

/// Read-only view over a tree that renders any of its nodes.
///
/// Holds no state besides the two borrows, so one `Unparser` can be shared
/// across threads and reused for any number of nodes.
#[derive(Debug, Clone, Copy)]
pub struct Unparser<'a> {
    arena: &'a AstArena,
    interner: &'a Interner,
}

impl<'a> Unparser<'a> {
    pub fn new(arena: &'a AstArena, interner: &'a Interner) -> Self {
        Self { arena, interner }
    }

    pub fn render(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, id);
        out
    }

    /// Validates the subtree before rendering it.
    pub fn try_render(&self, id: ExprId) -> Result<String, TreeError> {
        if let Err(err) = check_expr(self.arena, self.interner, id) {
            tracing::debug!(%err, root = id.raw(), "refusing to render malformed tree");
            return Err(err);
        }
        Ok(self.render(id))
    }

    /// `Display` adapter, for use in `format!` and log fields.
    pub fn display(&self, id: ExprId) -> Unparsed<'a> {
        Unparsed { unparser: *self, id }
    }

    /// Appends the rendering of `id` to `out`.
    pub fn write_expr(&self, out: &mut String, id: ExprId) {
        match self.arena.exprs[id] {
            Expr::Ident(name) => out.push_str(self.interner.resolve(name)),
            Expr::BasicLit(lit) => out.push_str(self.interner.resolve(lit.raw)),
            Expr::Selector { expr, sel } => {
                self.write_expr(out, expr);
                out.push('.');
                out.push_str(self.interner.resolve(sel));
            }
            Expr::Call { func, args } => self.write_call(out, func, args),
            Expr::Star { expr } => {
                out.push('*');
                self.write_expr(out, expr);
            }
            Expr::ArrayType { elem } => {
                out.push_str("[]");
                self.write_expr(out, elem);
            }
            Expr::Ellipsis { elem } => {
                out.push_str("...");
                self.write_expr(out, elem);
            }
            Expr::FuncLit { .. } => out.push_str(FUNC_LIT_PLACEHOLDER),
            Expr::Binary { left, op, right } => {
                self.write_expr(out, left);
                out.push_str(op.as_str());
                self.write_expr(out, right);
            }
            Expr::Slice { expr, lo, hi, max } => self.write_slice(out, expr, lo, hi, max),
            Expr::Unary { op, expr } => {
                out.push_str(op.as_str());
                self.write_expr(out, expr);
            }
            Expr::CompositeLit { typ, elts } => {
                if let Some(typ) = typ {
                    self.write_expr(out, typ);
                }
                out.push('{');
                self.write_expr_list(out, elts);
                out.push('}');
            }
            Expr::Paren { expr } => {
                out.push('(');
                self.write_expr(out, expr);
                out.push(')');
            }
            Expr::Index { expr, index } => {
                self.write_expr(out, expr);
                out.push('[');
                self.write_expr(out, index);
                out.push(']');
            }
            Expr::IndexList { expr, indices } => {
                self.write_expr(out, expr);
                out.push('[');
                self.write_expr_list(out, indices);
                out.push(']');
            }
            Expr::KeyValue { key, value } => {
                self.write_expr(out, key);
                out.push(':');
                self.write_expr(out, value);
            }
            Expr::TypeAssert { expr, typ } => {
                self.write_expr(out, expr);
                out.push_str(".(");
                match typ {
                    Some(typ) => self.write_expr(out, typ),
                    None => out.push_str("type"),
                }
                out.push(')');
            }
            Expr::ChanType { dir, elem } => {
                if dir == ChanDir::Recv {
                    out.push_str("<-");
                }
                out.push_str("chan");
                self.write_expr(out, elem);
            }
            Expr::MapType { key, value } => {
                out.push_str("map[");
                self.write_expr(out, key);
                out.push(']');
                self.write_expr(out, value);
            }
            Expr::InterfaceType { methods } => {
                out.push_str("interface{");
                self.write_field_groups(out, methods, ';');
                out.push('}');
            }
            Expr::StructType { fields } => {
                out.push_str("struct{");
                self.write_field_groups(out, fields, ';');
                out.push('}');
            }
            Expr::FuncType { params, results } => self.write_func_type(out, params, results),
        }
    }

    fn write_call(&self, out: &mut String, func: ExprId, args: ListRef<ExprId>) {
        self.write_expr(out, func);
        out.push('(');
        self.write_expr_list(out, args);
        out.push(')');
    }

    // The first colon is fixed by the slice form; the second one only exists
    // in the three-index form, even when `hi` is absent.
    fn write_slice(
        &self,
        out: &mut String,
        expr: ExprId,
        lo: Option<ExprId>,
        hi: Option<ExprId>,
        max: Option<ExprId>,
    ) {
        self.write_expr(out, expr);
        out.push('[');
        if let Some(lo) = lo {
            self.write_expr(out, lo);
        }
        out.push(':');
        if let Some(hi) = hi {
            self.write_expr(out, hi);
        }
        if let Some(max) = max {
            out.push(':');
            self.write_expr(out, max);
        }
        out.push(']');
    }

    fn write_func_type(
        &self,
        out: &mut String,
        params: ListRef<FieldId>,
        results: Option<ListRef<FieldId>>,
    ) {
        out.push_str("func(");
        self.write_field_groups(out, params, ',');
        out.push(')');

        let Some(results) = results else {
            return;
        };
        let parens = self.results_need_parens(results);
        if parens {
            out.push('(');
        }
        self.write_field_groups(out, results, ',');
        if parens {
            out.push(')');
        }
    }

    /// A lone unnamed result renders bare; anything else is parenthesized.
    fn results_need_parens(&self, results: ListRef<FieldId>) -> bool {
        let groups = self.arena.fields_list(results);
        groups.len() > 1
            || groups
                .iter()
                .any(|&id| !self.arena.fields[id].names.is_empty())
    }

    fn write_field_groups(&self, out: &mut String, groups: ListRef<FieldId>, sep: char) {
        for (i, &id) in self.arena.fields_list(groups).iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            self.write_field_group(out, id);
        }
    }

    /// `a,b T` for a named group, `T` for an unnamed one.
    fn write_field_group(&self, out: &mut String, id: FieldId) {
        let field = self.arena.fields[id];
        let names = self.arena.idents(field.names);
        for (i, &name) in names.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(self.interner.resolve(name));
        }
        if !names.is_empty() {
            out.push(' ');
        }
        self.write_expr(out, field.typ);
    }

    fn write_expr_list(&self, out: &mut String, list: ListRef<ExprId>) {
        for (i, &id) in self.arena.exprs_list(list).iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_expr(out, id);
        }
    }
}

/// Lazily rendered node, see [`Unparser::display`].
#[derive(Debug, Clone, Copy)]
pub struct Unparsed<'a> {
    unparser: Unparser<'a>,
    id: ExprId,
}

impl fmt::Display for Unparsed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unparser.render(self.id))
    }
}
