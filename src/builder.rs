//! Tree construction helpers.
//!
//! `TreeBuilder` owns an arena and an interner and allocates nodes with empty
//! spans; a parser that tracks positions allocates through `AstArena` directly.
//! `resolve_param_list` turns the flat parameter entries a Go parser sees
//! (`a`, `b int`) into declaration groups (`a,b int`).

use crate::ast::{
    AstArena, BasicLit, BasicLitKind, BinaryOp, ChanDir, Expr, ExprId, Field, FieldId, Ident,
    Interner, Span, UnaryOp,
};
use crate::unparse::Unparser;

#[derive(Debug, Default)]
pub struct TreeBuilder {
    arena: AstArena,
    interner: Interner,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the expression arena and the interner.
    pub fn with_capacity(exprs: usize, symbols: usize) -> Self {
        let mut b = Self::default();
        b.arena.exprs.reserve(exprs);
        b.interner.reserve(symbols);
        b
    }

    pub fn from_parts(arena: AstArena, interner: Interner) -> Self {
        Self { arena, interner }
    }

    pub fn into_parts(self) -> (AstArena, Interner) {
        (self.arena, self.interner)
    }

    pub fn arena(&self) -> &AstArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut AstArena {
        &mut self.arena
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    pub fn unparser(&self) -> Unparser<'_> {
        Unparser::new(&self.arena, &self.interner)
    }

    pub fn render(&self, id: ExprId) -> String {
        self.unparser().render(id)
    }

    #[inline]
    fn alloc(&mut self, expr: Expr) -> ExprId {
        self.arena.alloc_expr(expr, Span::default())
    }

    // Leaves

    pub fn ident(&mut self, name: &str) -> ExprId {
        let sym = self.interner.intern(name);
        self.alloc(Expr::Ident(sym))
    }

    /// Literal with its raw source text, quotes included for strings and runes.
    pub fn lit(&mut self, kind: BasicLitKind, raw: &str) -> ExprId {
        let raw = self.interner.intern(raw);
        self.alloc(Expr::BasicLit(BasicLit { kind, raw }))
    }

    pub fn int(&mut self, raw: &str) -> ExprId {
        self.lit(BasicLitKind::Int, raw)
    }

    /// String literal; `value` is wrapped in double quotes without escaping.
    pub fn string(&mut self, value: &str) -> ExprId {
        self.lit(BasicLitKind::String, &format!("\"{value}\""))
    }

    // Expressions

    pub fn selector(&mut self, expr: ExprId, sel: &str) -> ExprId {
        let sel = self.interner.intern(sel);
        self.alloc(Expr::Selector { expr, sel })
    }

    /// `a.b.c` from `("a", ["b", "c"])`, as selectors nested over an identifier.
    pub fn path(&mut self, root: &str, sels: &[&str]) -> ExprId {
        let base = self.ident(root);
        sels.iter().fold(base, |expr, sel| self.selector(expr, sel))
    }

    pub fn call(&mut self, func: ExprId, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let args = self.arena.list_exprs(args);
        self.alloc(Expr::Call { func, args })
    }

    pub fn star(&mut self, expr: ExprId) -> ExprId {
        self.alloc(Expr::Star { expr })
    }

    pub fn array_type(&mut self, elem: ExprId) -> ExprId {
        self.alloc(Expr::ArrayType { elem })
    }

    pub fn ellipsis(&mut self, elem: ExprId) -> ExprId {
        self.alloc(Expr::Ellipsis { elem })
    }

    /// Function literal of type `typ` (a `FuncType`); `body` is the source
    /// range of its block.
    pub fn func_lit(&mut self, typ: ExprId, body: Span) -> ExprId {
        self.alloc(Expr::FuncLit { typ, body })
    }

    pub fn binary(&mut self, left: ExprId, op: BinaryOp, right: ExprId) -> ExprId {
        self.alloc(Expr::Binary { left, op, right })
    }

    pub fn slice(
        &mut self,
        expr: ExprId,
        lo: Option<ExprId>,
        hi: Option<ExprId>,
        max: Option<ExprId>,
    ) -> ExprId {
        self.alloc(Expr::Slice { expr, lo, hi, max })
    }

    pub fn unary(&mut self, op: UnaryOp, expr: ExprId) -> ExprId {
        self.alloc(Expr::Unary { op, expr })
    }

    pub fn composite(
        &mut self,
        typ: Option<ExprId>,
        elts: impl IntoIterator<Item = ExprId>,
    ) -> ExprId {
        let elts = self.arena.list_exprs(elts);
        self.alloc(Expr::CompositeLit { typ, elts })
    }

    pub fn paren(&mut self, expr: ExprId) -> ExprId {
        self.alloc(Expr::Paren { expr })
    }

    pub fn index(&mut self, expr: ExprId, index: ExprId) -> ExprId {
        self.alloc(Expr::Index { expr, index })
    }

    pub fn index_list(
        &mut self,
        expr: ExprId,
        indices: impl IntoIterator<Item = ExprId>,
    ) -> ExprId {
        let indices = self.arena.list_exprs(indices);
        self.alloc(Expr::IndexList { expr, indices })
    }

    pub fn key_value(&mut self, key: ExprId, value: ExprId) -> ExprId {
        self.alloc(Expr::KeyValue { key, value })
    }

    /// `x.(T)`, or the type-switch guard `x.(type)` when `typ` is `None`.
    pub fn type_assert(&mut self, expr: ExprId, typ: Option<ExprId>) -> ExprId {
        self.alloc(Expr::TypeAssert { expr, typ })
    }

    // Types

    pub fn chan_type(&mut self, dir: ChanDir, elem: ExprId) -> ExprId {
        self.alloc(Expr::ChanType { dir, elem })
    }

    pub fn map_type(&mut self, key: ExprId, value: ExprId) -> ExprId {
        self.alloc(Expr::MapType { key, value })
    }

    /// One declaration group: `names typ`, or just `typ` when `names` is empty.
    pub fn field(&mut self, names: &[&str], typ: ExprId) -> FieldId {
        let syms: Vec<Ident> = names.iter().map(|n| self.interner.intern(n)).collect();
        let names = self.arena.list_idents(syms);
        self.arena.alloc_field(Field { names, typ }, Span::default())
    }

    pub fn interface_type(&mut self, methods: impl IntoIterator<Item = FieldId>) -> ExprId {
        let methods = self.arena.list_fields(methods);
        self.alloc(Expr::InterfaceType { methods })
    }

    pub fn struct_type(&mut self, fields: impl IntoIterator<Item = FieldId>) -> ExprId {
        let fields = self.arena.list_fields(fields);
        self.alloc(Expr::StructType { fields })
    }

    /// `results` is `None` for a function without a result list.
    pub fn func_type(
        &mut self,
        params: impl IntoIterator<Item = FieldId>,
        results: Option<Vec<FieldId>>,
    ) -> ExprId {
        let params = self.arena.list_fields(params);
        let results = results.map(|r| self.arena.list_fields(r));
        self.alloc(Expr::FuncType { params, results })
    }
}

/// One comma-separated entry of a Go parameter list as the parser sees it.
///
/// `a, b int` arrives as `{names: [a], typ: None}` then `{names: [b], typ: int}`.
#[derive(Clone, Debug)]
pub struct ParamDecl {
    pub names: Vec<Ident>,
    pub typ: Option<ExprId>,
    pub span: Span,
}

/// Groups parameter entries into declaration groups.
///
/// Untyped entries accumulate until the next typed entry, which takes all of
/// their names. Untyped entries left at the end were types, not names
/// (`func(int, string)`), and each becomes an unnamed group.
pub fn resolve_param_list(arena: &mut AstArena, params: Vec<ParamDecl>) -> Vec<FieldId> {
    let mut out = Vec::new();
    let mut pending_names: Vec<Ident> = Vec::new();
    let mut pending_start: Option<u32> = None;

    for param in params {
        if let Some(typ) = param.typ {
            let mut names = std::mem::take(&mut pending_names);
            names.extend(param.names);

            let start = pending_start.take().unwrap_or(param.span.start);
            let span = Span {
                start,
                end: param.span.end,
            };
            let names = arena.list_idents(names);
            out.push(arena.alloc_field(Field { names, typ }, span));
        } else {
            if pending_names.is_empty() {
                pending_start = Some(param.span.start);
            }
            pending_names.extend(param.names);
        }
    }

    for name in pending_names {
        let typ = arena.alloc_expr(Expr::Ident(name), Span::default());
        let field = Field {
            names: Default::default(),
            typ,
        };
        out.push(arena.alloc_field(field, Span::default()));
    }

    out
}
