use thiserror::Error;

use crate::ast::{AstArena, Expr, ExprId, FieldId, Interner, ListRef, Symbol};

/// Which list buffer a dangling `ListRef` points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Idents,
    Exprs,
    Fields,
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ListKind::Idents => "ident",
            ListKind::Exprs => "expr",
            ListKind::Fields => "field",
        })
    }
}

/// A handle in the tree that does not belong to the arena or interner it was
/// rendered against.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("expression #{id} out of range (arena holds {len})")]
    DanglingExpr { id: u32, len: usize },
    #[error("field #{id} out of range (arena holds {len})")]
    DanglingField { id: u32, len: usize },
    #[error("symbol #{sym} out of range (interner holds {len})")]
    DanglingSymbol { sym: u32, len: usize },
    #[error("{kind} list {start}..{end} out of range (buffer holds {cap})")]
    DanglingList {
        kind: ListKind,
        start: u32,
        end: u32,
        cap: usize,
    },
    #[error("expression #{parent} refers to #{child}, which was not allocated before it")]
    ForwardRef { parent: u32, child: u32 },
}

/// Validates every handle reachable from `root`.
///
/// Arenas are filled bottom-up, so every child must sit at a lower index than
/// the expression that owns it; this also rules out cycles. A tree that passes
/// can be rendered without panicking.
pub fn check_expr(arena: &AstArena, interner: &Interner, root: ExprId) -> Result<(), TreeError> {
    Checker { arena, interner }.node(root)
}

struct Checker<'a> {
    arena: &'a AstArena,
    interner: &'a Interner,
}

impl Checker<'_> {
    /// Checks `child` of `parent`, then descends into it.
    fn child(&self, parent: ExprId, child: ExprId) -> Result<(), TreeError> {
        self.lookup(child)?;
        if child.raw() >= parent.raw() {
            return Err(TreeError::ForwardRef {
                parent: parent.raw(),
                child: child.raw(),
            });
        }
        self.node(child)
    }

    fn lookup(&self, id: ExprId) -> Result<Expr, TreeError> {
        self.arena
            .exprs
            .try_get(id)
            .copied()
            .ok_or(TreeError::DanglingExpr {
                id: id.raw(),
                len: self.arena.exprs.len(),
            })
    }

    fn node(&self, id: ExprId) -> Result<(), TreeError> {
        let sub = |child| self.child(id, child);
        match self.lookup(id)? {
            Expr::Ident(name) => self.symbol(name),
            Expr::BasicLit(lit) => self.symbol(lit.raw),
            Expr::Selector { expr, sel } => {
                sub(expr)?;
                self.symbol(sel)
            }
            Expr::Call { func, args } => {
                sub(func)?;
                self.exprs(id, args)
            }
            Expr::Star { expr }
            | Expr::Paren { expr }
            | Expr::Unary { expr, .. }
            | Expr::ArrayType { elem: expr }
            | Expr::Ellipsis { elem: expr }
            | Expr::ChanType { elem: expr, .. }
            | Expr::FuncLit { typ: expr, .. } => sub(expr),
            Expr::Binary { left, right, .. } => {
                sub(left)?;
                sub(right)
            }
            Expr::Index { expr, index } => {
                sub(expr)?;
                sub(index)
            }
            Expr::KeyValue { key, value } | Expr::MapType { key, value } => {
                sub(key)?;
                sub(value)
            }
            Expr::Slice { expr, lo, hi, max } => {
                sub(expr)?;
                [lo, hi, max]
                    .into_iter()
                    .flatten()
                    .try_for_each(sub)
            }
            Expr::CompositeLit { typ, elts } => {
                if let Some(typ) = typ {
                    sub(typ)?;
                }
                self.exprs(id, elts)
            }
            Expr::IndexList { expr, indices } => {
                sub(expr)?;
                self.exprs(id, indices)
            }
            Expr::TypeAssert { expr, typ } => {
                sub(expr)?;
                typ.map_or(Ok(()), sub)
            }
            Expr::InterfaceType { methods: fields } | Expr::StructType { fields } => {
                self.fields(id, fields)
            }
            Expr::FuncType { params, results } => {
                self.fields(id, params)?;
                results.map_or(Ok(()), |results| self.fields(id, results))
            }
        }
    }

    fn exprs(&self, parent: ExprId, list: ListRef<ExprId>) -> Result<(), TreeError> {
        let items = self
            .arena
            .try_exprs_list(list)
            .ok_or_else(|| self.dangling(ListKind::Exprs, list.start(), list.end()))?;
        items.iter().try_for_each(|&id| self.child(parent, id))
    }

    fn fields(&self, parent: ExprId, list: ListRef<FieldId>) -> Result<(), TreeError> {
        let items = self
            .arena
            .try_fields_list(list)
            .ok_or_else(|| self.dangling(ListKind::Fields, list.start(), list.end()))?;
        items.iter().try_for_each(|&id| self.field(parent, id))
    }

    /// Field groups own no expression index of their own; their type is a
    /// child of the expression holding the group.
    fn field(&self, parent: ExprId, id: FieldId) -> Result<(), TreeError> {
        let field = self
            .arena
            .fields
            .try_get(id)
            .ok_or(TreeError::DanglingField {
                id: id.raw(),
                len: self.arena.fields.len(),
            })?;
        let names = self
            .arena
            .try_idents(field.names)
            .ok_or_else(|| self.dangling(ListKind::Idents, field.names.start(), field.names.end()))?;
        names.iter().try_for_each(|&name| self.symbol(name))?;
        self.child(parent, field.typ)
    }

    fn symbol(&self, sym: Symbol) -> Result<(), TreeError> {
        match self.interner.try_resolve(sym) {
            Some(_) => Ok(()),
            None => Err(TreeError::DanglingSymbol {
                sym: sym.as_u32(),
                len: self.interner.len(),
            }),
        }
    }

    fn dangling(&self, kind: ListKind, start: u32, end: u32) -> TreeError {
        let extras = &self.arena.extras;
        let cap = match kind {
            ListKind::Idents => extras.idents.len(),
            ListKind::Exprs => extras.exprs.len(),
            ListKind::Fields => extras.fields.len(),
        };
        TreeError::DanglingList {
            kind,
            start,
            end,
            cap,
        }
    }
}
