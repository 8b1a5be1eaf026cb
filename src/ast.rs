//! # Go Expression Syntax Tree
//!
//! Arena-allocated syntax tree for the subset of Go that the unparser renders:
//! expressions and the type constructors that can appear in expression
//! position (`[]T`, `map[K]V`, `func(...)...`, `struct{...}`, ...).
//!
//! ## Architecture
//!
//! - **Nodes**: expressions and field groups live in typed arenas (`SpannedArena<T>`)
//!   and are referenced through `Id<T>` handles.
//! - **Lists**: call arguments, composite elements, field groups and name lists are
//!   stored in centralized buffers (`ExtraData`) and referenced by `ListRef<T>`.
//! - **Spans**: source locations sit in side tables; rendering never reads them.
//! - **Symbols**: identifiers and literal raw text are interned once in `Interner`.
//!
//! The tree is built by an external parser (or `crate::builder::TreeBuilder`) and is
//! read-only afterwards.

use ast_derive::WalkAst;
use core::marker::PhantomData;
use core::ops::Index;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::{BuildHasher, BuildHasherDefault, Hasher, RandomState};

// =============================================================================
// Core Foundation Types
// =============================================================================

/// Byte range in the source the node was parsed from.
///
/// Positions are stored as `u32` to save memory, limiting file size to 4GB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Creates a new span from usize positions.
    ///
    /// # Panics
    /// In debug builds, panics if positions exceed `u32::MAX`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= u32::MAX as usize);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type-safe identifier for arena-allocated nodes.
///
/// The phantom marker keeps an `Id<Field>` from indexing the expression arena.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(transparent)]
pub struct Id<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn to_usize(&self) -> usize {
        self.raw as usize
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.raw
    }
}

/// Typed reference into a centralized list buffer.
///
/// Each `ListRef` points to a contiguous slice of the matching buffer in
/// `AstArena::extras`.
#[derive(Debug, PartialEq, Eq)]
pub struct ListRef<T> {
    start: u32,
    len: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for ListRef<T> {}

impl<T> Clone for ListRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Default for ListRef<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> ListRef<T> {
    pub const EMPTY: Self = Self {
        start: 0,
        len: 0,
        _marker: PhantomData,
    };

    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        Self {
            start,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn start(&self) -> u32 {
        self.start
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Returns the end index (exclusive).
    #[inline]
    pub const fn end(&self) -> u32 {
        self.start.saturating_add(self.len)
    }
}

// =============================================================================
// Symbol Interning System
// =============================================================================

/// Interned string symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

/// Identifier names are plain symbols.
pub type Ident = Symbol;

impl Symbol {
    #[inline]
    pub const fn from_raw(v: u32) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Identity hasher for u64 values (used for symbol hash buckets).
#[derive(Default)]
struct U64IdentityHasher(u64);

impl Hasher for U64IdentityHasher {
    fn write(&mut self, _b: &[u8]) {
        unreachable!("U64IdentityHasher only supports write_u64")
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

type U64IdentityBuild = BuildHasherDefault<U64IdentityHasher>;

/// String interner for identifiers and literal raw text.
///
/// Symbols are stored once and looked up via hash buckets keyed by a seeded hash.
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    buckets: HashMap<u64, SmallVec<[Symbol; 1]>, U64IdentityBuild>,
    state: RandomState,
}

impl Interner {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.strings.reserve(additional);
        self.buckets.reserve(additional);
    }

    /// Number of distinct strings interned so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Interns a string and returns its symbol.
    ///
    /// If the string already exists, returns the existing symbol.
    pub fn intern(&mut self, s: &str) -> Symbol {
        let h = self.state.hash_one(s);
        let entry = self.buckets.entry(h).or_default();

        for &sym in entry.iter() {
            if self.strings[sym.0 as usize].as_ref() == s {
                return sym;
            }
        }

        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(s.into());
        entry.push(sym);
        sym
    }

    /// Resolves a symbol back to its string.
    ///
    /// # Panics
    /// Panics if the symbol was not produced by this interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }

    /// Resolves a symbol, returning `None` if it is foreign to this interner.
    #[inline]
    pub fn try_resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.0 as usize).map(AsRef::as_ref)
    }
}

// =============================================================================
// Arena Allocation
// =============================================================================

/// Arena for nodes with associated spans.
///
/// Stores nodes and their spans in parallel vectors.
#[derive(Debug)]
pub struct SpannedArena<T> {
    data: Vec<T>,
    spans: Vec<Span>,
}

impl<T> Default for SpannedArena<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            spans: Vec::new(),
        }
    }
}

impl<T> SpannedArena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
        self.spans.reserve(additional);
    }

    /// Allocates a node with its span and returns an ID.
    #[inline]
    pub fn alloc(&mut self, node: T, span: Span) -> Id<T> {
        let id = Id::from_raw(self.data.len() as u32);
        self.data.push(node);
        self.spans.push(span);
        id
    }

    #[inline]
    pub fn get(&self, id: Id<T>) -> &T {
        &self.data[id.to_usize()]
    }

    /// Like [`get`](Self::get), but `None` for ids this arena never handed out.
    #[inline]
    pub fn try_get(&self, id: Id<T>) -> Option<&T> {
        self.data.get(id.to_usize())
    }

    #[inline]
    pub fn span(&self, id: Id<T>) -> Span {
        self.spans[id.to_usize()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Index<Id<T>> for SpannedArena<T> {
    type Output = T;
    fn index(&self, id: Id<T>) -> &T {
        self.get(id)
    }
}

// =============================================================================
// Type Aliases for Node IDs
// =============================================================================

pub type ExprId = Id<Expr>;
pub type FieldId = Id<Field>;

// =============================================================================
// Centralized List Storage
// =============================================================================

/// Buffers that every `ListRef<T>` points into.
#[derive(Debug, Default)]
pub struct ExtraData {
    pub idents: Vec<Ident>,
    pub exprs: Vec<ExprId>,
    pub fields: Vec<FieldId>,
}

// =============================================================================
// Main AST Arena
// =============================================================================

/// Central arena holding all nodes and list buffers.
#[derive(Debug, Default)]
pub struct AstArena {
    pub exprs: SpannedArena<Expr>,
    pub fields: SpannedArena<Field>,
    pub extras: ExtraData,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn push_list<T>(buf: &mut Vec<T>, items: impl IntoIterator<Item = T>) -> ListRef<T> {
        let start = buf.len();
        buf.extend(items);
        let len = buf.len() - start;
        debug_assert!(start <= u32::MAX as usize);
        debug_assert!(len <= u32::MAX as usize);
        ListRef::new(start as u32, len as u32)
    }

    #[inline]
    fn slice<T>(buf: &[T], r: ListRef<T>) -> &[T] {
        &buf[r.start() as usize..r.end() as usize]
    }

    #[inline]
    fn try_slice<T>(buf: &[T], r: ListRef<T>) -> Option<&[T]> {
        buf.get(r.start() as usize..r.end() as usize)
    }

    // Node allocation

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr, span: Span) -> ExprId {
        self.exprs.alloc(expr, span)
    }

    #[inline]
    pub fn alloc_field(&mut self, field: Field, span: Span) -> FieldId {
        self.fields.alloc(field, span)
    }

    #[inline]
    pub fn expr_span(&self, id: ExprId) -> Span {
        self.exprs.span(id)
    }

    // List Builders

    pub fn list_idents(&mut self, i: impl IntoIterator<Item = Ident>) -> ListRef<Ident> {
        Self::push_list(&mut self.extras.idents, i)
    }

    pub fn list_exprs(&mut self, i: impl IntoIterator<Item = ExprId>) -> ListRef<ExprId> {
        Self::push_list(&mut self.extras.exprs, i)
    }

    pub fn list_fields(&mut self, i: impl IntoIterator<Item = FieldId>) -> ListRef<FieldId> {
        Self::push_list(&mut self.extras.fields, i)
    }

    // List Accessors

    pub fn idents(&self, r: ListRef<Ident>) -> &[Ident] {
        Self::slice(&self.extras.idents, r)
    }

    pub fn exprs_list(&self, r: ListRef<ExprId>) -> &[ExprId] {
        Self::slice(&self.extras.exprs, r)
    }

    pub fn fields_list(&self, r: ListRef<FieldId>) -> &[FieldId] {
        Self::slice(&self.extras.fields, r)
    }

    // Checked accessors, used to validate trees handed over by a parser.

    pub fn try_idents(&self, r: ListRef<Ident>) -> Option<&[Ident]> {
        Self::try_slice(&self.extras.idents, r)
    }

    pub fn try_exprs_list(&self, r: ListRef<ExprId>) -> Option<&[ExprId]> {
        Self::try_slice(&self.extras.exprs, r)
    }

    pub fn try_fields_list(&self, r: ListRef<FieldId>) -> Option<&[FieldId]> {
        Self::try_slice(&self.extras.fields, r)
    }
}

// =============================================================================
// Fields
// =============================================================================

/// One declaration group in a parameter list, result list, struct or interface.
///
/// `a, b int` is a single group with two names; `int` alone (an unnamed
/// parameter or an embedded type) has an empty name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct Field {
    pub names: ListRef<Ident>,
    pub typ: ExprId,
}

// =============================================================================
// Expressions
// =============================================================================

/// Expression or type node.
///
/// Go types appear in expression position (conversions, composite literal
/// types, `make` arguments), so type constructors share this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Expr {
    /// Identifier: `x`
    Ident(Ident),

    /// Basic literal (int, float, imaginary, rune, string)
    BasicLit(BasicLit),

    /// Selector: `x.sel`
    Selector { expr: ExprId, sel: Ident },

    /// Call or conversion: `f(args...)`
    Call { func: ExprId, args: ListRef<ExprId> },

    /// Pointer type or dereference: `*x`
    Star { expr: ExprId },

    /// Slice or array type: `[]T`
    ArrayType { elem: ExprId },

    /// Variadic parameter type: `...T`
    Ellipsis { elem: ExprId },

    /// Function literal; only its type is kept, the body is a source range.
    FuncLit { typ: ExprId, body: Span },

    /// Binary expression: `x+y`
    Binary {
        left: ExprId,
        op: BinaryOp,
        right: ExprId,
    },

    /// Slice expression: `a[lo:hi]` or `a[lo:hi:max]`
    Slice {
        expr: ExprId,
        lo: Option<ExprId>,
        hi: Option<ExprId>,
        max: Option<ExprId>,
    },

    /// Unary expression: `-x`, `<-ch`, `~T`
    Unary { op: UnaryOp, expr: ExprId },

    /// Composite literal: `T{elts...}`; the type is elided inside nested literals.
    CompositeLit {
        typ: Option<ExprId>,
        elts: ListRef<ExprId>,
    },

    /// Parenthesized expression: `(x)`
    Paren { expr: ExprId },

    /// Index expression or single-argument instantiation: `a[i]`
    Index { expr: ExprId, index: ExprId },

    /// Multi-argument instantiation: `Pair[K,V]`
    IndexList {
        expr: ExprId,
        indices: ListRef<ExprId>,
    },

    /// Key-value pair inside a composite literal: `k:v`
    KeyValue { key: ExprId, value: ExprId },

    /// Type assertion `x.(T)`; `typ` is `None` for a type-switch guard `x.(type)`.
    TypeAssert { expr: ExprId, typ: Option<ExprId> },

    /// Channel type: `chan T`, `<-chan T`, `chan<- T`
    ChanType { dir: ChanDir, elem: ExprId },

    /// Map type: `map[K]V`
    MapType { key: ExprId, value: ExprId },

    /// Interface type; each group is a method name list with a `FuncType`,
    /// or an unnamed embedded type.
    InterfaceType { methods: ListRef<FieldId> },

    /// Struct type
    StructType { fields: ListRef<FieldId> },

    /// Function type: `func(params)results`
    FuncType {
        params: ListRef<FieldId>,
        results: Option<ListRef<FieldId>>,
    },
}

/// Basic literal value, raw text as written (quotes included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: BasicLitKind,
    pub raw: Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BasicLitKind {
    Int,
    Float,
    Imag,
    Rune,
    String,
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// Bidirectional: `chan T`
    Both,
    /// Send-only: `chan<- T`
    Send,
    /// Receive-only: `<-chan T`
    Recv,
}

// =============================================================================
// Operators
// =============================================================================

/// Unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Add,   // +
    Sub,   // -
    Not,   // !
    Xor,   // ^
    Deref, // *
    Addr,  // &
    Recv,  // <-
    Tilde, // ~
}

impl UnaryOp {
    /// Go token text of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Add => "+",
            UnaryOp::Sub => "-",
            UnaryOp::Not => "!",
            UnaryOp::Xor => "^",
            UnaryOp::Deref => "*",
            UnaryOp::Addr => "&",
            UnaryOp::Recv => "<-",
            UnaryOp::Tilde => "~",
        }
    }
}

/// Binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,    // +
    Sub,    // -
    Mul,    // *
    Div,    // /
    Mod,    // %
    And,    // &
    Or,     // |
    Xor,    // ^
    Shl,    // <<
    Shr,    // >>
    AndNot, // &^
    LAnd,   // &&
    LOr,    // ||
    Eq,     // ==
    Ne,     // !=
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
}

impl BinaryOp {
    /// Go token text of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::AndNot => "&^",
            BinaryOp::LAnd => "&&",
            BinaryOp::LOr => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}
