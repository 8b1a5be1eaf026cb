// tests/malformed_trees.rs
use go_unparser::ast::{AstArena, BinaryOp, Expr, Field, Id, Interner, ListRef, Span, Symbol};
use go_unparser::error::{check_expr, ListKind};
use go_unparser::{TreeBuilder, TreeError, Unparser};

#[test]
fn well_formed_tree_renders_through_try_render() {
    let mut b = TreeBuilder::new();
    let x = b.path("a", &["b", "c"]);
    assert_eq!(b.unparser().try_render(x), Ok("a.b.c".to_string()));
}

#[test]
fn root_outside_the_arena_is_rejected() {
    let b = TreeBuilder::new();
    let err = b.unparser().try_render(Id::from_raw(3)).unwrap_err();
    assert_eq!(err, TreeError::DanglingExpr { id: 3, len: 0 });
}

#[test]
fn dangling_child_is_rejected() {
    let mut b = TreeBuilder::new();
    let bogus = Id::from_raw(99);
    let root = b.arena_mut().alloc_expr(Expr::Star { expr: bogus }, Span::default());
    let err = b.unparser().try_render(root).unwrap_err();
    assert_eq!(err, TreeError::DanglingExpr { id: 99, len: 1 });
}

#[test]
fn self_referencing_node_is_rejected() {
    let mut b = TreeBuilder::new();
    let root = b
        .arena_mut()
        .alloc_expr(Expr::Star { expr: Id::from_raw(0) }, Span::default());
    assert_eq!(root.raw(), 0);

    let err = b.unparser().try_render(root).unwrap_err();
    assert_eq!(err, TreeError::ForwardRef { parent: 0, child: 0 });
}

#[test]
fn cycle_through_an_ancestor_is_rejected() {
    // #0 = (#1), #1 = *#0
    let mut b = TreeBuilder::new();
    let arena = b.arena_mut();
    let outer = arena.alloc_expr(Expr::Paren { expr: Id::from_raw(1) }, Span::default());
    arena.alloc_expr(Expr::Star { expr: outer }, Span::default());

    let err = b.unparser().try_render(outer).unwrap_err();
    assert_eq!(err, TreeError::ForwardRef { parent: 0, child: 1 });
}

#[test]
fn field_type_cycling_back_to_its_struct_is_rejected() {
    let mut b = TreeBuilder::new();
    let arena = b.arena_mut();
    let field = arena.alloc_field(
        Field {
            names: ListRef::EMPTY,
            typ: Id::from_raw(0),
        },
        Span::default(),
    );
    let fields = arena.list_fields([field]);
    let root = arena.alloc_expr(Expr::StructType { fields }, Span::default());

    let err = b.unparser().try_render(root).unwrap_err();
    assert_eq!(err, TreeError::ForwardRef { parent: 0, child: 0 });
}

#[test]
fn shared_subtrees_are_accepted() {
    // x+x, both operands one node
    let mut b = TreeBuilder::new();
    let x = b.ident("x");
    let sum = b.binary(x, BinaryOp::Add, x);
    assert_eq!(b.unparser().try_render(sum), Ok("x+x".to_string()));
}

#[test]
fn foreign_symbol_is_rejected() {
    let mut arena = AstArena::new();
    let interner = Interner::new();
    let root = arena.alloc_expr(Expr::Ident(Symbol::from_raw(0)), Span::default());

    let err = Unparser::new(&arena, &interner).try_render(root).unwrap_err();
    assert_eq!(err, TreeError::DanglingSymbol { sym: 0, len: 0 });
}

#[test]
fn dangling_argument_list_is_rejected() {
    let mut b = TreeBuilder::new();
    let f = b.ident("f");
    let args = ListRef::new(4, 2);
    let root = b
        .arena_mut()
        .alloc_expr(Expr::Call { func: f, args }, Span::default());

    let err = b.unparser().try_render(root).unwrap_err();
    assert_eq!(
        err,
        TreeError::DanglingList {
            kind: ListKind::Exprs,
            start: 4,
            end: 6,
            cap: 0,
        }
    );
}

#[test]
fn dangling_field_name_list_is_rejected() {
    let mut b = TreeBuilder::new();
    let int_t = b.ident("int");
    let arena = b.arena_mut();
    let field = arena.alloc_field(
        Field {
            names: ListRef::new(0, 1),
            typ: int_t,
        },
        Span::default(),
    );
    let fields = arena.list_fields([field]);
    let root = arena.alloc_expr(Expr::StructType { fields }, Span::default());

    let err = b.unparser().try_render(root).unwrap_err();
    assert!(matches!(
        err,
        TreeError::DanglingList {
            kind: ListKind::Idents,
            ..
        }
    ));
}

#[test]
fn dangling_result_field_is_rejected() {
    let mut b = TreeBuilder::new();
    let arena = b.arena_mut();
    let results = arena.list_fields([Id::from_raw(7)]);
    let root = arena.alloc_expr(
        Expr::FuncType {
            params: ListRef::EMPTY,
            results: Some(results),
        },
        Span::default(),
    );

    let err = b.unparser().try_render(root).unwrap_err();
    assert_eq!(err, TreeError::DanglingField { id: 7, len: 0 });
}

#[test]
fn overflowing_list_ref_is_rejected_not_panicking() {
    let mut b = TreeBuilder::new();
    let t = b.ident("T");
    let elts = ListRef::new(u32::MAX, 5);
    let root = b.arena_mut().alloc_expr(
        Expr::CompositeLit {
            typ: Some(t),
            elts,
        },
        Span::default(),
    );
    assert!(check_expr(b.arena(), b.interner(), root).is_err());
}

#[test]
fn error_messages_name_the_broken_handle() {
    let err = TreeError::DanglingExpr { id: 3, len: 1 };
    assert_eq!(err.to_string(), "expression #3 out of range (arena holds 1)");

    let err = TreeError::DanglingList {
        kind: ListKind::Fields,
        start: 2,
        end: 4,
        cap: 1,
    };
    assert_eq!(err.to_string(), "field list 2..4 out of range (buffer holds 1)");

    let err = TreeError::ForwardRef { parent: 2, child: 5 };
    assert_eq!(
        err.to_string(),
        "expression #2 refers to #5, which was not allocated before it"
    );
}

#[test]
#[should_panic]
fn unchecked_render_panics_on_foreign_handle() {
    let b = TreeBuilder::new();
    b.render(Id::from_raw(0));
}
