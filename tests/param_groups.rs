// tests/param_groups.rs
use go_unparser::ast::{AstArena, Expr, ExprId, Interner, Span};
use go_unparser::builder::{resolve_param_list, ParamDecl};
use go_unparser::TreeBuilder;

/// Parameter entry the way a parser emits it: names, then an optional type name.
fn entry(b: &mut TreeBuilder, names: &[&str], typ: Option<&str>, at: usize) -> ParamDecl {
    let names = names.iter().map(|n| b.interner_mut().intern(n)).collect();
    let typ = typ.map(|t| b.ident(t));
    ParamDecl {
        names,
        typ,
        span: Span::new(at, at + 1),
    }
}

fn signature(b: &mut TreeBuilder, entries: Vec<ParamDecl>) -> ExprId {
    let groups = resolve_param_list(b.arena_mut(), entries);
    b.func_type(groups, None)
}

#[test]
fn pending_names_join_the_next_typed_entry() {
    // func(s1, s2 string)
    let mut b = TreeBuilder::new();
    let entries = vec![
        entry(&mut b, &["s1"], None, 5),
        entry(&mut b, &["s2"], Some("string"), 9),
    ];
    let sig = signature(&mut b, entries);
    assert_eq!(b.render(sig), "func(s1,s2 string)");
}

#[test]
fn group_span_starts_at_first_pending_name() {
    let mut b = TreeBuilder::new();
    let entries = vec![
        entry(&mut b, &["a"], None, 5),
        entry(&mut b, &["b"], None, 8),
        entry(&mut b, &["c"], Some("int"), 11),
    ];
    let groups = resolve_param_list(b.arena_mut(), entries);
    assert_eq!(groups.len(), 1);
    assert_eq!(b.arena().fields.span(groups[0]), Span::new(5, 12));
}

#[test]
fn separate_groups_stay_separate() {
    // func(s1, s2 string, i int)
    let mut b = TreeBuilder::new();
    let entries = vec![
        entry(&mut b, &["s1"], None, 0),
        entry(&mut b, &["s2"], Some("string"), 1),
        entry(&mut b, &["i"], Some("int"), 2),
    ];
    let sig = signature(&mut b, entries);
    assert_eq!(b.render(sig), "func(s1,s2 string,i int)");
}

#[test]
fn repeated_type_is_not_merged_across_groups() {
    // func(s1 string, s2 string): two declaration groups, two type tokens.
    let mut b = TreeBuilder::new();
    let entries = vec![
        entry(&mut b, &["s1"], Some("string"), 0),
        entry(&mut b, &["s2"], Some("string"), 1),
    ];
    let sig = signature(&mut b, entries);
    assert_eq!(b.render(sig), "func(s1 string,s2 string)");
}

#[test]
fn trailing_untyped_entries_are_types() {
    // func(string, int)
    let mut b = TreeBuilder::new();
    let entries = vec![
        entry(&mut b, &["string"], None, 0),
        entry(&mut b, &["int"], None, 1),
    ];
    let groups = resolve_param_list(b.arena_mut(), entries);
    assert_eq!(groups.len(), 2);
    for &g in &groups {
        let field = b.arena().fields[g];
        assert!(field.names.is_empty());
        assert!(matches!(b.arena().exprs[field.typ], Expr::Ident(_)));
    }

    let sig = b.func_type(groups, None);
    assert_eq!(b.render(sig), "func(string,int)");
}

#[test]
fn empty_parameter_list() {
    let mut arena = AstArena::new();
    assert!(resolve_param_list(&mut arena, Vec::new()).is_empty());
}

#[test]
fn builder_round_trips_parts() {
    let mut b = TreeBuilder::new();
    let x = b.ident("x");
    let (arena, interner) = b.into_parts();

    let b = TreeBuilder::from_parts(arena, interner);
    assert_eq!(b.render(x), "x");
    assert_eq!(b.interner().len(), 1);
}

#[test]
fn interner_deduplicates() {
    let mut interner = Interner::new();
    let a = interner.intern("fmt");
    let b = interner.intern("fmt");
    let c = interner.intern("os");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.resolve(c), "os");
    assert_eq!(interner.len(), 2);
}

#[test]
fn parser_spans_are_kept_beside_the_tree() {
    let mut arena = AstArena::new();
    let mut interner = Interner::new();
    let x = interner.intern("x");
    let id = arena.alloc_expr(Expr::Ident(x), Span::new(3, 4));
    let star = arena.alloc_expr(Expr::Star { expr: id }, Span::new(2, 4));

    assert_eq!(arena.expr_span(id), Span::new(3, 4));
    assert_eq!(arena.expr_span(star), Span::new(2, 4));
    assert_eq!(go_unparser::render(&arena, &interner, star), "*x");
}

#[test]
fn presized_builder_renders_like_a_default_one() {
    let mut b = TreeBuilder::with_capacity(16, 8);
    let sel = b.path("bytes", &["Buffer"]);
    let ptr = b.star(sel);
    assert_eq!(b.render(ptr), "*bytes.Buffer");
    assert_eq!(b.interner().len(), 2);
}
