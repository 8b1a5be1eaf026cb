use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use go_unparser::ast::{BinaryOp, ExprId};
use go_unparser::TreeBuilder;
use std::hint::black_box as bb;

// =============================================================================
// Helpers: trees are built once, outside measurement
// =============================================================================

/// `a0.a1...aN`
fn selector_chain(b: &mut TreeBuilder, depth: usize) -> ExprId {
    let names: Vec<String> = (1..depth).map(|i| format!("a{i}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    b.path("a0", &names)
}

/// `x0+x1+...+xN`, left-nested.
fn binary_chain(b: &mut TreeBuilder, len: usize) -> ExprId {
    let mut acc = b.ident("x0");
    for i in 1..len {
        let rhs = b.ident(&format!("x{i}"));
        acc = b.binary(acc, BinaryOp::Add, rhs);
    }
    acc
}

/// `f(g(h(...)))`: one call per level, each with two literal arguments.
fn call_tower(b: &mut TreeBuilder, depth: usize) -> ExprId {
    let mut inner = b.int("0");
    for i in 0..depth {
        let callee = b.ident(&format!("f{i}"));
        let lit = b.string("s");
        inner = b.call(callee, [inner, lit]);
    }
    inner
}

/// `func(p0 T0,...,pN TN)(r0 R0,...,rN RN)`
fn wide_signature(b: &mut TreeBuilder, width: usize) -> ExprId {
    let params: Vec<_> = (0..width)
        .map(|i| {
            let typ = b.ident(&format!("T{i}"));
            let name = format!("p{i}");
            b.field(&[name.as_str()], typ)
        })
        .collect();
    let results: Vec<_> = (0..width)
        .map(|i| {
            let typ = b.ident(&format!("R{i}"));
            let name = format!("r{i}");
            b.field(&[name.as_str()], typ)
        })
        .collect();
    b.func_type(params, Some(results))
}

// =============================================================================
// Benchmark: render throughput per tree shape
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut b = TreeBuilder::new();
    let cases = [
        ("selector_chain_64", selector_chain(&mut b, 64)),
        ("binary_chain_256", binary_chain(&mut b, 256)),
        ("call_tower_128", call_tower(&mut b, 128)),
        ("wide_signature_64", wide_signature(&mut b, 64)),
    ];

    let mut group = c.benchmark_group("render");
    for (name, root) in cases {
        let len = b.render(root).len();
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("fresh_string", name), &root, |bench, &root| {
            let up = b.unparser();
            bench.iter(|| bb(up.render(bb(root))));
        });

        group.bench_with_input(BenchmarkId::new("reused_buffer", name), &root, |bench, &root| {
            let up = b.unparser();
            let mut out = String::with_capacity(len);
            bench.iter(|| {
                out.clear();
                up.write_expr(&mut out, bb(root));
                bb(out.len());
            });
        });
    }
    group.finish();
}

// =============================================================================
// Benchmark: validation overhead of try_render
// =============================================================================

fn bench_checked(c: &mut Criterion) {
    let mut b = TreeBuilder::new();
    let root = call_tower(&mut b, 128);

    c.bench_function("try_render/call_tower_128", |bench| {
        let up = b.unparser();
        bench.iter(|| bb(up.try_render(bb(root))));
    });
}

criterion_group!(benches, bench_render, bench_checked);
criterion_main!(benches);
