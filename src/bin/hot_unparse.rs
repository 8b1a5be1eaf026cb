// src/bin/hot_unparse.rs
//
// Hot loop for profiling the unparser:
//   cargo run --release --bin hot_unparse -- --seconds 3 --items 20000 --depth 4
use go_unparser::ast::{BinaryOp, ChanDir, ExprId, UnaryOp};
use go_unparser::TreeBuilder;
use std::hint::black_box as bb;
use std::time::{Duration, Instant};

// ----------------- arg parsing -----------------

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == key {
            return it.next().map(|s| s.as_str());
        }
    }
    None
}

fn arg_usize(args: &[String], key: &str, default: usize) -> usize {
    arg_value(args, key)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn arg_f64(args: &[String], key: &str, default: f64) -> f64 {
    arg_value(args, key)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

// ----------------- tree -----------------

/// One statement-sized expression per item:
/// `pkgI.a.b...F(x+1,[]T{k:<-ch},s[lo:hi:max],func(a,b int)(n int,err error))`
fn build_items(b: &mut TreeBuilder, items: usize, depth: usize) -> Vec<ExprId> {
    let sels: Vec<String> = (0..depth).map(|d| format!("s{d}")).collect();
    let sels: Vec<&str> = sels.iter().map(String::as_str).collect();

    (0..items)
        .map(|i| {
            let pkg = format!("pkg{}", i % 64);
            let callee = b.path(&pkg, &sels);

            let x = b.ident("x");
            let one = b.int("1");
            let sum = b.binary(x, BinaryOp::Add, one);

            let elem = b.ident("T");
            let arr = b.array_type(elem);
            let key = b.ident("k");
            let ch_elem = b.ident("int");
            let ch = b.chan_type(ChanDir::Recv, ch_elem);
            let recv = b.unary(UnaryOp::Recv, ch);
            let kv = b.key_value(key, recv);
            let lit = b.composite(Some(arr), [kv]);

            let s = b.ident("s");
            let lo = b.ident("lo");
            let hi = b.ident("hi");
            let max = b.ident("max");
            let sl = b.slice(s, Some(lo), Some(hi), Some(max));

            let int_t = b.ident("int");
            let params = b.field(&["a", "b"], int_t);
            let n_t = b.ident("int");
            let n = b.field(&["n"], n_t);
            let err_t = b.ident("error");
            let err = b.field(&["err"], err_t);
            let sig = b.func_type([params], Some(vec![n, err]));

            b.call(callee, [sum, lit, sl, sig])
        })
        .collect()
}

// ----------------- hot loop -----------------

#[inline(never)]
fn render_all_once(b: &TreeBuilder, roots: &[ExprId]) -> u64 {
    let up = b.unparser();
    let mut out = String::with_capacity(256);
    let mut sum: u64 = 0;
    for &id in roots {
        out.clear();
        up.write_expr(&mut out, id);
        sum = sum.wrapping_add(out.len() as u64);
        sum ^= (out.as_bytes()[out.len() / 2] as u64).wrapping_mul(0xA24B_AED4_963E_E407);
    }
    bb(sum);
    sum
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let seconds = arg_f64(&args, "--seconds", 3.0);
    let items = arg_usize(&args, "--items", 20_000);
    let depth = arg_usize(&args, "--depth", 4);

    // Each item allocates 30 + depth expressions over a small name set.
    let mut b = TreeBuilder::with_capacity(items * (30 + depth), 96 + depth);
    let roots = build_items(&mut b, items, depth);

    let dur = Duration::from_secs_f64(seconds);
    let start = Instant::now();

    let mut iters: u64 = 0;
    let mut acc: u64 = 0;

    while start.elapsed() < dur {
        acc ^= render_all_once(&b, &roots);
        iters += 1;
    }

    eprintln!("hot_unparse done: iters={iters}, checksum={acc}, items={items}, depth={depth}");
    bb(acc);
}
