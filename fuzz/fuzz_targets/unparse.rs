// fuzz_targets/unparse.rs
#![no_main]

use go_unparser::ast::{BinaryOp, ChanDir, ExprId, Id, UnaryOp};
use go_unparser::TreeBuilder;
use libfuzzer_sys::fuzz_target;

const NAMES: [&str; 6] = ["a", "b", "x", "int", "string", "error"];

// Bytes drive a stack machine: each opcode pops its children and pushes the
// new node. Opcodes missing children are skipped.
fn build(data: &[u8], b: &mut TreeBuilder) -> Option<ExprId> {
    let mut stack: Vec<ExprId> = Vec::new();
    let mut bytes = data.iter().copied();

    while let Some(op) = bytes.next() {
        let arg = bytes.next().unwrap_or(0);
        let name = NAMES[arg as usize % NAMES.len()];
        let node = match op % 16 {
            0 => b.ident(name),
            1 => b.int(&arg.to_string()),
            2 => match stack.pop() {
                Some(e) => b.selector(e, name),
                None => continue,
            },
            3 => {
                let n = (arg as usize % 4).min(stack.len());
                let args = stack.split_off(stack.len() - n);
                match stack.pop() {
                    Some(f) => b.call(f, args),
                    None => continue,
                }
            }
            4 => match stack.pop() {
                Some(e) => b.star(e),
                None => continue,
            },
            5 => match (stack.pop(), stack.pop()) {
                (Some(r), Some(l)) => b.binary(l, BinaryOp::Add, r),
                _ => continue,
            },
            6 => match stack.pop() {
                Some(e) => {
                    let lo = (arg & 1 != 0).then(|| b.int("1"));
                    let hi = (arg & 2 != 0).then(|| b.int("2"));
                    let max = (arg & 4 != 0).then(|| b.int("3"));
                    b.slice(e, lo, hi, max)
                }
                None => continue,
            },
            7 => match stack.pop() {
                Some(e) => b.unary(UnaryOp::Recv, e),
                None => continue,
            },
            8 => match stack.pop() {
                Some(e) => b.paren(e),
                None => continue,
            },
            9 => match (stack.pop(), stack.pop()) {
                (Some(i), Some(e)) => b.index(e, i),
                _ => continue,
            },
            10 => match (stack.pop(), stack.pop()) {
                (Some(v), Some(k)) => b.map_type(k, v),
                _ => continue,
            },
            11 => match stack.pop() {
                Some(e) => {
                    let dir = [ChanDir::Both, ChanDir::Send, ChanDir::Recv][arg as usize % 3];
                    b.chan_type(dir, e)
                }
                None => continue,
            },
            12 => match stack.pop() {
                Some(e) => {
                    let f = b.field(&NAMES[..arg as usize % 3], e);
                    b.struct_type([f])
                }
                None => continue,
            },
            13 => {
                let n = (arg as usize % 3).min(stack.len());
                let results: Vec<_> = stack
                    .split_off(stack.len() - n)
                    .into_iter()
                    .map(|t| b.field(&[], t))
                    .collect();
                b.func_type([], Some(results))
            }
            14 => match stack.pop() {
                Some(e) => b.type_assert(e, None),
                None => continue,
            },
            _ => {
                let n = (arg as usize % 4).min(stack.len());
                let elts = stack.split_off(stack.len() - n);
                let typ = stack.pop();
                b.composite(typ, elts)
            }
        };
        stack.push(node);
    }

    stack.pop()
}

fuzz_target!(|data: &[u8]| {
    let mut b = TreeBuilder::new();
    let Some(root) = build(data, &mut b) else {
        return;
    };

    let up = b.unparser();
    let first = up.render(root);
    assert_eq!(first, up.render(root));
    assert!(!first.contains('\n'));
    assert_eq!(up.try_render(root).as_deref(), Ok(first.as_str()));

    // Foreign handles must be rejected, never rendered.
    let foreign: ExprId = Id::from_raw(b.arena().exprs.len() as u32);
    assert!(up.try_render(foreign).is_err());
});
