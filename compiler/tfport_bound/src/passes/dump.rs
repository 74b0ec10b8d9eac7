//! Plain-text rendering of bound trees, one node per line.
//!
//! ```text
//! map
//!   ami = variable data.aws_ami.ubuntu.id : output(string)
//!   tags = map
//!     Name = output : string
//!       literal "web-" : string
//!       variable count.index : number
//! ```

use std::fmt::Write;

use crate::node::{BoundExpr, BoundNode};

pub fn dump(node: &BoundNode) -> String {
    let mut out = String::new();
    dump_node(&mut out, node, 0, None);
    out
}

pub fn dump_expr(expr: &BoundExpr) -> String {
    let mut out = String::new();
    dump_expr_at(&mut out, expr, 0, None);
    out
}

fn line_start(out: &mut String, depth: usize, key: Option<&str>) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    if let Some(key) = key {
        out.push_str(key);
        out.push_str(" = ");
    }
}

fn dump_node(out: &mut String, node: &BoundNode, depth: usize, key: Option<&str>) {
    match node {
        BoundNode::Expr(expr) => dump_expr_at(out, expr, depth, key),
        BoundNode::ListProperty(list) => {
            line_start(out, depth, key);
            out.push_str("list\n");
            for element in &list.elements {
                dump_node(out, element, depth + 1, None);
            }
        }
        BoundNode::MapProperty(map) => {
            line_start(out, depth, key);
            out.push_str("map\n");
            for (name, value) in &map.elements {
                dump_node(out, value, depth + 1, Some(name));
            }
        }
    }
}

// `write!` into a String cannot fail.
fn dump_expr_at(out: &mut String, expr: &BoundExpr, depth: usize, key: Option<&str>) {
    line_start(out, depth, key);
    let ty = expr.ty();
    match expr {
        BoundExpr::Arithmetic(arith) => {
            let _ = writeln!(out, "arithmetic {} : {ty}", arith.op);
            for operand in &arith.exprs {
                dump_expr_at(out, operand, depth + 1, None);
            }
        }
        BoundExpr::Call(call) => {
            let _ = writeln!(out, "call {} : {ty}", call.func);
            for arg in &call.args {
                dump_expr_at(out, arg, depth + 1, None);
            }
        }
        BoundExpr::Conditional(cond) => {
            let _ = writeln!(out, "conditional : {ty}");
            dump_expr_at(out, &cond.cond, depth + 1, None);
            dump_expr_at(out, &cond.then_expr, depth + 1, None);
            dump_expr_at(out, &cond.else_expr, depth + 1, None);
        }
        BoundExpr::Index(index) => {
            let _ = writeln!(out, "index : {ty}");
            dump_expr_at(out, &index.target, depth + 1, None);
            dump_expr_at(out, &index.key, depth + 1, None);
        }
        BoundExpr::Literal(lit) => {
            let _ = writeln!(out, "literal {} : {ty}", lit.value);
        }
        BoundExpr::Output(output) => {
            let _ = writeln!(out, "output : {ty}");
            for part in &output.exprs {
                dump_expr_at(out, part, depth + 1, None);
            }
        }
        BoundExpr::VariableAccess(access) => {
            let _ = writeln!(out, "variable {} : {ty}", access.reference);
        }
    }
}
