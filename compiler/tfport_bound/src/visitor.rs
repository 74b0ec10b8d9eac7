//! Read-only traversal of bound trees.
//!
//! For passes that only inspect a tree (collect dependencies, validate,
//! render). Override `visit_*` to act at a node; call the matching `walk_*`
//! to continue into its children. Passes that change the tree use
//! [`visit_bound_node`](crate::visit_bound_node) instead.

use crate::node::{BoundExpr, BoundNode};

pub trait Visitor {
    fn visit_node(&mut self, node: &BoundNode) {
        walk_node(self, node);
    }

    fn visit_expr(&mut self, expr: &BoundExpr) {
        walk_expr(self, expr);
    }
}

/// Visit the children of a node.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, node: &BoundNode) {
    match node {
        BoundNode::Expr(expr) => visitor.visit_expr(expr),
        BoundNode::ListProperty(list) => {
            for element in &list.elements {
                visitor.visit_node(element);
            }
        }
        BoundNode::MapProperty(map) => {
            for value in map.elements.values() {
                visitor.visit_node(value);
            }
        }
    }
}

/// Visit the sub-expressions of an expression, in source order.
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &BoundExpr) {
    match expr {
        BoundExpr::Literal(_) | BoundExpr::VariableAccess(_) => {}
        BoundExpr::Arithmetic(arith) => {
            for operand in &arith.exprs {
                visitor.visit_expr(operand);
            }
        }
        BoundExpr::Call(call) => {
            for arg in &call.args {
                visitor.visit_expr(arg);
            }
        }
        BoundExpr::Output(output) => {
            for part in &output.exprs {
                visitor.visit_expr(part);
            }
        }
        BoundExpr::Conditional(cond) => {
            visitor.visit_expr(&cond.cond);
            visitor.visit_expr(&cond.then_expr);
            visitor.visit_expr(&cond.else_expr);
        }
        BoundExpr::Index(index) => {
            visitor.visit_expr(&index.target);
            visitor.visit_expr(&index.key);
        }
    }
}
