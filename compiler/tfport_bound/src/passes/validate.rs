//! Debug-mode validation of freshly bound trees.
//!
//! Asserts the shape the binder guarantees:
//! - literals are bool, number or string, typed to match
//! - `map` calls have an even number of arguments
//! - a conditional's type is unknown or the type of both branches
//! - an index's type is unknown or the target's element type
//! - only `count.index` accesses lack a graph node
//!
//! Checks are `debug_assert!`s and compile away in release builds. Rewrite
//! passes may legitimately break some of these; validate before rewriting.

use tfport_ir::{Literal, Reference};
use tfport_types::Type;

use crate::node::{BoundExpr, BoundNode};
use crate::visitor::{walk_expr, Visitor};

/// Validate a tree produced by the binder. Panics on a violation.
pub fn validate(node: &BoundNode) {
    Validator.visit_node(node);
}

struct Validator;

impl Visitor for Validator {
    fn visit_expr(&mut self, expr: &BoundExpr) {
        match expr {
            BoundExpr::Literal(lit) => {
                let expected = match lit.value {
                    Literal::Bool(_) => Some(Type::BOOL),
                    Literal::Int(_) | Literal::Float(_) => Some(Type::NUMBER),
                    Literal::String(_) => Some(Type::STRING),
                    Literal::List(_) | Literal::Map(_) | Literal::Unknown => None,
                };
                debug_assert!(
                    expected == Some(lit.ty),
                    "literal {} at {} has type {}",
                    lit.value,
                    lit.span,
                    lit.ty,
                );
            }
            BoundExpr::Call(call) => {
                debug_assert!(
                    call.func != "map" || call.args.len() % 2 == 0,
                    "map call at {} has {} arguments",
                    call.span,
                    call.args.len(),
                );
            }
            BoundExpr::Conditional(cond) => {
                debug_assert!(
                    cond.ty == Type::UNKNOWN
                        || (cond.ty == cond.then_expr.ty() && cond.ty == cond.else_expr.ty()),
                    "conditional at {} has type {} but branches are {} and {}",
                    cond.span,
                    cond.ty,
                    cond.then_expr.ty(),
                    cond.else_expr.ty(),
                );
            }
            BoundExpr::Index(index) => {
                debug_assert!(
                    index.ty == Type::UNKNOWN || index.ty == index.target.ty().element_type(),
                    "index at {} has type {} but target is {}",
                    index.span,
                    index.ty,
                    index.target.ty(),
                );
            }
            BoundExpr::VariableAccess(access) => {
                debug_assert!(
                    access.node.is_some() || matches!(access.reference, Reference::Count(_)),
                    "variable access {} at {} has no graph node",
                    access.reference,
                    access.span,
                );
            }
            BoundExpr::Arithmetic(_) | BoundExpr::Output(_) => {}
        }
        walk_expr(self, expr);
    }
}
