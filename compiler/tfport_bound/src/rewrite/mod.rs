//! Structural rewriting of bound trees.
//!
//! [`visit_bound_node`] walks a tree with two caller-supplied functions:
//! `pre` runs before a node's children are visited, `post` after. Each one
//! takes a node by value and returns
//!
//! - `Ok(Some(node))` to keep it, or to replace it with a different node
//!   (descent continues into the replacement),
//! - `Ok(None)` to delete it,
//! - `Err(e)` to abort the whole walk.
//!
//! # Deletion
//!
//! Deleting a node in `pre` skips its children and its `post`. A deleted
//! element of an operand, argument, part or list-property list is dropped,
//! survivors keep their order. When that empties a list that had elements,
//! the list's owner is deleted too, without running its `post`. A list that
//! was empty to begin with is left alone. Map properties drop deleted keys
//! and are never deleted for becoming empty.
//!
//! Conditional branches and index target/key are required. Deleting one,
//! or putting a list or map property where an expression belongs, is a
//! caller bug and panics.
//!
//! There is no rollback: on error the tree is dropped along with whatever
//! was rewritten so far.

use std::collections::BTreeMap;

use crate::node::{
    BoundArithmetic, BoundCall, BoundConditional, BoundExpr, BoundIndex, BoundNode, BoundOutput,
    ListProperty, MapProperty,
};

/// A visitor that keeps every node as it is.
#[inline]
pub fn identity<E>(node: BoundNode) -> Result<Option<BoundNode>, E> {
    Ok(Some(node))
}

/// Rewrite `node` with `pre` and `post`. Returns `None` if the root itself
/// ended up deleted.
pub fn visit_bound_node<E, Pre, Post>(
    node: BoundNode,
    mut pre: Pre,
    mut post: Post,
) -> Result<Option<BoundNode>, E>
where
    Pre: FnMut(BoundNode) -> Result<Option<BoundNode>, E>,
    Post: FnMut(BoundNode) -> Result<Option<BoundNode>, E>,
{
    let mut rewriter = Rewriter {
        pre: &mut pre,
        post: &mut post,
    };
    rewriter.visit_node(node)
}

/// Rewrite an expression tree.
///
/// Same as [`visit_bound_node`] on `BoundNode::Expr(expr)`; the result must
/// still be an expression.
pub fn visit_bound_expr<E, Pre, Post>(
    expr: BoundExpr,
    pre: Pre,
    post: Post,
) -> Result<Option<BoundExpr>, E>
where
    Pre: FnMut(BoundNode) -> Result<Option<BoundNode>, E>,
    Post: FnMut(BoundNode) -> Result<Option<BoundNode>, E>,
{
    Ok(visit_bound_node(BoundNode::Expr(expr), pre, post)?.map(expect_expr))
}

struct Rewriter<'a, Pre, Post> {
    pre: &'a mut Pre,
    post: &'a mut Post,
}

impl<E, Pre, Post> Rewriter<'_, Pre, Post>
where
    Pre: FnMut(BoundNode) -> Result<Option<BoundNode>, E>,
    Post: FnMut(BoundNode) -> Result<Option<BoundNode>, E>,
{
    fn visit_node(&mut self, node: BoundNode) -> Result<Option<BoundNode>, E> {
        let Some(node) = (self.pre)(node)? else {
            return Ok(None);
        };

        let node = match node {
            BoundNode::Expr(expr) => match self.visit_children(expr)? {
                Some(expr) => BoundNode::Expr(expr),
                None => return Ok(None),
            },
            BoundNode::ListProperty(ListProperty { elements, span }) => {
                match self.visit_node_list(elements)? {
                    Some(elements) => BoundNode::ListProperty(ListProperty { elements, span }),
                    None => return Ok(None),
                }
            }
            BoundNode::MapProperty(MapProperty { elements, span }) => {
                let mut kept = BTreeMap::new();
                for (key, value) in elements {
                    match self.visit_node(value)? {
                        Some(value) => {
                            kept.insert(key, value);
                        }
                        None => tracing::trace!(key = %key, "map property entry deleted"),
                    }
                }
                BoundNode::MapProperty(MapProperty {
                    elements: kept,
                    span,
                })
            }
        };

        (self.post)(node)
    }

    /// Visit an expression's children. `None` means the expression lost all
    /// of its list elements and is deleted.
    fn visit_children(&mut self, expr: BoundExpr) -> Result<Option<BoundExpr>, E> {
        let expr = match expr {
            BoundExpr::Literal(_) | BoundExpr::VariableAccess(_) => expr,

            BoundExpr::Arithmetic(BoundArithmetic { op, exprs, span }) => {
                match self.visit_expr_list(exprs)? {
                    Some(exprs) => BoundExpr::Arithmetic(BoundArithmetic { op, exprs, span }),
                    None => return Ok(None),
                }
            }
            BoundExpr::Call(BoundCall {
                func,
                ty,
                args,
                span,
            }) => match self.visit_expr_list(args)? {
                Some(args) => BoundExpr::Call(BoundCall {
                    func,
                    ty,
                    args,
                    span,
                }),
                None => return Ok(None),
            },
            BoundExpr::Output(BoundOutput { exprs, span }) => match self.visit_expr_list(exprs)? {
                Some(exprs) => BoundExpr::Output(BoundOutput { exprs, span }),
                None => return Ok(None),
            },

            BoundExpr::Conditional(BoundConditional {
                ty,
                cond,
                then_expr,
                else_expr,
                span,
            }) => BoundExpr::Conditional(BoundConditional {
                ty,
                cond: self.visit_slot(cond, "conditional condition")?,
                then_expr: self.visit_slot(then_expr, "conditional true branch")?,
                else_expr: self.visit_slot(else_expr, "conditional false branch")?,
                span,
            }),
            BoundExpr::Index(BoundIndex {
                ty,
                target,
                key,
                span,
            }) => BoundExpr::Index(BoundIndex {
                ty,
                target: self.visit_slot(target, "index target")?,
                key: self.visit_slot(key, "index key")?,
                span,
            }),
        };
        Ok(Some(expr))
    }

    /// Visit a required child.
    fn visit_slot(&mut self, expr: Box<BoundExpr>, slot: &str) -> Result<Box<BoundExpr>, E> {
        match self.visit_node(BoundNode::Expr(*expr))? {
            Some(BoundNode::Expr(expr)) => Ok(Box::new(expr)),
            Some(other) => invariant_violation(&format!(
                "{slot} rewritten to a {}, expected an expression",
                other.kind_name()
            )),
            None => invariant_violation(&format!("{slot} deleted")),
        }
    }

    fn visit_expr_list(&mut self, exprs: Vec<BoundExpr>) -> Result<Option<Vec<BoundExpr>>, E> {
        let was_empty = exprs.is_empty();
        let mut kept = Vec::with_capacity(exprs.len());
        for expr in exprs {
            if let Some(node) = self.visit_node(BoundNode::Expr(expr))? {
                kept.push(expect_expr(node));
            }
        }
        Ok(emptied(was_empty, kept))
    }

    fn visit_node_list(&mut self, nodes: Vec<BoundNode>) -> Result<Option<Vec<BoundNode>>, E> {
        let was_empty = nodes.is_empty();
        let mut kept = Vec::with_capacity(nodes.len());
        for node in nodes {
            if let Some(node) = self.visit_node(node)? {
                kept.push(node);
            }
        }
        Ok(emptied(was_empty, kept))
    }
}

/// `None` if visiting emptied a list that had elements.
fn emptied<T>(was_empty: bool, kept: Vec<T>) -> Option<Vec<T>> {
    if kept.is_empty() && !was_empty {
        tracing::trace!("all elements deleted, deleting owner");
        None
    } else {
        Some(kept)
    }
}

fn expect_expr(node: BoundNode) -> BoundExpr {
    match node.into_expr() {
        Ok(expr) => expr,
        Err(other) => invariant_violation(&format!(
            "{} in expression position",
            other.kind_name()
        )),
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn invariant_violation(message: &str) -> ! {
    panic!("bound tree invariant violated: {message}")
}

#[cfg(test)]
mod tests;
