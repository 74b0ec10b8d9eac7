//! The expression binder.
//!
//! Translates untyped AST expressions into typed bound expressions,
//! resolving variable references against the graph on the way. Type
//! inference is opportunistic: anything the binder cannot work out locally
//! is `unknown`, never an error.
//!
//! The binder only reads the graph. The one side effect is loading a
//! provider's schemas the first time one of its resources is referenced.

mod call;
mod variable;

use std::collections::BTreeMap;

use tfport_bound::{
    BoundArithmetic, BoundCall, BoundConditional, BoundExpr, BoundIndex, BoundLiteral, BoundNode,
    BoundOutput, ListProperty, MapProperty,
};
use tfport_graph::{Graph, ProviderLoader};
use tfport_ir::{Literal, Node, NodeKind, PropertyValue, Span};
use tfport_types::Type;

use crate::{BindError, BindErrorKind};

pub use call::SUPPORTED_FUNCTIONS;

/// Binds expressions against one graph.
///
/// A binder is cheap to create; make one per binding scope, with or without
/// a count index.
#[derive(Clone, Copy)]
pub struct Binder<'g> {
    graph: &'g Graph,
    loader: &'g dyn ProviderLoader,
    has_count_index: bool,
}

impl<'g> Binder<'g> {
    pub fn new(graph: &'g Graph, loader: &'g dyn ProviderLoader) -> Self {
        Binder {
            graph,
            loader,
            has_count_index: false,
        }
    }

    /// Whether `count.index` is in scope for the expressions bound.
    #[must_use]
    pub fn with_count_index(mut self, has_count_index: bool) -> Self {
        self.has_count_index = has_count_index;
        self
    }

    pub fn has_count_index(&self) -> bool {
        self.has_count_index
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Bind one expression.
    #[tracing::instrument(level = "trace", skip_all, fields(span = %node.span))]
    pub fn bind_expr(&self, node: &Node) -> Result<BoundExpr, BindError> {
        self.bind(node)
    }

    /// Bind expressions in order, stopping at the first failure.
    #[tracing::instrument(level = "trace", skip_all, fields(count = nodes.len()))]
    pub fn bind_exprs(&self, nodes: &[Node]) -> Result<Vec<BoundExpr>, BindError> {
        self.bind_all(nodes)
    }

    /// Bind a property value: expressions, and lists and maps of them.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn bind_property(&self, value: &PropertyValue) -> Result<BoundNode, BindError> {
        self.bind_value(value)
    }

    fn bind_value(&self, value: &PropertyValue) -> Result<BoundNode, BindError> {
        match value {
            PropertyValue::Expr(node) => self.bind(node).map(BoundNode::Expr),
            PropertyValue::List { items, span } => {
                let elements = items
                    .iter()
                    .map(|item| self.bind_value(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(BoundNode::ListProperty(ListProperty {
                    elements,
                    span: *span,
                }))
            }
            PropertyValue::Map { entries, span } => {
                let mut elements = BTreeMap::new();
                for (key, value) in entries {
                    elements.insert(key.clone(), self.bind_value(value)?);
                }
                Ok(BoundNode::MapProperty(MapProperty {
                    elements,
                    span: *span,
                }))
            }
        }
    }

    fn bind_all(&self, nodes: &[Node]) -> Result<Vec<BoundExpr>, BindError> {
        nodes.iter().map(|node| self.bind(node)).collect()
    }

    fn bind(&self, node: &Node) -> Result<BoundExpr, BindError> {
        let span = node.span;
        match &node.kind {
            NodeKind::Arithmetic { op, exprs } => Ok(BoundExpr::Arithmetic(BoundArithmetic {
                op: *op,
                exprs: self.bind_all(exprs)?,
                span,
            })),

            NodeKind::Call { func, args } => {
                let args = self.bind_all(args)?;
                let ty = call::result_type(func, &args).map_err(|kind| BindError::new(kind, span))?;
                Ok(BoundExpr::Call(BoundCall {
                    func: func.clone(),
                    ty,
                    args,
                    span,
                }))
            }

            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                let cond = self.bind(cond)?;
                let then_expr = self.bind(then_expr)?;
                let else_expr = self.bind(else_expr)?;
                // No coercion: branches of different types give unknown.
                let ty = if then_expr.ty() == else_expr.ty() {
                    then_expr.ty()
                } else {
                    Type::UNKNOWN
                };
                Ok(BoundExpr::Conditional(BoundConditional {
                    ty,
                    cond: Box::new(cond),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                    span,
                }))
            }

            NodeKind::Index { target, key } => {
                let target = self.bind(target)?;
                let key = self.bind(key)?;
                let target_ty = target.ty();
                let ty = if target_ty.is_list() {
                    target_ty.element_type()
                } else {
                    Type::UNKNOWN
                };
                Ok(BoundExpr::Index(BoundIndex {
                    ty,
                    target: Box::new(target),
                    key: Box::new(key),
                    span,
                }))
            }

            NodeKind::Literal(value) => bind_literal(value, span),

            NodeKind::Output(parts) => {
                let exprs = self.bind_all(parts)?;
                match <[BoundExpr; 1]>::try_from(exprs) {
                    Ok([only]) => {
                        tracing::trace!(%span, "collapsed single-part output");
                        Ok(only)
                    }
                    Err(exprs) => Ok(BoundExpr::Output(BoundOutput { exprs, span })),
                }
            }

            NodeKind::VariableAccess(text) => self.bind_variable_access(text, span),
        }
    }
}

fn bind_literal(value: &Literal, span: Span) -> Result<BoundExpr, BindError> {
    let ty = match value {
        Literal::Bool(_) => Type::BOOL,
        Literal::Int(_) | Literal::Float(_) => Type::NUMBER,
        Literal::String(_) => Type::STRING,
        Literal::List(_) | Literal::Map(_) | Literal::Unknown => {
            return Err(BindError::new(
                BindErrorKind::UnexpectedLiteral(value.kind_name()),
                span,
            ));
        }
    };
    Ok(BoundExpr::Literal(BoundLiteral {
        ty,
        value: value.clone(),
        span,
    }))
}
