//! Bound node definitions.
//!
//! A bound tree is the typed counterpart of one AST expression or property
//! value. Expressions (`BoundExpr`) always report a type; the two container
//! variants of `BoundNode` hold collection-shaped property values and have
//! no type of their own.
//!
//! Children are owned by value. References into the graph are `NodeRef`s.

use std::collections::BTreeMap;

use tfport_graph::NodeRef;
use tfport_ir::{ArithmeticOp, Literal, Reference, Span, Spanned};
use tfport_types::{Schema, Type};

/// Any node of a bound tree.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum BoundNode {
    Expr(BoundExpr),
    ListProperty(ListProperty),
    MapProperty(MapProperty),
}

impl BoundNode {
    /// The expression this node holds, if it is one.
    pub fn as_expr(&self) -> Option<&BoundExpr> {
        match self {
            BoundNode::Expr(expr) => Some(expr),
            BoundNode::ListProperty(_) | BoundNode::MapProperty(_) => None,
        }
    }

    /// Unwrap an expression node, handing the container back otherwise.
    pub fn into_expr(self) -> Result<BoundExpr, BoundNode> {
        match self {
            BoundNode::Expr(expr) => Ok(expr),
            other => Err(other),
        }
    }

    /// Variant name, for dumps and invariant messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundNode::Expr(expr) => expr.kind_name(),
            BoundNode::ListProperty(_) => "list_property",
            BoundNode::MapProperty(_) => "map_property",
        }
    }
}

impl Spanned for BoundNode {
    fn span(&self) -> Span {
        match self {
            BoundNode::Expr(expr) => expr.span(),
            BoundNode::ListProperty(list) => list.span,
            BoundNode::MapProperty(map) => map.span,
        }
    }
}

impl From<BoundExpr> for BoundNode {
    fn from(expr: BoundExpr) -> Self {
        BoundNode::Expr(expr)
    }
}

impl From<ListProperty> for BoundNode {
    fn from(list: ListProperty) -> Self {
        BoundNode::ListProperty(list)
    }
}

impl From<MapProperty> for BoundNode {
    fn from(map: MapProperty) -> Self {
        BoundNode::MapProperty(map)
    }
}

/// A typed expression.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum BoundExpr {
    Arithmetic(BoundArithmetic),
    Call(BoundCall),
    Conditional(BoundConditional),
    Index(BoundIndex),
    Literal(BoundLiteral),
    Output(BoundOutput),
    VariableAccess(BoundVariableAccess),
}

impl BoundExpr {
    /// The expression's type. Always defined; falls back to unknown.
    pub fn ty(&self) -> Type {
        match self {
            BoundExpr::Arithmetic(arith) => arith.ty(),
            BoundExpr::Call(call) => call.ty,
            BoundExpr::Conditional(cond) => cond.ty,
            BoundExpr::Index(index) => index.ty,
            BoundExpr::Literal(lit) => lit.ty,
            BoundExpr::Output(_) => Type::STRING,
            BoundExpr::VariableAccess(access) => access.ty,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundExpr::Arithmetic(_) => "arithmetic",
            BoundExpr::Call(_) => "call",
            BoundExpr::Conditional(_) => "conditional",
            BoundExpr::Index(_) => "index",
            BoundExpr::Literal(_) => "literal",
            BoundExpr::Output(_) => "output",
            BoundExpr::VariableAccess(_) => "variable_access",
        }
    }
}

impl Spanned for BoundExpr {
    fn span(&self) -> Span {
        match self {
            BoundExpr::Arithmetic(n) => n.span,
            BoundExpr::Call(n) => n.span,
            BoundExpr::Conditional(n) => n.span,
            BoundExpr::Index(n) => n.span,
            BoundExpr::Literal(n) => n.span,
            BoundExpr::Output(n) => n.span,
            BoundExpr::VariableAccess(n) => n.span,
        }
    }
}

/// Operands joined by one operator.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoundArithmetic {
    pub op: ArithmeticOp,
    pub exprs: Vec<BoundExpr>,
    pub span: Span,
}

impl BoundArithmetic {
    /// Always number, whatever the operator; consumers refine it.
    pub fn ty(&self) -> Type {
        Type::NUMBER
    }
}

/// A call to a built-in function.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoundCall {
    pub func: String,
    pub ty: Type,
    pub args: Vec<BoundExpr>,
    pub span: Span,
}

/// `cond ? then_expr : else_expr`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoundConditional {
    pub ty: Type,
    pub cond: Box<BoundExpr>,
    pub then_expr: Box<BoundExpr>,
    pub else_expr: Box<BoundExpr>,
    pub span: Span,
}

/// `target[key]`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoundIndex {
    pub ty: Type,
    pub target: Box<BoundExpr>,
    pub key: Box<BoundExpr>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoundLiteral {
    pub ty: Type,
    pub value: Literal,
    pub span: Span,
}

/// String interpolation of its parts.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoundOutput {
    pub exprs: Vec<BoundExpr>,
    pub span: Span,
}

/// A resolved variable reference.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoundVariableAccess {
    pub ty: Type,
    /// Accessed property path, split on `.`. Empty for whole-value references.
    pub elements: Vec<String>,
    /// Schema of the referenced resource; walk `elements` for the leaf.
    /// Unknown for everything but resources.
    pub schema: Schema,
    pub reference: Reference,
    /// The graph node the reference resolved to; `None` for `count.index`.
    pub node: Option<NodeRef>,
    pub span: Span,
}

/// A list-valued configuration property.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ListProperty {
    pub elements: Vec<BoundNode>,
    pub span: Span,
}

/// A map-valued configuration property, or a whole configuration block.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MapProperty {
    pub elements: BTreeMap<String, BoundNode>,
    pub span: Span,
}
