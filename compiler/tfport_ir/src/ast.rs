//! Untyped expression AST.
//!
//! This is the tree the configuration-language parser hands over: one `Node`
//! per interpolation construct, each carrying the span it was parsed from.
//! Nothing here is typed or resolved; references are still raw text.
//!
//! Property values (the maps and lists that make up a resource's or module's
//! configuration block) wrap parsed expressions in `PropertyValue`.

use std::fmt;

use crate::{Span, Spanned};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    pub fn literal(value: Literal, span: Span) -> Self {
        Node::new(NodeKind::Literal(value), span)
    }

    pub fn variable(name: impl Into<String>, span: Span) -> Self {
        Node::new(NodeKind::VariableAccess(name.into()), span)
    }

    pub fn call(func: impl Into<String>, args: Vec<Node>, span: Span) -> Self {
        Node::new(
            NodeKind::Call {
                func: func.into(),
                args,
            },
            span,
        )
    }

    pub fn arithmetic(op: ArithmeticOp, exprs: Vec<Node>, span: Span) -> Self {
        Node::new(NodeKind::Arithmetic { op, exprs }, span)
    }

    pub fn conditional(cond: Node, then_expr: Node, else_expr: Node, span: Span) -> Self {
        Node::new(
            NodeKind::Conditional {
                cond: Box::new(cond),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            span,
        )
    }

    pub fn index(target: Node, key: Node, span: Span) -> Self {
        Node::new(
            NodeKind::Index {
                target: Box::new(target),
                key: Box::new(key),
            },
            span,
        )
    }

    pub fn output(parts: Vec<Node>, span: Span) -> Self {
        Node::new(NodeKind::Output(parts), span)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Node {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression variants.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    /// `a + b`, `a == b`, `a && b`. Chains of one operator are flattened.
    Arithmetic { op: ArithmeticOp, exprs: Vec<Node> },

    /// `func(args...)`
    Call { func: String, args: Vec<Node> },

    /// `cond ? then_expr : else_expr`
    Conditional {
        cond: Box<Node>,
        then_expr: Box<Node>,
        else_expr: Box<Node>,
    },

    /// `target[key]`
    Index { target: Box<Node>, key: Box<Node> },

    Literal(Literal),

    /// A whole interpolated string: literal text and `${...}` parts in order.
    Output(Vec<Node>),

    /// `${aws_instance.web.id}`, `${var.region}`: the raw reference text.
    VariableAccess(String),
}

/// Arithmetic, comparison and logical operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}

impl ArithmeticOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
            ArithmeticOp::Mod => "%",
            ArithmeticOp::Equal => "==",
            ArithmeticOp::NotEqual => "!=",
            ArithmeticOp::LessThan => "<",
            ArithmeticOp::LessThanOrEqual => "<=",
            ArithmeticOp::GreaterThan => ">",
            ArithmeticOp::GreaterThanOrEqual => ">=",
            ArithmeticOp::And => "&&",
            ArithmeticOp::Or => "||",
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Literal values.
///
/// Floats are stored as bits so that the AST stays `Eq + Hash`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    /// Float bits; see [`Literal::float`] and [`Literal::as_f64`].
    Float(u64),
    String(String),
    List(Vec<Literal>),
    Map(Vec<(String, Literal)>),
    /// A value the parser could not determine.
    Unknown,
}

impl Literal {
    pub fn float(value: f64) -> Self {
        Literal::Float(value.to_bits())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }

    /// The float value of a `Float` literal.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }

    /// Name of the literal kind, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
            Literal::List(_) => "list",
            Literal::Map(_) => "map",
            Literal::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Literal::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?} = {value}")?;
                }
                f.write_str("}")
            }
            Literal::Unknown => f.write_str("<unknown>"),
        }
    }
}

/// A configuration property value: nested maps and lists whose leaves are
/// parsed expressions.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum PropertyValue {
    Expr(Node),
    List {
        items: Vec<PropertyValue>,
        span: Span,
    },
    Map {
        entries: Vec<(String, PropertyValue)>,
        span: Span,
    },
}

impl Spanned for PropertyValue {
    fn span(&self) -> Span {
        match self {
            PropertyValue::Expr(node) => node.span,
            PropertyValue::List { span, .. } | PropertyValue::Map { span, .. } => *span,
        }
    }
}

impl From<Node> for PropertyValue {
    fn from(node: Node) -> Self {
        PropertyValue::Expr(node)
    }
}
