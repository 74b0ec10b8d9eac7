//! The bound tree: typed IR produced by the binder.
//!
//! # Pipeline Position
//!
//! ```text
//! AST → Bind → **Bound tree** → rewrite passes → code generators
//! ```
//!
//! - [`node`]: `BoundNode` / `BoundExpr` and the per-variant structs
//! - [`visit_bound_node`]: pre/post rewriting with replacement and deletion
//! - [`Visitor`]: read-only traversal
//! - passes built on those: [`dependencies`], [`dump`], [`validate`]

pub mod node;
mod passes;
mod rewrite;
mod visitor;

pub use node::{
    BoundArithmetic, BoundCall, BoundConditional, BoundExpr, BoundIndex, BoundLiteral, BoundNode,
    BoundOutput, BoundVariableAccess, ListProperty, MapProperty,
};
pub use passes::{dependencies, dump, dump_expr, validate};
pub use rewrite::{identity, visit_bound_expr, visit_bound_node};
pub use visitor::{walk_expr, walk_node, Visitor};
