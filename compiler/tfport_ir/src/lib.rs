//! tfport IR: the input side of the front end.
//!
//! - `Span` for source provenance
//! - `ast`: the untyped expression tree produced by the external parser,
//!   and the property-value trees that wrap it
//! - `reference`: classification of raw `${...}` reference text
//!
//! The typed side (bound nodes, visitor) lives in `tfport_bound`.

pub mod ast;
pub mod reference;
mod span;

pub use ast::{ArithmeticOp, Literal, Node, NodeKind, PropertyValue};
pub use reference::{
    CountAttribute, PathAttribute, Reference, ReferenceError, ResourceMode, ResourceReference,
};
pub use span::Span;

/// Anything that remembers where in the source it came from.
pub trait Spanned {
    fn span(&self) -> Span;
}
