//! Expression binding for the tfport front end.
//!
//! # Pipeline Position
//!
//! ```text
//! Parse → **Bind** → rewrite passes → code generation
//! ```
//!
//! [`Binder`] turns the parser's untyped AST into `tfport_bound` trees,
//! resolving `${...}` references to graph nodes and attaching the types it
//! can infer locally. Errors are [`BindError`]s, convertible to
//! diagnostics.

mod binder;
mod error;

pub use binder::{Binder, SUPPORTED_FUNCTIONS};
pub use error::{BindError, BindErrorKind, ErrorCategory};
