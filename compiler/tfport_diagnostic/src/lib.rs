//! Diagnostics for the tfport front end.
//!
//! Every error the binder reports converts into a [`Diagnostic`]:
//! - an [`ErrorCode`] for searchability
//! - a message saying what went wrong
//! - a primary span saying where
//! - notes and suggestions where they help
//!
//! Rendering beyond the plain-text `Display` is the orchestrator's business.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
