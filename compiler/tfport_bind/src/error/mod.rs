//! Binding errors.
//!
//! Every failure aborts the bind it happened in; there is no recovery and no
//! partial result. A [`BindError`] pairs what went wrong with the span of
//! the AST node it went wrong at.

use tfport_diagnostic::{Diagnostic, ErrorCode};
use tfport_graph::ProviderError;
use tfport_ir::{ReferenceError, Span};

use crate::binder::SUPPORTED_FUNCTIONS;

/// Broad classes of binding failure.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCategory {
    /// Recognized, but deliberately not implemented.
    UnsupportedConstruct,
    /// A name that should be in the graph but is not.
    UnresolvedReference,
    /// Structurally invalid input.
    MalformedInput,
    /// `count.index` outside a counted resource.
    ScopeError,
    /// The provider collaborator failed.
    Provider,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindErrorKind {
    /// `path.*`, `self.*`, `terraform.*` or a bare name.
    #[error("{0} variables are not yet supported")]
    UnsupportedVariable(&'static str),

    #[error("element access on user variables is not yet supported: var.{name}.{element}")]
    UserVariableElement { name: String, element: String },

    #[error("unsupported count variable count.{0}")]
    UnsupportedCountAttribute(String),

    #[error("no count index in scope")]
    NoCountIndex,

    #[error("unknown resource {0}")]
    UnknownResource(String),

    #[error("unknown module {0}")]
    UnknownModule(String),

    #[error("unknown local {0}")]
    UnknownLocal(String),

    #[error("unknown variable {0}")]
    UnknownVariable(String),

    #[error("call to unsupported function {0}")]
    UnsupportedFunction(String),

    #[error("the number of arguments to \"map\" must be even, found {0}")]
    OddMapArguments(usize),

    #[error("unexpected {0} literal")]
    UnexpectedLiteral(&'static str),

    #[error("malformed variable reference: {0}")]
    MalformedReference(#[from] ReferenceError),

    #[error("failed to load the provider of {resource}: {source}")]
    Provider {
        resource: String,
        #[source]
        source: ProviderError,
    },
}

impl BindErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BindErrorKind::UnsupportedVariable(_)
            | BindErrorKind::UserVariableElement { .. }
            | BindErrorKind::UnsupportedCountAttribute(_) => ErrorCategory::UnsupportedConstruct,
            BindErrorKind::UnknownResource(_)
            | BindErrorKind::UnknownModule(_)
            | BindErrorKind::UnknownLocal(_)
            | BindErrorKind::UnknownVariable(_)
            | BindErrorKind::UnsupportedFunction(_) => ErrorCategory::UnresolvedReference,
            BindErrorKind::OddMapArguments(_)
            | BindErrorKind::UnexpectedLiteral(_)
            | BindErrorKind::MalformedReference(_) => ErrorCategory::MalformedInput,
            BindErrorKind::NoCountIndex => ErrorCategory::ScopeError,
            BindErrorKind::Provider { .. } => ErrorCategory::Provider,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BindErrorKind::UnsupportedVariable(_) => ErrorCode::E1001,
            BindErrorKind::UserVariableElement { .. } => ErrorCode::E1002,
            BindErrorKind::UnsupportedCountAttribute(_) => ErrorCode::E1003,
            BindErrorKind::UnknownResource(_) => ErrorCode::E2001,
            BindErrorKind::UnknownModule(_) => ErrorCode::E2002,
            BindErrorKind::UnknownLocal(_) => ErrorCode::E2003,
            BindErrorKind::UnknownVariable(_) => ErrorCode::E2004,
            BindErrorKind::UnsupportedFunction(_) => ErrorCode::E2005,
            BindErrorKind::OddMapArguments(_) => ErrorCode::E3001,
            BindErrorKind::UnexpectedLiteral(_) => ErrorCode::E3002,
            BindErrorKind::MalformedReference(_) => ErrorCode::E3003,
            BindErrorKind::NoCountIndex => ErrorCode::E4001,
            BindErrorKind::Provider { .. } => ErrorCode::E5001,
        }
    }
}

/// A binding failure and where it happened.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct BindError {
    pub kind: BindErrorKind,
    pub span: Span,
}

impl BindError {
    pub fn new(kind: BindErrorKind, span: Span) -> Self {
        BindError { kind, span }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Convert to a full Diagnostic for error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code()).with_message(self.kind.to_string());
        match &self.kind {
            BindErrorKind::UnsupportedVariable(_) => diagnostic
                .with_label(self.span, "not supported yet")
                .with_note("count.index, local, module, resource and var references can be bound"),
            BindErrorKind::UserVariableElement { name, .. } => diagnostic
                .with_label(self.span, "element access")
                .with_suggestion(format!("index the variable instead: var.{name}[\"...\"]")),
            BindErrorKind::UnsupportedCountAttribute(_) => diagnostic
                .with_label(self.span, "unsupported count attribute")
                .with_note("only count.index is available"),
            BindErrorKind::NoCountIndex => diagnostic
                .with_label(self.span, "count.index used here")
                .with_suggestion("add a `count` argument to the enclosing resource"),
            BindErrorKind::UnknownResource(_)
            | BindErrorKind::UnknownModule(_)
            | BindErrorKind::UnknownLocal(_)
            | BindErrorKind::UnknownVariable(_) => {
                diagnostic.with_label(self.span, "not found in this configuration")
            }
            BindErrorKind::UnsupportedFunction(_) => diagnostic
                .with_label(self.span, "unsupported function")
                .with_note(format!(
                    "supported functions: {}",
                    SUPPORTED_FUNCTIONS.join(", ")
                )),
            BindErrorKind::OddMapArguments(_) => diagnostic
                .with_label(self.span, "odd number of arguments")
                .with_note("`map` takes alternating keys and values"),
            BindErrorKind::UnexpectedLiteral(_) => diagnostic
                .with_label(self.span, "expected a bool, number or string")
                .with_note("list and map values belong in property blocks, not interpolations"),
            BindErrorKind::MalformedReference(_) => {
                diagnostic.with_label(self.span, "malformed reference")
            }
            BindErrorKind::Provider { .. } => {
                diagnostic.with_label(self.span, "resource referenced here")
            }
        }
    }
}
