//! Error codes for front-end diagnostics.
//!
//! The first digit names the error category:
//! - E1xxx: unsupported constructs
//! - E2xxx: unresolved references
//! - E3xxx: malformed input
//! - E4xxx: scope errors
//! - E5xxx: provider errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Unsupported constructs (E1xxx)
    /// Variable kind not yet implemented (path, self, simple, terraform)
    E1001,
    /// User variable element access (`var.NAME.ELEM`)
    E1002,
    /// Count attribute other than `count.index`
    E1003,

    // Unresolved references (E2xxx)
    /// Unknown resource
    E2001,
    /// Unknown module
    E2002,
    /// Unknown local
    E2003,
    /// Unknown variable
    E2004,
    /// Unsupported function
    E2005,

    // Malformed input (E3xxx)
    /// Odd number of arguments to `map`
    E3001,
    /// Unexpected literal kind
    E3002,
    /// Malformed variable reference
    E3003,

    // Scope errors (E4xxx)
    /// `count.index` outside a counted resource
    E4001,

    // Provider errors (E5xxx)
    /// Provider schema could not be loaded
    E5001,
}

impl ErrorCode {
    /// Every code, for exhaustive tests.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E4001,
        ErrorCode::E5001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E5001 => "E5001",
        }
    }

    /// One-line description of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "variable kind not yet implemented",
            ErrorCode::E1002 => "user variable elements are not supported",
            ErrorCode::E1003 => "unsupported count attribute",
            ErrorCode::E2001 => "unknown resource",
            ErrorCode::E2002 => "unknown module",
            ErrorCode::E2003 => "unknown local",
            ErrorCode::E2004 => "unknown variable",
            ErrorCode::E2005 => "unsupported function",
            ErrorCode::E3001 => "odd number of arguments to map",
            ErrorCode::E3002 => "unexpected literal",
            ErrorCode::E3003 => "malformed variable reference",
            ErrorCode::E4001 => "count index out of scope",
            ErrorCode::E5001 => "provider schema unavailable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
