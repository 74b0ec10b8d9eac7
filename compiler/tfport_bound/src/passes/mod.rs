//! Passes over bound trees.

mod dependencies;
mod dump;
mod validate;

pub use dependencies::dependencies;
pub use dump::{dump, dump_expr};
pub use validate::validate;
