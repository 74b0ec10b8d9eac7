//! Built-in function result types.

use tfport_bound::BoundExpr;
use tfport_types::Type;

use crate::BindErrorKind;

/// The functions calls may name.
pub const SUPPORTED_FUNCTIONS: &[&str] = &[
    "base64decode",
    "base64encode",
    "chomp",
    "element",
    "file",
    "format",
    "list",
    "lookup",
    "map",
    "split",
];

/// The type of a call to `func` with already-bound `args`.
pub(super) fn result_type(func: &str, args: &[BoundExpr]) -> Result<Type, BindErrorKind> {
    match func {
        "base64decode" | "base64encode" | "chomp" | "file" | "format" => Ok(Type::STRING),
        "element" => Ok(match args.first().map(BoundExpr::ty) {
            Some(list) if list.is_list() => list.element_type(),
            _ => Type::UNKNOWN,
        }),
        "list" => Ok(Type::UNKNOWN.list_of()),
        "lookup" => Ok(Type::UNKNOWN),
        "map" if args.len() % 2 != 0 => Err(BindErrorKind::OddMapArguments(args.len())),
        "map" => Ok(Type::MAP),
        "split" => Ok(Type::STRING.list_of()),
        _ => Err(BindErrorKind::UnsupportedFunction(func.to_owned())),
    }
}
