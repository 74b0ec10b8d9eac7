//! Type system for the tfport front end.
//!
//! Two pieces live here:
//! - `Type`: the closed lattice of value types a bound expression can have
//!   (`unknown`, `bool`, `number`, `string`, `map`, plus the `list` and
//!   `output` modifiers).
//! - `Schema`: the declared shape of a resource's properties, walked one
//!   dotted path element at a time.
//!
//! Neither has side effects; both are cheap to copy or clone.

mod schema;
mod ty;

pub use schema::Schema;
pub use ty::Type;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Type;
    // One byte of flags. Bound nodes carry a `Type` each.
    const _: [(); 1] = [(); std::mem::size_of::<Type>()];
}
