//! Value types.
//!
//! A `Type` is a set of flags: exactly one primitive bit plus the optional
//! `LIST` and `OUTPUT` modifiers. Wrapping is therefore idempotent and the
//! modifiers commute, so `list_of(output_of(t)) == output_of(list_of(t))`.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    struct TypeFlags: u8 {
        // === Primitive bits ===
        const BOOL = 1 << 0;
        const NUMBER = 1 << 1;
        const STRING = 1 << 2;
        const MAP = 1 << 3;
        const UNKNOWN = 1 << 4;

        // === Modifiers ===
        /// Ordered homogeneous sequence of the primitive.
        const LIST = 1 << 5;
        /// Value produced asynchronously by a resource or module.
        const OUTPUT = 1 << 6;
    }
}

impl TypeFlags {
    const PRIMITIVE_MASK: Self = Self::from_bits_truncate(
        Self::BOOL.bits()
            | Self::NUMBER.bits()
            | Self::STRING.bits()
            | Self::MAP.bits()
            | Self::UNKNOWN.bits(),
    );
}

/// The semantic type of a bound expression.
///
/// Equality is structural. `Type::default()` is `Type::UNKNOWN`, the
/// fallback whenever inference has nothing better to offer.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Type(TypeFlags);

impl Type {
    pub const UNKNOWN: Type = Type(TypeFlags::UNKNOWN);
    pub const BOOL: Type = Type(TypeFlags::BOOL);
    pub const NUMBER: Type = Type(TypeFlags::NUMBER);
    pub const STRING: Type = Type(TypeFlags::STRING);
    pub const MAP: Type = Type(TypeFlags::MAP);

    /// Whether this is a list type.
    #[inline]
    pub const fn is_list(self) -> bool {
        self.0.contains(TypeFlags::LIST)
    }

    /// Whether this is an output type.
    #[inline]
    pub const fn is_output(self) -> bool {
        self.0.contains(TypeFlags::OUTPUT)
    }

    /// Whether the primitive part of this type is `unknown`.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0.contains(TypeFlags::UNKNOWN)
    }

    /// The list type whose elements have this type.
    #[inline]
    #[must_use]
    pub const fn list_of(self) -> Type {
        Type(self.0.union(TypeFlags::LIST))
    }

    /// The output type that resolves to this type.
    #[inline]
    #[must_use]
    pub const fn output_of(self) -> Type {
        Type(self.0.union(TypeFlags::OUTPUT))
    }

    /// The element type of a list type.
    ///
    /// Returns `Type::UNKNOWN` for anything that is not a list.
    #[inline]
    #[must_use]
    pub const fn element_type(self) -> Type {
        if self.is_list() {
            Type(self.0.difference(TypeFlags::LIST))
        } else {
            Type::UNKNOWN
        }
    }

    /// This type with both modifiers stripped.
    #[inline]
    #[must_use]
    pub const fn primitive(self) -> Type {
        Type(self.0.intersection(TypeFlags::PRIMITIVE_MASK))
    }

    fn primitive_name(self) -> &'static str {
        let p = self.primitive().0;
        if p == TypeFlags::BOOL {
            "bool"
        } else if p == TypeFlags::NUMBER {
            "number"
        } else if p == TypeFlags::STRING {
            "string"
        } else if p == TypeFlags::MAP {
            "map"
        } else {
            "unknown"
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Type::UNKNOWN
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_output(), self.is_list()) {
            (false, false) => f.write_str(self.primitive_name()),
            (false, true) => write!(f, "list({})", self.primitive_name()),
            (true, false) => write!(f, "output({})", self.primitive_name()),
            (true, true) => write!(f, "output(list({}))", self.primitive_name()),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

#[cfg(test)]
mod tests;
