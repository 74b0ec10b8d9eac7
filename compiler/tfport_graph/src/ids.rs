//! Typed indices into the graph tables.
//!
//! Bound nodes refer to graph nodes through these ids, never by owning or
//! borrowing the node itself. Each id space is distinct so a `LocalId` can
//! never be used to index the resource table.

use std::fmt;

macro_rules! define_node_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Index into the owning table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_node_id!(
    /// Index into the provider table.
    ProviderId
);
define_node_id!(
    /// Index into the resource table.
    ResourceId
);
define_node_id!(
    /// Index into the module table.
    ModuleId
);
define_node_id!(
    /// Index into the local table.
    LocalId
);
define_node_id!(
    /// Index into the variable table.
    VariableId
);

/// A non-owning reference to a graph node.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum NodeRef {
    Resource(ResourceId),
    Module(ModuleId),
    Local(LocalId),
    Variable(VariableId),
}

impl From<ResourceId> for NodeRef {
    fn from(id: ResourceId) -> Self {
        NodeRef::Resource(id)
    }
}

impl From<ModuleId> for NodeRef {
    fn from(id: ModuleId) -> Self {
        NodeRef::Module(id)
    }
}

impl From<LocalId> for NodeRef {
    fn from(id: LocalId) -> Self {
        NodeRef::Local(id)
    }
}

impl From<VariableId> for NodeRef {
    fn from(id: VariableId) -> Self {
        NodeRef::Variable(id)
    }
}
