//! Graph nodes and symbol resolution for the tfport front end.
//!
//! The external graph builder discovers every provider, resource, module,
//! local and variable in a configuration and registers it in a [`Graph`].
//! The binder then resolves references against those tables; bound nodes
//! keep only a [`NodeRef`] back to what they resolved to.

mod graph;
mod ids;
mod nodes;
mod provider;

pub use graph::{DuplicateNode, Graph};
pub use ids::{LocalId, ModuleId, NodeRef, ProviderId, ResourceId, VariableId};
pub use nodes::{
    LocalNode, ModuleNode, ProviderNode, ResourceConfig, ResourceNode, VariableNode,
};
pub use provider::{ProviderError, ProviderLoader, ProviderSchema, StaticProviderLoader};
