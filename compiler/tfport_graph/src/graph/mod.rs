//! The symbol environment.
//!
//! `Graph` owns every node the graph builder discovered and indexes them by
//! the names references use. During binding it is read-only, apart from the
//! one-time schema load of each provider.

use rustc_hash::FxHashMap;
use tfport_types::{Schema, Type};

use crate::nodes::{LocalNode, ModuleNode, ProviderNode, ResourceNode, VariableNode};
use crate::provider::{ProviderError, ProviderLoader};
use crate::{LocalId, ModuleId, NodeRef, ProviderId, ResourceId, VariableId};

/// A node that clashes with one already in the graph.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("duplicate {kind} `{name}`")]
pub struct DuplicateNode {
    pub kind: &'static str,
    pub name: String,
}

/// One table of nodes plus its name index.
#[derive(Debug)]
struct Table<T> {
    nodes: Vec<T>,
    index: FxHashMap<String, u32>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            nodes: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, kind: &'static str, key: String, node: T) -> Result<u32, DuplicateNode> {
        if self.index.contains_key(&key) {
            return Err(DuplicateNode { kind, name: key });
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "configurations never declare u32::MAX nodes of one kind"
        )]
        let raw = self.nodes.len() as u32;
        self.nodes.push(node);
        self.index.insert(key, raw);
        Ok(raw)
    }

    fn lookup(&self, key: &str) -> Option<u32> {
        self.index.get(key).copied()
    }
}

#[derive(Debug, Default)]
pub struct Graph {
    providers: Table<ProviderNode>,
    resources: Table<ResourceNode>,
    modules: Table<ModuleNode>,
    locals: Table<LocalNode>,
    variables: Table<VariableNode>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    // Construction

    pub fn add_provider(&mut self, provider: ProviderNode) -> Result<ProviderId, DuplicateNode> {
        let key = provider.key();
        self.providers
            .insert("provider", key, provider)
            .map(ProviderId::new)
    }

    pub fn add_resource(&mut self, resource: ResourceNode) -> Result<ResourceId, DuplicateNode> {
        let key = resource.config.id();
        self.resources
            .insert("resource", key, resource)
            .map(ResourceId::new)
    }

    pub fn add_module(&mut self, module: ModuleNode) -> Result<ModuleId, DuplicateNode> {
        let key = module.name.clone();
        self.modules.insert("module", key, module).map(ModuleId::new)
    }

    pub fn add_local(&mut self, local: LocalNode) -> Result<LocalId, DuplicateNode> {
        let key = local.name.clone();
        self.locals.insert("local", key, local).map(LocalId::new)
    }

    pub fn add_variable(&mut self, variable: VariableNode) -> Result<VariableId, DuplicateNode> {
        let key = variable.name.clone();
        self.variables
            .insert("variable", key, variable)
            .map(VariableId::new)
    }

    // Lookup by reference name

    /// Look up a resource by `TYPE.NAME` or `data.TYPE.NAME`.
    pub fn lookup_resource(&self, id: &str) -> Option<ResourceId> {
        self.resources.lookup(id).map(ResourceId::new)
    }

    pub fn lookup_module(&self, name: &str) -> Option<ModuleId> {
        self.modules.lookup(name).map(ModuleId::new)
    }

    pub fn lookup_local(&self, name: &str) -> Option<LocalId> {
        self.locals.lookup(name).map(LocalId::new)
    }

    pub fn lookup_variable(&self, name: &str) -> Option<VariableId> {
        self.variables.lookup(name).map(VariableId::new)
    }

    /// Look up a provider by `name` or `name.alias`.
    pub fn lookup_provider(&self, key: &str) -> Option<ProviderId> {
        self.providers.lookup(key).map(ProviderId::new)
    }

    // Access by id. Ids are only ever handed out by this graph.

    pub fn provider(&self, id: ProviderId) -> &ProviderNode {
        &self.providers.nodes[id.index()]
    }

    pub fn resource(&self, id: ResourceId) -> &ResourceNode {
        &self.resources.nodes[id.index()]
    }

    pub fn module(&self, id: ModuleId) -> &ModuleNode {
        &self.modules.nodes[id.index()]
    }

    pub fn local(&self, id: LocalId) -> &LocalNode {
        &self.locals.nodes[id.index()]
    }

    pub fn variable(&self, id: VariableId) -> &VariableNode {
        &self.variables.nodes[id.index()]
    }

    // Iteration, in insertion order

    pub fn resources(&self) -> impl ExactSizeIterator<Item = (ResourceId, &ResourceNode)> {
        self.resources
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (ResourceId::new(raw_index(i)), node))
    }

    pub fn modules(&self) -> impl ExactSizeIterator<Item = (ModuleId, &ModuleNode)> {
        self.modules
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (ModuleId::new(raw_index(i)), node))
    }

    pub fn locals(&self) -> impl ExactSizeIterator<Item = (LocalId, &LocalNode)> {
        self.locals
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (LocalId::new(raw_index(i)), node))
    }

    pub fn variables(&self) -> impl ExactSizeIterator<Item = (VariableId, &VariableNode)> {
        self.variables
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (VariableId::new(raw_index(i)), node))
    }

    // Providers and schemas

    /// Make sure the provider that owns `resource` has its schemas loaded.
    pub fn ensure_provider(
        &self,
        resource: ResourceId,
        loader: &dyn ProviderLoader,
    ) -> Result<(), ProviderError> {
        let provider = self.provider(self.resource(resource).provider);
        provider.ensure_loaded(loader).map(|_| ())
    }

    /// The schema of a resource's type.
    ///
    /// Falls back to a bare map schema, on which every property resolves to
    /// unknown, when the provider is not loaded or does not know the type.
    pub fn resource_schema(&self, resource: ResourceId) -> Schema {
        let node = self.resource(resource);
        self.provider(node.provider)
            .schema()
            .and_then(|schema| schema.resource(node.config.mode, &node.config.type_name))
            .cloned()
            .unwrap_or_else(|| Schema::new(Type::MAP))
    }

    /// The type a reference to the whole node has, before any property walk.
    pub fn node_type(&self, node: NodeRef) -> Type {
        match node {
            NodeRef::Resource(_) => Type::MAP.output_of(),
            NodeRef::Module(_) | NodeRef::Local(_) => Type::UNKNOWN.output_of(),
            NodeRef::Variable(id) => self.variable(id).reference_type(),
        }
    }

    /// A readable name for a referenced node, for logs and dumps.
    pub fn node_name(&self, node: NodeRef) -> String {
        match node {
            NodeRef::Resource(id) => self.resource(id).config.id(),
            NodeRef::Module(id) => format!("module.{}", self.module(id).name),
            NodeRef::Local(id) => format!("local.{}", self.local(id).name),
            NodeRef::Variable(id) => format!("var.{}", self.variable(id).name),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "table lengths are bounded by u32 at insertion"
)]
fn raw_index(i: usize) -> u32 {
    i as u32
}

#[cfg(test)]
mod tests;
