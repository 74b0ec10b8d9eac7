//! Whole-graph binding.
//!
//! Every resource, module and local is an independent unit: its trees are
//! disjoint from every other unit's and the graph is only read, so units can
//! be bound on separate workers. Provider schemas are loaded at most once
//! regardless (see `ProviderNode::ensure_loaded`).

use rayon::prelude::*;
use tfport_bind::{BindError, Binder};
use tfport_bound::BoundNode;
use tfport_graph::{
    Graph, LocalId, LocalNode, ModuleId, ModuleNode, NodeRef, ProviderLoader, ResourceId,
    ResourceNode,
};

use crate::Config;

/// A resource's bound `count` and properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundResource {
    pub id: ResourceId,
    pub count: Option<BoundNode>,
    pub properties: BoundNode,
}

impl BoundResource {
    /// Graph nodes referenced by the count and the properties, in that order.
    pub fn dependencies(&self) -> Vec<NodeRef> {
        let mut deps = Vec::new();
        for node in self.count.iter().chain(std::iter::once(&self.properties)) {
            for dep in tfport_bound::dependencies(node) {
                if !deps.contains(&dep) {
                    deps.push(dep);
                }
            }
        }
        deps
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundModule {
    pub id: ModuleId,
    pub inputs: BoundNode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundLocal {
    pub id: LocalId,
    pub value: BoundNode,
}

/// Every unit of a graph, bound. Each list is in graph order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundGraph {
    pub resources: Vec<BoundResource>,
    pub modules: Vec<BoundModule>,
    pub locals: Vec<BoundLocal>,
}

impl BoundGraph {
    pub fn resource(&self, id: ResourceId) -> Option<&BoundResource> {
        self.resources.get(id.index())
    }

    pub fn module(&self, id: ModuleId) -> Option<&BoundModule> {
        self.modules.get(id.index())
    }

    pub fn local(&self, id: LocalId) -> Option<&BoundLocal> {
        self.locals.get(id.index())
    }

    /// Graph nodes a resource depends on. Empty for an unknown id.
    pub fn dependencies(&self, id: ResourceId) -> Vec<NodeRef> {
        self.resource(id)
            .map(BoundResource::dependencies)
            .unwrap_or_default()
    }

    /// Run debug validation over every bound tree.
    pub fn validate(&self) {
        for resource in &self.resources {
            if let Some(count) = &resource.count {
                tfport_bound::validate(count);
            }
            tfport_bound::validate(&resource.properties);
        }
        for module in &self.modules {
            tfport_bound::validate(&module.inputs);
        }
        for local in &self.locals {
            tfport_bound::validate(&local.value);
        }
    }
}

/// Bind every resource, module and local in `graph`.
///
/// Resource properties see `count.index` iff the resource has a `count`;
/// the `count` itself never does. Fails with the first error in graph order
/// (resources, then modules, then locals).
pub fn bind_graph(
    graph: &Graph,
    loader: &dyn ProviderLoader,
    config: &Config,
) -> Result<BoundGraph, BindError> {
    let bound = if config.parallel {
        bind_parallel(graph, loader)
    } else {
        bind_sequential(graph, loader)
    }?;

    if config.validate {
        bound.validate();
    }

    tracing::debug!(
        resources = bound.resources.len(),
        modules = bound.modules.len(),
        locals = bound.locals.len(),
        parallel = config.parallel,
        "bound graph"
    );
    Ok(bound)
}

fn bind_resource(
    graph: &Graph,
    loader: &dyn ProviderLoader,
    id: ResourceId,
    resource: &ResourceNode,
) -> Result<BoundResource, BindError> {
    let binder = Binder::new(graph, loader);
    let count = resource
        .count
        .as_ref()
        .map(|count| binder.bind_property(count))
        .transpose()?;
    let properties = binder
        .with_count_index(resource.has_count())
        .bind_property(&resource.properties)?;
    Ok(BoundResource {
        id,
        count,
        properties,
    })
}

fn bind_module(
    graph: &Graph,
    loader: &dyn ProviderLoader,
    id: ModuleId,
    module: &ModuleNode,
) -> Result<BoundModule, BindError> {
    let inputs = Binder::new(graph, loader).bind_property(&module.inputs)?;
    Ok(BoundModule { id, inputs })
}

fn bind_local(
    graph: &Graph,
    loader: &dyn ProviderLoader,
    id: LocalId,
    local: &LocalNode,
) -> Result<BoundLocal, BindError> {
    let value = Binder::new(graph, loader).bind_property(&local.value)?;
    Ok(BoundLocal { id, value })
}

fn bind_sequential(graph: &Graph, loader: &dyn ProviderLoader) -> Result<BoundGraph, BindError> {
    let resources = graph
        .resources()
        .map(|(id, resource)| bind_resource(graph, loader, id, resource))
        .collect::<Result<_, _>>()?;
    let modules = graph
        .modules()
        .map(|(id, module)| bind_module(graph, loader, id, module))
        .collect::<Result<_, _>>()?;
    let locals = graph
        .locals()
        .map(|(id, local)| bind_local(graph, loader, id, local))
        .collect::<Result<_, _>>()?;
    Ok(BoundGraph {
        resources,
        modules,
        locals,
    })
}

/// Bind on a scoped rayon pool, cleaned up before returning.
fn bind_parallel(graph: &Graph, loader: &dyn ProviderLoader) -> Result<BoundGraph, BindError> {
    rayon::ThreadPoolBuilder::new()
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| bind_units_parallel(graph, loader))
        })
        .unwrap_or_else(|e| {
            tracing::warn!("failed to create thread pool ({e}), binding sequentially");
            bind_sequential(graph, loader)
        })
}

fn bind_units_parallel(
    graph: &Graph,
    loader: &dyn ProviderLoader,
) -> Result<BoundGraph, BindError> {
    let resources: Vec<_> = graph.resources().collect();
    let modules: Vec<_> = graph.modules().collect();
    let locals: Vec<_> = graph.locals().collect();

    // Collect every result first so the reported error is the first in
    // graph order, not whichever worker failed first.
    let resources: Vec<_> = resources
        .par_iter()
        .map(|&(id, resource)| bind_resource(graph, loader, id, resource))
        .collect();
    let modules: Vec<_> = modules
        .par_iter()
        .map(|&(id, module)| bind_module(graph, loader, id, module))
        .collect();
    let locals: Vec<_> = locals
        .par_iter()
        .map(|&(id, local)| bind_local(graph, loader, id, local))
        .collect();

    Ok(BoundGraph {
        resources: resources.into_iter().collect::<Result<_, _>>()?,
        modules: modules.into_iter().collect::<Result<_, _>>()?,
        locals: locals.into_iter().collect::<Result<_, _>>()?,
    })
}
