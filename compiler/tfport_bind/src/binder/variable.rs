//! Variable access binding: reference classification and resolution.

use tfport_bound::{BoundExpr, BoundVariableAccess};
use tfport_graph::NodeRef;
use tfport_ir::{CountAttribute, Reference, ResourceReference, Span};
use tfport_types::{Schema, Type};

use super::Binder;
use crate::{BindError, BindErrorKind};

/// What a reference resolved to.
struct Resolved {
    ty: Type,
    elements: Vec<String>,
    schema: Schema,
    node: Option<NodeRef>,
}

impl Resolved {
    fn node(ty: Type, node: NodeRef) -> Self {
        Resolved {
            ty,
            elements: Vec::new(),
            schema: Schema::unknown(),
            node: Some(node),
        }
    }
}

impl Binder<'_> {
    pub(super) fn bind_variable_access(&self, text: &str, span: Span) -> Result<BoundExpr, BindError> {
        let reference =
            Reference::parse(text).map_err(|e| BindError::new(BindErrorKind::from(e), span))?;
        let resolved = self
            .resolve(&reference)
            .map_err(|kind| BindError::new(kind, span))?;
        tracing::trace!(reference = %reference, ty = %resolved.ty, "bound variable access");

        Ok(BoundExpr::VariableAccess(BoundVariableAccess {
            ty: resolved.ty,
            elements: resolved.elements,
            schema: resolved.schema,
            reference,
            node: resolved.node,
            span,
        }))
    }

    fn resolve(&self, reference: &Reference) -> Result<Resolved, BindErrorKind> {
        match reference {
            Reference::Count(CountAttribute::Other(attr)) => {
                Err(BindErrorKind::UnsupportedCountAttribute(attr.clone()))
            }
            Reference::Count(CountAttribute::Index) => {
                if !self.has_count_index {
                    return Err(BindErrorKind::NoCountIndex);
                }
                Ok(Resolved {
                    ty: Type::NUMBER,
                    elements: Vec::new(),
                    schema: Schema::unknown(),
                    node: None,
                })
            }

            // Locals and modules are typed by a later pass.
            Reference::Local { name } => {
                let id = self
                    .graph
                    .lookup_local(name)
                    .ok_or_else(|| BindErrorKind::UnknownLocal(name.clone()))?;
                Ok(Resolved::node(Type::UNKNOWN.output_of(), id.into()))
            }
            Reference::Module { name, .. } => {
                let id = self
                    .graph
                    .lookup_module(name)
                    .ok_or_else(|| BindErrorKind::UnknownModule(name.clone()))?;
                Ok(Resolved::node(Type::UNKNOWN.output_of(), id.into()))
            }

            Reference::Resource(resource) => self.resolve_resource(resource),

            Reference::User { name, element } => {
                if let Some(element) = element {
                    return Err(BindErrorKind::UserVariableElement {
                        name: name.clone(),
                        element: element.clone(),
                    });
                }
                let id = self
                    .graph
                    .lookup_variable(name)
                    .ok_or_else(|| BindErrorKind::UnknownVariable(name.clone()))?;
                let ty = self.graph.variable(id).reference_type();
                Ok(Resolved::node(ty, id.into()))
            }

            Reference::Path(_) => Err(BindErrorKind::UnsupportedVariable("path")),
            Reference::SelfRef { .. } => Err(BindErrorKind::UnsupportedVariable("self")),
            Reference::Simple { .. } => Err(BindErrorKind::UnsupportedVariable("simple")),
            Reference::Terraform { .. } => Err(BindErrorKind::UnsupportedVariable("terraform")),
        }
    }

    fn resolve_resource(&self, resource: &ResourceReference) -> Result<Resolved, BindErrorKind> {
        let resource_id = resource.resource_id();
        let Some(id) = self.graph.lookup_resource(&resource_id) else {
            return Err(BindErrorKind::UnknownResource(resource_id));
        };

        if let Err(source) = self.graph.ensure_provider(id, self.loader) {
            return Err(BindErrorKind::Provider {
                resource: resource_id,
                source,
            });
        }

        let schema = self.graph.resource_schema(id);
        let elements: Vec<String> = resource.field_elements().map(str::to_owned).collect();
        let leaf = schema.walk(elements.iter().map(String::as_str));

        let mut ty = leaf.ty().output_of();
        if resource.is_splat() {
            ty = ty.list_of();
        }

        Ok(Resolved {
            ty,
            elements,
            schema,
            node: Some(id.into()),
        })
    }
}
