//! Graph node definitions.
//!
//! Nodes are created by the graph builder before binding and stay owned by
//! the [`Graph`](crate::Graph) tables for the whole pipeline.

use std::sync::OnceLock;

use tfport_ir::{Literal, PropertyValue, ResourceMode};
use tfport_types::Type;

use crate::provider::{ProviderError, ProviderLoader, ProviderSchema};
use crate::ProviderId;

/// A configured provider.
///
/// Its schemas are loaded lazily, the first time a resource that uses the
/// provider is referenced, and cached for the rest of the run.
#[derive(Debug)]
pub struct ProviderNode {
    pub name: String,
    pub alias: Option<String>,
    schema: OnceLock<ProviderSchema>,
}

impl ProviderNode {
    pub fn new(name: impl Into<String>) -> Self {
        ProviderNode {
            name: name.into(),
            alias: None,
            schema: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Table key: `name` or `name.alias`.
    pub fn key(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{}.{alias}", self.name),
            None => self.name.clone(),
        }
    }

    /// The loaded schemas, if [`ensure_loaded`](Self::ensure_loaded) has succeeded.
    pub fn schema(&self) -> Option<&ProviderSchema> {
        self.schema.get()
    }

    /// Load the provider's schemas unless already loaded.
    ///
    /// A failed load is not cached; the next call tries again.
    pub fn ensure_loaded(
        &self,
        loader: &dyn ProviderLoader,
    ) -> Result<&ProviderSchema, ProviderError> {
        if let Some(schema) = self.schema.get() {
            return Ok(schema);
        }
        let loaded = loader.load(self)?;
        tracing::debug!(provider = %self.key(), "loaded provider schema");
        Ok(self.schema.get_or_init(|| loaded))
    }
}

/// Identity of a resource block.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ResourceConfig {
    pub mode: ResourceMode,
    pub type_name: String,
    pub name: String,
}

impl ResourceConfig {
    pub fn managed(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        ResourceConfig {
            mode: ResourceMode::Managed,
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    pub fn data(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        ResourceConfig {
            mode: ResourceMode::Data,
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// `TYPE.NAME` or `data.TYPE.NAME`, the form references use.
    pub fn id(&self) -> String {
        match self.mode {
            ResourceMode::Managed => format!("{}.{}", self.type_name, self.name),
            ResourceMode::Data => format!("data.{}.{}", self.type_name, self.name),
        }
    }
}

/// A `resource` or `data` block.
#[derive(Clone, Debug)]
pub struct ResourceNode {
    pub provider: ProviderId,
    pub config: ResourceConfig,
    /// The `count` meta-argument, if present.
    pub count: Option<PropertyValue>,
    pub properties: PropertyValue,
}

impl ResourceNode {
    pub fn new(provider: ProviderId, config: ResourceConfig, properties: PropertyValue) -> Self {
        ResourceNode {
            provider,
            config,
            count: None,
            properties,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: PropertyValue) -> Self {
        self.count = Some(count);
        self
    }

    /// Whether `count.index` is in scope inside this resource's properties.
    pub fn has_count(&self) -> bool {
        self.count.is_some()
    }
}

/// A `module` block.
#[derive(Clone, Debug)]
pub struct ModuleNode {
    pub name: String,
    pub source: String,
    pub inputs: PropertyValue,
}

/// A `locals` entry.
#[derive(Clone, Debug)]
pub struct LocalNode {
    pub name: String,
    pub value: PropertyValue,
}

/// A `variable` block.
#[derive(Clone, Debug)]
pub struct VariableNode {
    pub name: String,
    pub default: Option<Literal>,
}

impl VariableNode {
    pub fn new(name: impl Into<String>) -> Self {
        VariableNode {
            name: name.into(),
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: Literal) -> Self {
        self.default = Some(default);
        self
    }

    /// Type of the default value, if there is one.
    pub fn default_type(&self) -> Option<Type> {
        self.default.as_ref().map(|default| match default {
            Literal::Bool(_) => Type::BOOL,
            Literal::Int(_) | Literal::Float(_) => Type::NUMBER,
            Literal::String(_) => Type::STRING,
            Literal::List(_) => Type::UNKNOWN.list_of(),
            Literal::Map(_) => Type::MAP,
            Literal::Unknown => Type::UNKNOWN,
        })
    }

    /// Type of a `var.NAME` reference.
    ///
    /// Variables are strings unless a default says otherwise, in which case
    /// the type is unknown. Only the string case is trusted.
    pub fn reference_type(&self) -> Type {
        match self.default_type() {
            Some(ty) if ty != Type::STRING => Type::UNKNOWN,
            _ => Type::STRING,
        }
    }
}
