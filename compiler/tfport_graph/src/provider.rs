//! Provider schema loading.
//!
//! Loading a provider (starting its plugin, asking it for schemas) belongs
//! to the host. The front end only sees the result through
//! [`ProviderLoader`].

use rustc_hash::FxHashMap;
use tfport_ir::ResourceMode;
use tfport_types::Schema;

use crate::ProviderNode;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("unknown provider `{0}`")]
    UnknownProvider(String),
    #[error("failed to load provider `{provider}`: {message}")]
    Load { provider: String, message: String },
}

/// Schemas one provider declares, by resource type name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderSchema {
    resources: FxHashMap<String, Schema>,
    data_sources: FxHashMap<String, Schema>,
}

impl ProviderSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource(mut self, type_name: impl Into<String>, schema: Schema) -> Self {
        self.resources.insert(type_name.into(), schema);
        self
    }

    #[must_use]
    pub fn with_data_source(mut self, type_name: impl Into<String>, schema: Schema) -> Self {
        self.data_sources.insert(type_name.into(), schema);
        self
    }

    /// Schema for a resource type in the given mode.
    pub fn resource(&self, mode: ResourceMode, type_name: &str) -> Option<&Schema> {
        match mode {
            ResourceMode::Managed => self.resources.get(type_name),
            ResourceMode::Data => self.data_sources.get(type_name),
        }
    }
}

/// Loads a provider's schemas on first use.
pub trait ProviderLoader: Send + Sync {
    fn load(&self, provider: &ProviderNode) -> Result<ProviderSchema, ProviderError>;
}

/// A loader over schemas already held in memory, keyed by provider name.
#[derive(Clone, Debug, Default)]
pub struct StaticProviderLoader {
    providers: FxHashMap<String, ProviderSchema>,
}

impl StaticProviderLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_provider(mut self, name: impl Into<String>, schema: ProviderSchema) -> Self {
        self.providers.insert(name.into(), schema);
        self
    }
}

impl ProviderLoader for StaticProviderLoader {
    fn load(&self, provider: &ProviderNode) -> Result<ProviderSchema, ProviderError> {
        self.providers
            .get(&provider.name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownProvider(provider.name.clone()))
    }
}
