//! Resource property schemas.
//!
//! A `Schema` describes one node of a resource's property tree: its declared
//! `Type`, the named properties nested under it, and for list-typed
//! properties the schema of each element. Dotted property paths such as
//! `ebs_block_device.0.volume_size` are resolved one element at a time with
//! [`Schema::property_schemas`].
//!
//! Nested tables are reference counted so that resolving a path element is a
//! cheap clone rather than a deep copy of the provider's schema.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::Type;

/// Declared shape of a (possibly nested) resource property.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Schema {
    ty: Type,
    properties: Option<Arc<FxHashMap<String, Schema>>>,
    element: Option<Arc<Schema>>,
}

impl Schema {
    /// A leaf schema of the given type.
    pub fn new(ty: Type) -> Self {
        Schema {
            ty,
            properties: None,
            element: None,
        }
    }

    /// The schema of something nothing is known about.
    pub fn unknown() -> Self {
        Schema::new(Type::UNKNOWN)
    }

    /// A block with named properties. Blocks are map-typed.
    pub fn object<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        let properties: FxHashMap<String, Schema> = properties
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect();
        Schema {
            ty: Type::MAP,
            properties: Some(Arc::new(properties)),
            element: None,
        }
    }

    /// A list whose elements are described by `element`.
    pub fn list(element: Schema) -> Self {
        Schema {
            ty: element.ty.list_of(),
            properties: None,
            element: Some(Arc::new(element)),
        }
    }

    /// Add (or replace) a named property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let properties = self.properties.get_or_insert_with(Default::default);
        Arc::make_mut(properties).insert(name.into(), schema);
        self
    }

    /// The declared type of this node.
    #[inline]
    pub fn ty(&self) -> Type {
        self.ty
    }

    /// The schema for one property path element.
    ///
    /// Named properties are looked up in the declared property table; an
    /// integer element selects the element schema of a list. Anything else,
    /// including the empty string, yields [`Schema::unknown`].
    pub fn property_schemas(&self, name: &str) -> Schema {
        if let Some(schema) = self.properties.as_ref().and_then(|p| p.get(name)) {
            return schema.clone();
        }
        if let Some(element) = &self.element {
            if name.parse::<u64>().is_ok() {
                return Schema::clone(element);
            }
        }
        Schema::unknown()
    }

    /// Resolve a whole property path, element by element.
    pub fn walk<'a, I>(&self, elements: I) -> Schema
    where
        I: IntoIterator<Item = &'a str>,
    {
        elements
            .into_iter()
            .fold(self.clone(), |schema, element| schema.property_schemas(element))
    }

    /// Declared property names, in no particular order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .flat_map(|p| p.keys().map(String::as_str))
    }
}

#[cfg(test)]
mod tests;
