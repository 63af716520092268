//! Index catalog: listing indices and reading field mappings.

use std::collections::BTreeMap;

use geoq_query::{FieldDescriptor, FieldKind, GEOMETRY_FIELD};
use geoq_style::DefaultStyle;
use serde::Serialize;
use tracing::debug;

use crate::{
    client::Client,
    error::ClientError,
    response::{CatIndex, IndexMapping},
};

/// A searchable index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDescriptor {
    /// Index name.
    pub name: String,
}

/// The fields of an index, plus default styles from `_meta.styles`.
#[derive(Debug, Clone, Default)]
pub struct IndexFields {
    /// Normalized field descriptors, sorted by name.
    pub fields: Vec<FieldDescriptor>,
    /// Per-field default styles declared in the mapping.
    pub styles: BTreeMap<String, DefaultStyle>,
}

impl IndexFields {
    /// Returns the descriptor for `name`, if the index has such a field.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that may carry a thematic filter (everything but geometry).
    pub fn filterable(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.kind.is_filterable())
    }
}

impl Client {
    /// Lists searchable indices, excluding system indices (dotted names).
    pub async fn list_indices(&self) -> Result<Vec<IndexDescriptor>, ClientError> {
        let entries: Vec<CatIndex> = self.get_json("/_cat/indices?format=json").await?;

        let mut names: Vec<String> = entries
            .into_iter()
            .map(|entry| entry.index)
            .filter(|name| !name.contains('.'))
            .collect();
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| IndexDescriptor { name })
            .collect())
    }

    /// Reads the field mapping of an index.
    ///
    /// Fields with types the panel does not handle are dropped; the field
    /// named `geom` is always the geometry field regardless of its declared
    /// type. `_meta.styles` entries that fail to parse are dropped too.
    pub async fn get_fields(&self, index: &str) -> Result<IndexFields, ClientError> {
        let mut response: BTreeMap<String, IndexMapping> = self
            .get_json(&format!("/{index}/_mapping?format=json"))
            .await?;

        // The response is keyed by the concrete index name, which may differ
        // from the requested alias; take the named entry or the only one.
        let mapping = match response.remove(index) {
            Some(mapping) => mapping,
            None => response.into_values().next().ok_or_else(|| ClientError::Shape {
                url: format!("{}/{index}/_mapping", self.base_url()),
                detail: "mapping response contains no index entry".to_string(),
            })?,
        };

        let mut fields = Vec::new();
        for (name, property) in mapping.mappings.properties {
            let kind = if name == GEOMETRY_FIELD {
                FieldKind::Geometry
            } else {
                let Some(declared) = property.kind.as_deref() else {
                    debug!(field = %name, "skipping untyped field");
                    continue;
                };
                match FieldKind::from_mapping_type(declared) {
                    Some(kind) => kind,
                    None => {
                        debug!(field = %name, declared, "skipping unhandled field type");
                        continue;
                    }
                }
            };
            fields.push(FieldDescriptor::new(name, kind));
        }

        let mut styles = BTreeMap::new();
        for (field, raw) in mapping.mappings.meta.styles {
            match serde_json::from_value::<DefaultStyle>(raw) {
                Ok(style) => {
                    styles.insert(field, style);
                }
                Err(err) => debug!(%field, %err, "skipping unparsable default style"),
            }
        }

        Ok(IndexFields { fields, styles })
    }
}
