//! Vertices and references for the topology observer.
//!
//! Edge types arrive as text from configuration. An unknown edge type does not
//! abort; the builder collects every rejection and [`VertexBuilder::build`]
//! reports them together.

use crate::edge::EdgeType;
use crate::error::{Result, TopologyError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default operation for new vertices.
pub const INSERT_REPLACE: &str = "InsertReplace";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_fromUniqueId", default, skip_serializing_if = "Option::is_none")]
    pub from_unique_id: Option<String>,
    #[serde(rename = "_toUniqueId", default, skip_serializing_if = "Option::is_none")]
    pub to_unique_id: Option<String>,
    #[serde(rename = "_edgeType")]
    pub edge_type: EdgeType,
}

impl Reference {
    /// Outgoing edge; the target vertex need not exist yet.
    pub fn to_vertex(to_unique_id: impl Into<String>, edge_type: EdgeType) -> Self {
        Self {
            from_unique_id: None,
            to_unique_id: Some(to_unique_id.into()),
            edge_type,
        }
    }

    /// Incoming edge; the source vertex need not exist yet.
    pub fn from_vertex(from_unique_id: impl Into<String>, edge_type: EdgeType) -> Self {
        Self {
            from_unique_id: Some(from_unique_id.into()),
            to_unique_id: None,
            edge_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vertex {
    #[serde(rename = "_operation", skip_serializing_if = "String::is_empty")]
    pub operation: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unique_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<String>,
    /// GeoJSON feature (Point, Polygon or LineString).
    #[serde(rename = "geolocation", skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub match_tokens: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "_reference", skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    #[serde(rename = "_provider", skip_serializing_if = "String::is_empty")]
    pub provider: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
}

impl Vertex {
    /// Vertex with defaults: `InsertReplace`, uniqueId and match token = name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            operation: INSERT_REPLACE.to_string(),
            unique_id: name.clone(),
            match_tokens: vec![name.clone()],
            name,
            ..Self::default()
        }
    }

    pub fn builder(name: impl Into<String>) -> VertexBuilder {
        VertexBuilder::new(name)
    }
}

#[derive(Debug, Clone)]
pub struct VertexBuilder {
    vertex: Vertex,
    errors: Vec<String>,
}

impl VertexBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            vertex: Vertex::new(name),
            errors: Vec::new(),
        }
    }

    /// Changes the display name only; uniqueId and match tokens stay as set.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.vertex.name = name.into();
        self
    }

    #[must_use]
    pub fn unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.vertex.unique_id = unique_id.into();
        self
    }

    #[must_use]
    pub fn entity_types<I, S>(mut self, entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vertex.entity_types = entity_types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn geo_location(mut self, feature: Value) -> Self {
        self.vertex.geo_location = Some(feature);
        self
    }

    #[must_use]
    pub fn match_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vertex.match_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vertex.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.vertex.operation = operation.into();
        self
    }

    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.vertex.provider = provider.into();
        self
    }

    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vertex.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn to_reference(mut self, to_unique_id: impl Into<String>, edge_type: &str) -> Self {
        match edge_type.parse::<EdgeType>() {
            Ok(edge) => self
                .vertex
                .references
                .push(Reference::to_vertex(to_unique_id, edge)),
            Err(e) => self.errors.push(e.to_string()),
        }
        self
    }

    #[must_use]
    pub fn from_reference(mut self, from_unique_id: impl Into<String>, edge_type: &str) -> Self {
        match edge_type.parse::<EdgeType>() {
            Ok(edge) => self
                .vertex
                .references
                .push(Reference::from_vertex(from_unique_id, edge)),
            Err(e) => self.errors.push(e.to_string()),
        }
        self
    }

    /// Returns the vertex, or every configuration error collected so far.
    pub fn build(self) -> Result<Vertex> {
        if self.errors.is_empty() {
            Ok(self.vertex)
        } else {
            Err(TopologyError::InvalidConfiguration {
                vertex: self.vertex.unique_id,
                errors: self.errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_vertex_has_defaults() {
        let v = Vertex::new("router-1");
        assert_eq!(v.operation, INSERT_REPLACE);
        assert_eq!(v.unique_id, "router-1");
        assert_eq!(v.match_tokens, vec!["router-1".to_string()]);
        assert!(v.properties.is_empty());
    }

    #[test]
    fn builder_collects_every_bad_edge_type() {
        let err = Vertex::builder("vm-7")
            .to_reference("host-1", "runsOn")
            .to_reference("db-1", "talksTo")
            .from_reference("lb-1", "balances")
            .build()
            .unwrap_err();

        match err {
            TopologyError::InvalidConfiguration { vertex, errors } => {
                assert_eq!(vertex, "vm-7");
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("talksTo"));
                assert!(errors[1].contains("balances"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn references_serialize_with_one_endpoint() {
        let v = Vertex::builder("vm-7")
            .to_reference("host-1", "runsOn")
            .from_reference("lb-1", "loadBalances")
            .build()
            .unwrap();
        let refs = serde_json::to_value(&v.references).unwrap();
        assert_eq!(
            refs,
            json!([
                {"_toUniqueId": "host-1", "_edgeType": "runsOn"},
                {"_fromUniqueId": "lb-1", "_edgeType": "loadBalances"}
            ])
        );
    }
}
