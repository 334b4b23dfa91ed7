//! Nodes and relationships found anywhere in a result, for the network view.
//!
//! The query API returns graph entities as plain objects. A node carries
//! `elementId` and `labels`; a relationship carries `elementId`, `type` and the
//! element ids of both ends. Entities may be nested inside lists, maps and
//! paths, so every cell is walked recursively.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::client::QueryResult;

const NAME_KEYS: [&str; 4] = ["name", "title", "nom", "label"];

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub labels: Vec<String>,
    pub properties: Map<String, Value>,
}

impl GraphNode {
    /// First naming property present, else the first label, else the id.
    pub fn display_name(&self) -> String {
        NAME_KEYS
            .iter()
            .find_map(|key| self.properties.get(*key))
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .or_else(|| self.labels.first().cloned())
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphRelationship {
    pub id: String,
    pub kind: String,
    pub start: String,
    pub end: String,
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub relationships: Vec<GraphRelationship>,
}

impl GraphView {
    /// Distinct entities in first-seen order.
    pub fn from_result(result: &QueryResult) -> Self {
        let mut collector = Collector::default();
        for row in &result.rows {
            for field in &result.fields {
                if let Some(cell) = row.get(field) {
                    collector.walk(cell);
                }
            }
        }
        collector.view
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// `start -[TYPE]-> end` lines using node display names. Ends that were
    /// not returned by the query fall back to their element id.
    pub fn edges(&self) -> Vec<String> {
        self.relationships
            .iter()
            .map(|rel| {
                let name = |id: &str| {
                    self.node(id)
                        .map(GraphNode::display_name)
                        .unwrap_or_else(|| id.to_string())
                };
                format!("{} -[{}]-> {}", name(&rel.start), rel.kind, name(&rel.end))
            })
            .collect()
    }
}

#[derive(Default)]
struct Collector {
    seen_nodes: HashSet<String>,
    seen_relationships: HashSet<String>,
    view: GraphView,
}

impl Collector {
    fn walk(&mut self, value: &Value) {
        match value {
            Value::Array(items) => items.iter().for_each(|item| self.walk(item)),
            Value::Object(map) => {
                if let Some(node) = as_node(map) {
                    if self.seen_nodes.insert(node.id.clone()) {
                        self.view.nodes.push(node);
                    }
                } else if let Some(rel) = as_relationship(map) {
                    if self.seen_relationships.insert(rel.id.clone()) {
                        self.view.relationships.push(rel);
                    }
                } else {
                    map.values().for_each(|v| self.walk(v));
                }
            }
            _ => {}
        }
    }
}

fn properties(map: &Map<String, Value>) -> Map<String, Value> {
    map.get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

fn as_node(map: &Map<String, Value>) -> Option<GraphNode> {
    let id = str_field(map, "elementId")?;
    let labels = map.get("labels")?.as_array()?;
    Some(GraphNode {
        id: id.to_string(),
        labels: labels
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        properties: properties(map),
    })
}

fn as_relationship(map: &Map<String, Value>) -> Option<GraphRelationship> {
    Some(GraphRelationship {
        id: str_field(map, "elementId")?.to_string(),
        kind: str_field(map, "type")?.to_string(),
        start: str_field(map, "startNodeElementId")?.to_string(),
        end: str_field(map, "endNodeElementId")?.to_string(),
        properties: properties(map),
    })
}
