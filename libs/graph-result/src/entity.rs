use std::collections::BTreeMap;

use serde::Serialize;

use crate::mapping::{self, Mapping};
use crate::scalar::Scalar;

/// Property bag of a node or edge.
pub type Properties = BTreeMap<String, Scalar>;

/// Graph node as returned in a result cell.
///
/// `id` is unique within one result set only; it may be reused after the
/// graph is mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Node {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: Properties,
}

impl Node {
    /// Keys: `id`, `labels`, `properties`.
    pub fn to_mapping(&self) -> Mapping {
        let mut m = Mapping::new();
        m.insert("id".into(), self.id.into());
        m.insert("labels".into(), self.labels.clone().into());
        m.insert("properties".into(), mapping::properties_value(&self.properties));
        m
    }

    pub fn property(&self, name: &str) -> Option<&Scalar> {
        self.properties.get(name)
    }
}

/// Graph relationship as returned in a result cell.
///
/// `src_node` / `dst_node` refer to node ids within the same result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: i64,
    #[serde(rename = "type")]
    pub ty: String,
    pub src_node: i64,
    pub dst_node: i64,
    pub properties: Properties,
}

impl Edge {
    /// Keys: `id`, `type`, `srcNode`, `dstNode`, `properties`.
    pub fn to_mapping(&self) -> Mapping {
        let mut m = Mapping::new();
        m.insert("id".into(), self.id.into());
        m.insert("type".into(), self.ty.clone().into());
        m.insert("srcNode".into(), self.src_node.into());
        m.insert("dstNode".into(), self.dst_node.into());
        m.insert("properties".into(), mapping::properties_value(&self.properties));
        m
    }

    pub fn property(&self, name: &str) -> Option<&Scalar> {
        self.properties.get(name)
    }
}
