use petgraph::{graph::NodeIndex, visit::EdgeRef, Directed, Direction, Graph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::index::{DeclarationIndex, TypeResolver};
use super::model::{InheritanceEdge, InheritanceKind, TypeKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeNode {
    pub qualified_name: String,
    pub kind: TypeKind,
}

/// Edges point from subtype to supertype.
pub type InheritanceGraph = Graph<TypeNode, InheritanceKind, Directed>;

pub struct HierarchyGraph {
    graph: InheritanceGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl HierarchyGraph {
    /// One node per indexed type, one edge per resolvable supertype reference.
    pub fn from_index(index: &DeclarationIndex) -> Self {
        let types = index.types();
        let mut builder = GraphBuilder::new();

        for decl in &types {
            builder.add_type(TypeNode {
                qualified_name: decl.qualified_name.clone(),
                kind: decl.kind,
            });
        }

        for decl in &types {
            for (reference, kind) in decl.supertype_refs() {
                if let Some(supertype) = index.resolve(reference, decl) {
                    builder.add_edge(InheritanceEdge::new(
                        kind,
                        decl.qualified_name.clone(),
                        supertype.qualified_name.clone(),
                    ));
                }
            }
        }

        builder.build()
    }

    pub fn graph(&self) -> &InheritanceGraph {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn edges(&self) -> Vec<InheritanceEdge> {
        self.graph
            .edge_references()
            .map(|edge| {
                InheritanceEdge::new(
                    *edge.weight(),
                    self.graph[edge.source()].qualified_name.clone(),
                    self.graph[edge.target()].qualified_name.clone(),
                )
            })
            .collect()
    }

    pub fn direct_supertypes(&self, qualified_name: &str) -> Vec<&str> {
        self.neighbors(qualified_name, Direction::Outgoing)
    }

    pub fn direct_subtypes(&self, qualified_name: &str) -> Vec<&str> {
        self.neighbors(qualified_name, Direction::Incoming)
    }

    fn neighbors(&self, qualified_name: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_map.get(qualified_name) else {
            return Vec::new();
        };
        // petgraph walks newest edge first
        let mut names: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].qualified_name.as_str())
            .collect();
        names.reverse();
        names
    }
}

pub struct GraphBuilder {
    graph: InheritanceGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    pub fn add_type(&mut self, node: TypeNode) -> NodeIndex {
        if let Some(&existing) = self.node_map.get(&node.qualified_name) {
            return existing;
        }
        let name = node.qualified_name.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(name, index);
        index
    }

    /// Returns `None` when either endpoint is unknown or the edge already exists.
    pub fn add_edge(&mut self, edge: InheritanceEdge) -> Option<petgraph::graph::EdgeIndex> {
        let source_idx = *self.node_map.get(&edge.subtype)?;
        let target_idx = *self.node_map.get(&edge.supertype)?;
        if self.graph.contains_edge(source_idx, target_idx) {
            return None;
        }
        Some(self.graph.add_edge(source_idx, target_idx, edge.kind))
    }

    pub fn build(self) -> HierarchyGraph {
        HierarchyGraph {
            graph: self.graph,
            node_map: self.node_map,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
