use std::collections::HashMap;

/// Dense index of a file in the graph
pub type NodeId = usize;

/// File-level dependency graph.
///
/// Paths are interned to integer ids once; traversals run over ids. Each
/// node keeps its resolved local dependencies as written (a dependency may
/// point at a path that was never scanned) and the ids of the nodes that
/// import it.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    paths: Vec<String>,
    index: HashMap<String, NodeId>,
    depends_on: Vec<Vec<String>>,
    used_by: Vec<Vec<NodeId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, returning the existing id if the path is already known.
    pub fn add_node(&mut self, path: impl Into<String>) -> NodeId {
        let path = path.into();
        if let Some(&id) = self.index.get(&path) {
            return id;
        }
        let id = self.paths.len();
        self.index.insert(path.clone(), id);
        self.paths.push(path);
        self.depends_on.push(Vec::new());
        self.used_by.push(Vec::new());
        id
    }

    /// Records that `from` depends on `to`. Duplicates and self-edges are
    /// dropped. Reverse edges are not touched until [`Self::link_reverse_edges`].
    pub fn add_dependency(&mut self, from: NodeId, to: impl Into<String>) {
        let to = to.into();
        if self.paths[from] == to || self.depends_on[from].contains(&to) {
            return;
        }
        self.depends_on[from].push(to);
    }

    /// Rebuilds every `used_by` list from the `depends_on` lists, so that
    /// `B ∈ A.depends_on` implies `A ∈ B.used_by` whenever `B` is a node.
    pub fn link_reverse_edges(&mut self) {
        for list in &mut self.used_by {
            list.clear();
        }
        for from in 0..self.paths.len() {
            for target in &self.depends_on[from] {
                if let Some(&to) = self.index.get(target) {
                    self.used_by[to].push(from);
                }
            }
        }
    }

    pub fn id_of(&self, path: &str) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    pub fn path_of(&self, id: NodeId) -> &str {
        &self.paths[id]
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn node_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of edges between two known nodes
    pub fn edge_count(&self) -> usize {
        self.used_by.iter().map(Vec::len).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.paths.iter().map(String::as_str)
    }

    /// Resolved local dependencies of `path`; empty for unknown paths.
    pub fn depends_on(&self, path: &str) -> &[String] {
        self.id_of(path)
            .map(|id| self.depends_on[id].as_slice())
            .unwrap_or(&[])
    }

    /// Files importing `path`; empty for unknown paths.
    pub fn used_by(&self, path: &str) -> Vec<&str> {
        self.id_of(path)
            .map(|id| self.used_by[id].iter().map(|&u| self.path_of(u)).collect())
            .unwrap_or_default()
    }

    pub fn used_by_ids(&self, id: NodeId) -> &[NodeId] {
        &self.used_by[id]
    }
}
