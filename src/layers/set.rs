//! Named collection of layer meshes.

use std::collections::BTreeMap;

use crate::geometry::MeshBuffer;

/// Meshes keyed by a layer name such as `"base"`, `"grass"` or `"snow"`.
///
/// Inserting under an existing name merges into that layer rather than
/// replacing it. Iteration order is sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerSet {
    layers: BTreeMap<String, MeshBuffer>,
}

impl LayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `mesh` to the layer `name`, merging with any existing mesh.
    pub fn insert(&mut self, name: &str, mesh: MeshBuffer) -> &mut Self {
        match self.layers.get_mut(name) {
            Some(existing) => existing.merge(&mesh),
            None => {
                self.layers.insert(name.to_string(), mesh);
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&MeshBuffer> {
        self.layers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.layers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MeshBuffer)> + '_ {
        self.layers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Total faces across all layers.
    pub fn face_count(&self) -> usize {
        self.layers.values().map(MeshBuffer::face_count).sum()
    }
}
