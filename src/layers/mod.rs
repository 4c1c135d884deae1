//! Material layers derived from a base mesh.
//!
//! Layers such as grass, snow and moss are built by selecting faces of a
//! surface by orientation (and optionally height) and nudging them off the
//! surface so they render on top of it.

mod extract;
mod moss;
mod set;

pub use extract::{LayerSelection, extract_layer};
pub use moss::{MOSS_DIRECTION, MOSS_SINK, apply_moss_layer};
pub use set::LayerSet;
