//! Export module for saving generated meshes.
//!
//! Meshes and layer sets are written as Wavefront OBJ, one file per layer.

mod obj;

pub use obj::{ExportError, export_layers_obj, export_mesh_obj, write_obj};
