//! Wavefront OBJ export.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::geometry::MeshBuffer;
use crate::layers::LayerSet;

/// Errors that can occur during OBJ export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes `mesh` as a single OBJ object named `name`.
///
/// Emits one `vn` per face so flat shading survives the round trip. Face
/// indices are 1-based as the format requires.
pub fn write_obj<W: Write>(
    mesh: &MeshBuffer,
    name: &str,
    writer: &mut W,
) -> Result<(), ExportError> {
    writeln!(writer, "o {}", name)?;

    for v in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for face in mesh.faces() {
        let n = face.normal;
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for (i, face) in mesh.faces().iter().enumerate() {
        let [a, b, c] = face.indices;
        let n = i + 1;
        writeln!(writer, "f {}//{} {}//{} {}//{}", a + 1, n, b + 1, n, c + 1, n)?;
    }

    Ok(())
}

/// Exports a mesh to an OBJ file, naming the object after the file stem.
///
/// # Arguments
/// * `mesh` - The mesh to export
/// * `path` - Output file path
pub fn export_mesh_obj(mesh: &MeshBuffer, path: &Path) -> Result<(), ExportError> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh");

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, name, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Exports every layer of a set as its own OBJ file.
///
/// Files are named using the pattern: `{base_name}_{layer}.obj`. The output
/// directory is created if needed.
///
/// # Returns
/// The written paths in layer order.
pub fn export_layers_obj(
    layers: &LayerSet,
    output_dir: &Path,
    base_name: &str,
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(layers.len());
    for (layer, mesh) in layers.iter() {
        let path = output_dir.join(format!("{}_{}.obj", base_name, layer));
        export_mesh_obj(mesh, &path)?;
        log::debug!("wrote {} ({} faces)", path.display(), mesh.face_count());
        written.push(path);
    }

    Ok(written)
}
