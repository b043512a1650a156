//! Wavefront OBJ triangle reader.
//!
//! Only vertex positions and triangular faces are kept. Texture
//! coordinates, normals, groups and materials are accepted and skipped;
//! anything else is rejected, as are faces with more than three corners.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::debug;

use super::{Triangle, TriangleMesh};
use crate::util::{Error, Result, Vec3};

/// Record tags that carry nothing this reader needs.
const IGNORED_TAGS: &[&str] = &["vt", "vn", "vp", "o", "g", "s", "usemtl", "mtllib"];

/// Decode an OBJ stream into triangles, in face order.
pub fn read_obj(reader: impl Read) -> Result<TriangleMesh> {
    let reader = BufReader::new(reader);

    let mut vertices: Vec<Vec3> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| Error::obj(line_no, e.to_string()))?;
        let text = if line_no == 1 { line.trim_start_matches('\u{feff}') } else { &line };
        let s = text.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }

        let mut it = s.split_whitespace();
        let tag = it.next().unwrap_or("");
        match tag {
            "v" => {
                let x = parse_coord(it.next(), line_no)?;
                let y = parse_coord(it.next(), line_no)?;
                let z = parse_coord(it.next(), line_no)?;
                // Optional w is checked but not kept.
                if let Some(w) = it.next() {
                    parse_coord(Some(w), line_no)?;
                }
                if it.next().is_some() {
                    return Err(Error::obj(line_no, "vertex has more than four coordinates"));
                }
                vertices.push(Vec3::new(x, y, z));
            }
            "f" => {
                let corners: Vec<&str> = it.collect();
                if corners.len() != 3 {
                    return Err(Error::obj(
                        line_no,
                        format!("only triangles are supported, found a face with {} vertices", corners.len()),
                    ));
                }
                let a = resolve_index(corners[0], vertices.len(), line_no)?;
                let b = resolve_index(corners[1], vertices.len(), line_no)?;
                let c = resolve_index(corners[2], vertices.len(), line_no)?;
                triangles.push(Triangle::new(vertices[a], vertices[b], vertices[c]));
            }
            t if IGNORED_TAGS.contains(&t) => {}
            t => return Err(Error::obj(line_no, format!("unrecognized item type '{}'", t))),
        }
    }

    debug!(vertices = vertices.len(), triangles = triangles.len(), "OBJ decoded");
    Ok(TriangleMesh { triangles, num_vertices: vertices.len() })
}

/// Decode an OBJ stream and keep only the triangles.
pub fn read_obj_triangles(reader: impl Read) -> Result<Vec<Triangle>> {
    read_obj(reader).map(Vec::from)
}

/// Open and decode an OBJ file.
///
/// Any failure to open `path` is reported as [`Error::FileNotFound`].
pub fn open_obj(path: impl AsRef<Path>) -> Result<TriangleMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::not_found(path, e))?;
    read_obj(file)
}

fn parse_coord(tok: Option<&str>, line_no: usize) -> Result<f32> {
    let tok = tok.ok_or_else(|| Error::obj(line_no, "vertex needs three coordinates"))?;
    tok.parse()
        .map_err(|_| Error::obj(line_no, format!("invalid coordinate '{}'", tok)))
}

/// Turn a face corner (`v`, `v/vt`, `v//vn`, `v/vt/vn`) into a 0-based
/// position index. Negative indices count back from the last vertex.
fn resolve_index(tok: &str, len: usize, line_no: usize) -> Result<usize> {
    let pos = tok.split('/').next().unwrap_or("");
    let idx: i64 = pos
        .parse()
        .map_err(|_| Error::obj(line_no, format!("invalid vertex index '{}'", tok)))?;

    let resolved = match idx {
        i if i > 0 => Some(i - 1),
        i if i < 0 => Some(len as i64 + i),
        _ => None,
    };

    resolved
        .filter(|&i| i >= 0 && (i as usize) < len)
        .map(|i| i as usize)
        .ok_or_else(|| {
            Error::obj(line_no, format!("vertex index {} out of range ({} vertices)", idx, len))
        })
}
