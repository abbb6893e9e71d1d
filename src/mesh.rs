//! Triangle meshes with texture coordinates.
//!
//! Meshes are loaded from Wavefront OBJ files with [`tobj`]. OBJ indices are
//! 1-based and position/texcoord/normal indices are independent; here they
//! are converted to zero-based indices into the mesh's own arrays and checked
//! once, so the accessors never see an out-of-range face.

use std::io::BufRead;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("face {face} references {kind} {index}, but the mesh only has {len}")]
    IndexOutOfRange {
        face: usize,
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

/// One corner of a face: indices into the vertex, texcoord and normal arrays.
///
/// Normal indices are carried along from the source file but not used for
/// shading, which works per face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceVertex {
    pub vertex: usize,
    pub uv: usize,
    pub normal: usize,
}

impl FaceVertex {
    pub const fn new(vertex: usize, uv: usize, normal: usize) -> Self {
        Self { vertex, uv, normal }
    }
}

/// A triangle, as three corners.
pub type Face = [FaceVertex; 3];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    faces: Vec<Face>,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

impl Mesh {
    /// Builds a mesh, checking every face index against the vertex and
    /// texcoord arrays.
    pub fn new(vertices: Vec<Vec3>, texcoords: Vec<Vec2>, faces: Vec<Face>) -> Result<Self, LoadError> {
        for (i, face) in faces.iter().enumerate() {
            for corner in face {
                if corner.vertex >= vertices.len() {
                    return Err(LoadError::IndexOutOfRange {
                        face: i,
                        kind: "vertex",
                        index: corner.vertex,
                        len: vertices.len(),
                    });
                }
                if corner.uv >= texcoords.len() {
                    return Err(LoadError::IndexOutOfRange {
                        face: i,
                        kind: "texcoord",
                        index: corner.uv,
                        len: texcoords.len(),
                    });
                }
            }
        }

        Ok(Self {
            vertices,
            texcoords,
            faces,
        })
    }

    /// Load a mesh from an OBJ file. Every object in the file is merged into
    /// one mesh; polygons are triangulated.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj(path.as_ref(), &load_options())?;
        let mesh = Self::from_models(&models)?;
        info!(
            "loaded {}: {} vertices, {} texcoords, {} faces",
            path.as_ref().display(),
            mesh.vertex_count(),
            mesh.texcoord_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    /// Load a mesh from OBJ source text. Material libraries are ignored.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &load_options(), |_| Ok(Default::default()))?;
        Self::from_models(&models)
    }

    fn from_models(models: &[tobj::Model]) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        let mut texcoords = Vec::new();
        let mut faces = Vec::new();
        // Shared (0, 0) texcoord for objects that have none.
        let mut default_uv = None;

        for model in models {
            let mesh = &model.mesh;
            let vertex_base = vertices.len();
            let texcoord_base = texcoords.len();

            vertices.extend(mesh.positions.chunks_exact(3).map(|p| Vec3::new(p[0], p[1], p[2])));
            texcoords.extend(mesh.texcoords.chunks_exact(2).map(|t| Vec2::new(t[0], t[1])));

            let has_uvs = !mesh.texcoord_indices.is_empty();
            if !has_uvs && !mesh.indices.is_empty() {
                warn!("object '{}' has no texture coordinates", model.name);
            }

            for (f, corners) in mesh.indices.chunks_exact(3).enumerate() {
                let mut face = [FaceVertex::default(); 3];
                for (k, corner) in face.iter_mut().enumerate() {
                    let i = f * 3 + k;
                    corner.vertex = vertex_base + corners[k] as usize;
                    corner.uv = if has_uvs {
                        texcoord_base + mesh.texcoord_indices[i] as usize
                    } else {
                        *default_uv.get_or_insert_with(|| {
                            texcoords.push(Vec2::ZERO);
                            texcoords.len() - 1
                        })
                    };
                    corner.normal = mesh.normal_indices.get(i).map_or(0, |&n| n as usize);
                }
                faces.push(face);
            }
        }

        if faces.is_empty() {
            warn!("mesh has no faces");
        }
        Self::new(vertices, texcoords, faces)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn texcoord_count(&self) -> usize {
        self.texcoords.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// # Panics
    /// Panics if `i >= vertex_count()`.
    pub fn vertex(&self, i: usize) -> Vec3 {
        self.vertices[i]
    }

    /// # Panics
    /// Panics if `i >= texcoord_count()`.
    pub fn texcoord(&self, i: usize) -> Vec2 {
        self.texcoords[i]
    }

    /// # Panics
    /// Panics if `i >= face_count()`.
    pub fn face(&self, i: usize) -> Face {
        self.faces[i]
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// World-space positions of a face's corners.
    pub fn face_vertices(&self, face: &Face) -> [Vec3; 3] {
        face.map(|corner| self.vertices[corner.vertex])
    }

    /// Texture coordinates of a face's corners.
    pub fn face_texcoords(&self, face: &Face) -> [Vec2; 3] {
        face.map(|corner| self.texcoords[corner.uv])
    }
}
