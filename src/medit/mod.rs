//! This module allows to load tetrahedral volume meshes from Medit ASCII
//! files, as described by Frey in
//! [MEDIT : An interactive Mesh visualization Software](https://hal.inria.fr/inria-00069921).
//!
//! Only the subset written by tetrahedral mesh generators is understood:
//!
//! ```text
//! MeshVersionFormatted 1
//! Dimension 3
//! Vertices
//! <count>
//! x y z ref
//! Triangles
//! <count>
//! i j k ref
//! Tetrahedra
//! <count>
//! i j k l ref
//! ```
//!
//! Sections must appear in this order. Blank lines and lines starting with
//! `#` are allowed before each keyword. Indices are 1-based in the file and
//! 0-based in memory; reference fields are read and dropped.

use crate::error::Error;
use crate::error::ErrorKind;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str;

mod lexer;
mod parser;

/// The sections of a tetrahedral mesh file, in file order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Vertices,
    Triangles,
    Tetrahedra,
}

impl Section {
    pub fn keyword(self) -> &'static str {
        match self {
            Section::Vertices => "Vertices",
            Section::Triangles => "Triangles",
            Section::Tetrahedra => "Tetrahedra",
        }
    }

    /// Number of values in each record, not counting the reference field.
    pub fn arity(self) -> usize {
        match self {
            Section::Vertices | Section::Triangles => 3,
            Section::Tetrahedra => 4,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Settings of a mesh load.
///
/// ```
/// use medit_tet::ReadOptions;
///
/// let input = "MeshVersionFormatted 1\nDimension 3\n\
///     Vertices\n0\nTriangles\n1\n1 2 3 0\nTetrahedra\n0\n";
///
/// assert!(ReadOptions::default().read_str(input).is_err());
/// let lenient = ReadOptions {
///     check_indices: false,
/// };
/// assert_eq!(lenient.read_str(input)?.triangles(), &[[0, 1, 2]]);
/// # Ok::<(), medit_tet::Error>(())
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ReadOptions {
    /// Reject meshes whose triangles or tetrahedra refer to vertices that do
    /// not exist.
    pub check_indices: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            check_indices: true,
        }
    }
}

impl ReadOptions {
    /// Read and parse a mesh from a stream of bytes.
    ///
    /// Wrapping a file in a [`std::io::BufReader`] is recommended.
    pub fn read(&self, r: impl io::BufRead) -> Result<TetMesh, Error> {
        parser::parse_ascii(r, self)
    }

    pub fn read_str(&self, s: &str) -> Result<TetMesh, Error> {
        self.read(s.as_bytes())
    }

    /// Read and parse a mesh from a file.
    ///
    /// The file is closed before this function returns, whatever the result.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<TetMesh, Error> {
        let path = path.as_ref();
        let span = tracing::info_span!("read_mesh", path = %path.display());
        let _enter = span.enter();

        let result = fs::File::open(path)
            .map_err(|source| {
                Error::new(ErrorKind::Open {
                    path: path.to_path_buf(),
                    source,
                })
            })
            .and_then(|file| self.read(io::BufReader::new(file)));
        match &result {
            Ok(mesh) => tracing::info!(
                vertices = mesh.node_count(),
                triangles = mesh.triangles.len(),
                tetrahedra = mesh.tetrahedra.len(),
                "mesh loaded",
            ),
            Err(err) => tracing::error!("failed to load {}: {}", path.display(), err),
        }
        result
    }
}

/// A tetrahedral mesh, as found in a Medit file.
///
/// Coordinates are kept as `f64` and indices as `i64`, whatever the type the
/// caller eventually wants; see [`TetMesh::cast`] for the conversion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TetMesh {
    vertices: Vec<[f64; 3]>,
    tetrahedra: Vec<[i64; 4]>,
    triangles: Vec<[i64; 3]>,
}

impl TetMesh {
    pub fn from_raw_parts(
        vertices: Vec<[f64; 3]>,
        tetrahedra: Vec<[i64; 4]>,
        triangles: Vec<[i64; 3]>,
    ) -> Self {
        Self {
            vertices,
            tetrahedra,
            triangles,
        }
    }

    /// Read and parse a mesh from a file with the default [`ReadOptions`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<TetMesh, Error> {
        ReadOptions::default().read_file(path)
    }

    /// Read and parse a mesh from a stream of bytes with the default
    /// [`ReadOptions`].
    pub fn from_reader(r: impl io::BufRead) -> Result<TetMesh, Error> {
        ReadOptions::default().read(r)
    }

    /// Vertex coordinates, in file order.
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    /// Tetrahedra as 0-based indices into [`TetMesh::vertices`].
    pub fn tetrahedra(&self) -> &[[i64; 4]] {
        &self.tetrahedra
    }

    /// Triangles (usually boundary faces) as 0-based indices into
    /// [`TetMesh::vertices`].
    pub fn triangles(&self) -> &[[i64; 3]] {
        &self.triangles
    }

    /// Coordinates of the vertex at 0-based position `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not less than [`TetMesh::node_count`]. Use
    /// `vertices().get(idx)` for a checked lookup.
    pub fn vertex(&self, idx: usize) -> [f64; 3] {
        self.vertices[idx]
    }

    /// Returns the number of nodes (vertices) of the mesh.
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn element_count(&self) -> usize {
        self.tetrahedra.len()
    }

    pub fn into_parts(self) -> (Vec<[f64; 3]>, Vec<[i64; 4]>, Vec<[i64; 3]>) {
        (self.vertices, self.tetrahedra, self.triangles)
    }
}

impl str::FromStr for TetMesh {
    type Err = Error;

    fn from_str(s: &str) -> Result<TetMesh, Error> {
        ReadOptions::default().read_str(s)
    }
}
