//! Loader for tetrahedral volume meshes stored in Medit ASCII files
//! (`.mesh`).
//!
//! ```no_run
//! let mesh = medit_tet::read_mesh("bunny.mesh")?;
//! for [a, b, c, d] in mesh.tetrahedra() {
//!     println!("{a} {b} {c} {d}");
//! }
//! # Ok::<(), medit_tet::Error>(())
//! ```
//!
//! The parser reads coordinates as `f64` and indices as `i64`. Use
//! [`read_mesh_as`] to get other numeric types, or [`read_mesh_matrices`] to
//! get [`nalgebra`] matrices.
//!
//! Errors are returned as [`Error`] values. Loads from a file additionally
//! report failures through [`tracing`].

mod cast;
mod error;
mod matrix;
mod medit;

pub use cast::TypedMesh;
pub use error::Category;
pub use error::Error;
pub use error::ErrorKind;
pub use matrix::list_to_matrix;
pub use matrix::read_mesh_matrices;
pub use matrix::MeshMatrices;
pub use medit::ReadOptions;
pub use medit::Section;
pub use medit::TetMesh;

use num_traits::NumCast;
use std::path::Path;

/// Load a tetrahedral mesh file with the default [`ReadOptions`].
pub fn read_mesh(path: impl AsRef<Path>) -> Result<TetMesh, Error> {
    TetMesh::from_file(path)
}

/// Load a tetrahedral mesh file and convert it to `S` coordinates and `I`
/// indices.
pub fn read_mesh_as<S, I>(path: impl AsRef<Path>) -> Result<TypedMesh<S, I>, Error>
where
    S: NumCast + Copy + Default,
    I: NumCast + Copy + Default,
{
    let path = path.as_ref();
    let mesh = TetMesh::from_file(path)?.cast();
    if let Err(err) = &mesh {
        tracing::error!("failed to convert {}: {}", path.display(), err);
    }
    mesh
}
