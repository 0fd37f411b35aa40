//! Rectangular-table view of a mesh, on top of [`nalgebra`] matrices.

use crate::error::Error;
use crate::error::ErrorKind;
use crate::TetMesh;
use nalgebra::DMatrix;
use nalgebra::Scalar;
use std::path::Path;

/// Build a `rows.len() × ncols` matrix out of a list of rows.
///
/// Every row must have exactly `ncols` elements. An empty list gives a
/// matrix with no rows and `ncols` columns.
///
/// ```
/// let m = medit_tet::list_to_matrix(&[vec![1, 2], vec![3, 4], vec![5, 6]], 2)?;
/// assert_eq!(m.shape(), (3, 2));
/// assert_eq!(m[(2, 0)], 5);
///
/// assert!(medit_tet::list_to_matrix(&[vec![1, 2], vec![3]], 2).is_err());
/// # Ok::<(), medit_tet::Error>(())
/// ```
pub fn list_to_matrix<T, R>(rows: &[R], ncols: usize) -> Result<DMatrix<T>, Error>
where
    T: Scalar,
    R: AsRef<[T]>,
{
    let expected = rows.first().map_or(ncols, |row| row.as_ref().len());
    let mut data = Vec::with_capacity(rows.len() * ncols);
    for (i, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != expected || row.len() != ncols {
            return Err(Error::new(ErrorKind::NotRectangular {
                row: i,
                expected: ncols,
                found: row.len(),
            }));
        }
        data.extend_from_slice(row);
    }
    Ok(DMatrix::from_row_slice(rows.len(), ncols, &data))
}

/// The three tables of a tetrahedral mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshMatrices {
    /// One vertex per row, `x y z`.
    pub vertices: DMatrix<f64>,
    /// One tetrahedron per row, four 0-based vertex indices.
    pub tetrahedra: DMatrix<i32>,
    /// One triangle per row, three 0-based vertex indices.
    pub triangles: DMatrix<i32>,
}

impl TetMesh {
    pub fn to_matrices(&self) -> Result<MeshMatrices, Error> {
        let indices = self.cast::<f64, i32>()?;
        let matrices = MeshMatrices {
            vertices: list_to_matrix(&indices.vertices, 3)?,
            tetrahedra: list_to_matrix(&indices.tetrahedra, 4)?,
            triangles: list_to_matrix(&indices.triangles, 3)?,
        };
        assert_eq!(matrices.vertices.ncols(), 3);
        assert_eq!(matrices.tetrahedra.ncols(), 4);
        assert_eq!(matrices.triangles.ncols(), 3);
        Ok(matrices)
    }
}

/// Load a mesh file into matrices.
///
/// Indices are narrowed to `i32`; a mesh whose indices do not fit fails
/// with a conversion error.
pub fn read_mesh_matrices(path: impl AsRef<Path>) -> Result<MeshMatrices, Error> {
    let path = path.as_ref();
    let matrices = TetMesh::from_file(path)?.to_matrices();
    if let Err(err) = &matrices {
        tracing::error!("failed to convert {}: {}", path.display(), err);
    }
    matrices
}
