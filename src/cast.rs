//! Conversion of a parsed mesh to caller-chosen numeric types.
//!
//! The parser always works with `f64` coordinates and `i64` indices. Narrower
//! or unsigned types are obtained here, in a single checked step.

use crate::error::Error;
use crate::error::ErrorKind;
use crate::TetMesh;
use num_traits::NumCast;
use num_traits::ToPrimitive;
use std::any;
use std::fmt;

/// A tetrahedral mesh with `S` coordinates and `I` indices.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedMesh<S, I> {
    pub vertices: Vec<[S; 3]>,
    pub tetrahedra: Vec<[I; 4]>,
    pub triangles: Vec<[I; 3]>,
}

/// Whether `T` drops the fractional part of the values it is cast from.
fn is_integral<T: NumCast>() -> bool {
    <T as NumCast>::from(0.5_f64).and_then(|half| half.to_f64()) != Some(0.5)
}

/// Cast `value` to `T`, rejecting finite values that overflow to infinity and
/// fractional values cast to an integer type.
fn cast_one<T, U>(value: U, integral: bool) -> Result<T, Error>
where
    T: NumCast,
    U: ToPrimitive + fmt::Display + Copy,
{
    let error = || {
        Error::new(ErrorKind::Cast {
            value: value.to_string(),
            target: any::type_name::<T>(),
        })
    };
    let cast = <T as NumCast>::from(value).ok_or_else(error)?;
    if let Some(source) = value.to_f64() {
        let overflowed = source.is_finite() && !cast.to_f64().map_or(false, f64::is_finite);
        if overflowed || (integral && source.fract() != 0.0) {
            return Err(error());
        }
    }
    Ok(cast)
}

fn cast_rows<T, U, const N: usize>(rows: &[[U; N]]) -> Result<Vec<[T; N]>, Error>
where
    T: NumCast + Copy + Default,
    U: ToPrimitive + fmt::Display + Copy,
{
    let integral = is_integral::<T>();
    rows.iter()
        .map(|row| {
            let mut cast = [T::default(); N];
            for (dst, src) in cast.iter_mut().zip(row) {
                *dst = cast_one(*src, integral)?;
            }
            Ok(cast)
        })
        .collect()
}

impl TetMesh {
    /// Convert coordinates to `S` and indices to `I`.
    ///
    /// Fails on the first value that `S` or `I` cannot represent, like a
    /// negative index cast to `usize`, a coordinate beyond the range of `f32`
    /// or a fractional coordinate cast to an integer type.
    ///
    /// ```
    /// # use medit_tet::TetMesh;
    /// let mesh: TetMesh = "MeshVersionFormatted 1\nDimension 3\n\
    ///     Vertices\n1\n0.5 0 0 0\nTriangles\n1\n1 1 1 0\nTetrahedra\n0\n"
    ///     .parse()?;
    /// let mesh = mesh.cast::<f32, u32>()?;
    /// assert_eq!(mesh.vertices, [[0.5, 0.0, 0.0]]);
    /// assert_eq!(mesh.triangles, [[0, 0, 0]]);
    /// # Ok::<(), medit_tet::Error>(())
    /// ```
    pub fn cast<S, I>(&self) -> Result<TypedMesh<S, I>, Error>
    where
        S: NumCast + Copy + Default,
        I: NumCast + Copy + Default,
    {
        Ok(TypedMesh {
            vertices: cast_rows(self.vertices())?,
            tetrahedra: cast_rows(self.tetrahedra())?,
            triangles: cast_rows(self.triangles())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Category;

    #[test]
    fn test_cast_usize() {
        let mesh = TetMesh::from_raw_parts(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            vec![[0, 1, 2, 3]],
            vec![[0, 1, 2], [1, 2, 3]],
        );
        let typed = mesh.cast::<f64, usize>().unwrap();
        assert_eq!(typed.tetrahedra, [[0_usize, 1, 2, 3]]);
        assert_eq!(typed.triangles, [[0_usize, 1, 2], [1, 2, 3]]);
        assert_eq!(typed.vertices, mesh.vertices());
    }

    #[test]
    fn test_cast_negative_to_unsigned() {
        let mesh = TetMesh::from_raw_parts(vec![[0.0; 3]], Vec::new(), vec![[0, -1, 0]]);
        let err = mesh.cast::<f64, u32>().unwrap_err();
        assert_eq!(err.category(), Category::Conversion);
        match err.kind() {
            ErrorKind::Cast { value, target } => {
                assert_eq!(value, "-1");
                assert_eq!(*target, "u32");
            }
            kind => panic!("unexpected error kind {:?}", kind),
        }
    }

    #[test]
    fn test_cast_overflow() {
        let mesh = TetMesh::from_raw_parts(Vec::new(), vec![[0, 1, 2, 70_000]], Vec::new());
        assert!(mesh.cast::<f32, i16>().is_err());
        assert!(mesh.cast::<f32, i32>().is_ok());
    }

    #[test]
    fn test_cast_f32() {
        let mesh = TetMesh::from_raw_parts(vec![[0.1, -2.5, 1e10]], Vec::new(), Vec::new());
        let typed = mesh.cast::<f32, i32>().unwrap();
        approx::assert_ulps_eq!(typed.vertices[0][0], 0.1_f32);
        approx::assert_ulps_eq!(typed.vertices[0][1], -2.5_f32);
        approx::assert_relative_eq!(typed.vertices[0][2], 1e10_f32);
    }

    #[test]
    fn test_cast_f32_overflow() {
        let mesh = TetMesh::from_raw_parts(vec![[0.0, 1e300, 0.0]], Vec::new(), Vec::new());
        let err = mesh.cast::<f32, i32>().unwrap_err();
        assert_eq!(err.category(), Category::Conversion);
        assert!(matches!(
            err.kind(),
            ErrorKind::Cast { target: "f32", .. },
        ));
        assert!(mesh.cast::<f64, i32>().is_ok());

        let mesh = TetMesh::from_raw_parts(vec![[f64::INFINITY, 0.0, 0.0]], Vec::new(), Vec::new());
        let typed = mesh.cast::<f32, i32>().unwrap();
        assert_eq!(typed.vertices[0][0], f32::INFINITY);
    }

    #[test]
    fn test_cast_fractional_to_integer() {
        let mesh = TetMesh::from_raw_parts(vec![[0.5, 0.0, 0.0]], Vec::new(), Vec::new());
        let err = mesh.cast::<i32, i32>().unwrap_err();
        assert_eq!(err.category(), Category::Conversion);
        match err.kind() {
            ErrorKind::Cast { value, target } => {
                assert_eq!(value, "0.5");
                assert_eq!(*target, "i32");
            }
            kind => panic!("unexpected error kind {:?}", kind),
        }

        let mesh = TetMesh::from_raw_parts(vec![[2.0, -3.0, 0.0]], Vec::new(), Vec::new());
        let typed = mesh.cast::<i32, u32>().unwrap();
        assert_eq!(typed.vertices, [[2, -3, 0]]);
    }
}
