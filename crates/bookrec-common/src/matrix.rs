/// Dense pairwise similarity matrix, read once from a NumPy `.npy` file.
///
/// The matrix is produced offline (text and genre features blended into one score) and
/// consumed here as an opaque square array. Both `float64` and `float32` payloads are
/// accepted; values are widened to `f64`.
use std::path::Path;

use ndarray::{Array2, ArrayView1};
use ndarray_npy::ReadNpyExt;
use tracing::debug;

use crate::error::CommonError;

#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

impl SimilarityMatrix {
    pub fn from_npy_file(path: &Path) -> Result<Self, CommonError> {
        let bytes = std::fs::read(path).map_err(|source| CommonError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_npy_bytes(&bytes)
    }

    pub fn from_npy_bytes(bytes: &[u8]) -> Result<Self, CommonError> {
        let scores = match Array2::<f64>::read_npy(bytes) {
            Ok(scores) => scores,
            Err(wide_err) => {
                debug!(error = %wide_err, "matrix is not float64, retrying as float32");
                Array2::<f32>::read_npy(bytes)
                    .map_err(|_| CommonError::Npy(wide_err.to_string()))?
                    .mapv(f64::from)
            }
        };
        Self::from_array(scores)
    }

    /// Rejects non-square input; the row/column count is the number of books it covers.
    pub fn from_array(scores: Array2<f64>) -> Result<Self, CommonError> {
        let (rows, cols) = scores.dim();
        if rows != cols {
            return Err(CommonError::NotSquare { rows, cols });
        }
        Ok(Self { scores })
    }

    pub fn dim(&self) -> usize {
        self.scores.nrows()
    }

    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.dim()).then(|| self.scores.row(index))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use ndarray_npy::WriteNpyExt;

    use super::*;

    fn npy_bytes<A: WriteNpyExt>(array: &A) -> Vec<u8> {
        let mut buf = Vec::new();
        array.write_npy(&mut buf).expect("write npy");
        buf
    }

    #[test]
    fn reads_float64_matrix() {
        let bytes = npy_bytes(&array![[1.0_f64, 0.25], [0.25, 1.0]]);
        let matrix = SimilarityMatrix::from_npy_bytes(&bytes).expect("decode");
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.row(0).map(|r| r[1]), Some(0.25));
    }

    #[test]
    fn widens_float32_matrix() {
        let bytes = npy_bytes(&array![[1.0_f32, 0.5], [0.5, 1.0]]);
        let matrix = SimilarityMatrix::from_npy_bytes(&bytes).expect("decode");
        assert_eq!(matrix.row(1).map(|r| r[0]), Some(0.5));
    }

    #[test]
    fn rejects_non_square() {
        let bytes = npy_bytes(&array![[1.0_f64, 0.5, 0.1], [0.5, 1.0, 0.2]]);
        let err = SimilarityMatrix::from_npy_bytes(&bytes).unwrap_err();
        assert!(matches!(err, CommonError::NotSquare { rows: 2, cols: 3 }));
    }

    #[test]
    fn rejects_garbage() {
        let err = SimilarityMatrix::from_npy_bytes(b"not an npy file").unwrap_err();
        assert!(matches!(err, CommonError::Npy(_)));
    }

    #[test]
    fn row_out_of_range_is_none() {
        let matrix = SimilarityMatrix::from_array(array![[1.0]]).expect("square");
        assert!(matrix.row(1).is_none());
    }
}
