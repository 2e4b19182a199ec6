/// Error types shared across the book recommender crates.
///
/// These errors represent failures while reading the precomputed inputs (files on disk,
/// NumPy arrays). Application-specific errors should be defined in each server crate and
/// wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("npy decode error: {0}")]
    Npy(String),

    #[error("similarity matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}
