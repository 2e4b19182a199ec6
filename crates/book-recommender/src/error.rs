#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("dataset error at line {line}: {message}")]
    Dataset { line: u64, message: String },

    #[error(
        "dataset has {books} books but the similarity matrix is {matrix}x{matrix}; \
         both files must come from the same pipeline run"
    )]
    Integrity { books: usize, matrix: usize },

    #[error(transparent)]
    Common(#[from] bookrec_common::error::CommonError),
}

/// Query-level failures. These are reported back to the caller and never abort the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("limit must be at least 1")]
    ZeroLimit,

    #[error("book not found: '{0}'")]
    TitleNotFound(String),
}
