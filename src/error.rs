use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("dimensions not compatible: {}x{} and {}x{}", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("matrix must be n x n, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("index ({row}, {col}) out of range for a {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: &'static str },

    #[error("a matrix needs at least one row and one column, got {rows}x{cols}")]
    InvalidShape { rows: usize, cols: usize },
}

impl Error {
    pub(crate) fn parse(input: &str, reason: &'static str) -> Self {
        Error::Parse {
            input: input.to_owned(),
            reason,
        }
    }
}
