use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The crate's error type.
///
/// Every variant but `EntropyUnavailable` signals a programming or configuration error
/// upstream; callers are not expected to recover from them, only to stop.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    ZeroDimension {
        rows: usize,
        cols: usize,
    },
    DimensionOverflow {
        rows: usize,
        cols: usize,
    },
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    EntropyUnavailable,
    InvalidInput(&'static str),
    InvalidConfig(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::ZeroDimension { rows, cols } => {
                format!("Cannot initialize a 0 dimensional matrix, got {rows}x{cols}")
            }
            MlErr::DimensionOverflow { rows, cols } => {
                format!("A {rows}x{cols} matrix exceeds the addressable memory")
            }
            MlErr::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => format!("Out of bound access at ({row}, {col}) in a {rows}x{cols} matrix"),
            MlErr::ShapeMismatch { op, lhs, rhs } => format!(
                "Invalid dimensions for {op}, got {}x{} and {}x{}",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            MlErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => format!(
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            MlErr::EntropyUnavailable => {
                "No entropy source available to seed the random number generator".to_string()
            }
            MlErr::InvalidInput(msg) => format!("Invalid input: {msg}"),
            MlErr::InvalidConfig(msg) => format!("Invalid config: {msg}"),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}
