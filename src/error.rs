/// Errors surfaced at the load boundary or before a chain starts iterating.
///
/// Degenerate moves inside a running chain are never errors; they are
/// recorded as local rejections on the step outcome instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The adjacency graph cannot be sampled (empty, disconnected, duplicate
    /// ids, dangling edges, missing attributes).
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A sampling parameter is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Return early with `Error::InvalidArgument` unless `cond` holds.
macro_rules! ensure_arg {
    ($cond:expr, $($fmt:tt)+) => {
        if !($cond) { return Err($crate::Error::InvalidArgument(format!($($fmt)+))) }
    };
}

/// Return early with `Error::InvalidGraph` unless `cond` holds.
macro_rules! ensure_graph {
    ($cond:expr, $($fmt:tt)+) => {
        if !($cond) { return Err($crate::Error::InvalidGraph(format!($($fmt)+))) }
    };
}

pub(crate) use ensure_arg;
pub(crate) use ensure_graph;
