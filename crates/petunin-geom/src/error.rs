use thiserror::Error;

/// Errors produced by the geometric algorithms.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("need at least {required} points, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("line endpoints coincide")]
    DegenerateLine,

    #[error("points are collinear, no hull or enclosing rectangle exists")]
    DegenerateHull,

    #[error("no point lies strictly on one side of the line")]
    MissingSidePoint,
}

impl Error {
    /// Returns whether this error was caused by a degenerate configuration of otherwise valid
    /// input (collinear or coincident points), as opposed to too little input.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::DegenerateLine | Self::DegenerateHull | Self::MissingSidePoint
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
