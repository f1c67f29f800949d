//! Layout error types.
//!
//! Everything here is a configuration or internal-invariant error: the
//! engine is deterministic, so re-running a failed measurement with the
//! same tree reproduces the same error. There are no retryable variants.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// A percent dimension (or an accumulated percent total) left `[0, 100)`.
    #[error("percent size {value} out of range, it should be 0% ~ 100%")]
    PercentOutOfRange { value: f32 },

    /// Width and height cannot both be ratio-sized: the pair is circular
    /// with no anchor.
    #[error("width and height size mode can not both be ratio")]
    RatioBothAxes,

    /// A scroll container holds exactly one child.
    #[error("scroll container can only hold 1 child, it has {count}")]
    ScrollChildCount { count: usize },

    /// A final measurement pass ended with unresolved children. The
    /// configured geometry is unsatisfiable; guessing is worse than failing.
    #[error("{container}: {remaining} children still unresolved after final pass")]
    Unresolved {
        container: &'static str,
        remaining: usize,
    },

    /// A declared dimension failed validation or parsing.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),
}
