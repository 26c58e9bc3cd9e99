//! Crate-wide error taxonomy.
//!
//! Every variant here is a constructor-time or programmer-error condition —
//! the kind of mistake that should fail loudly and immediately rather than
//! silently corrupt a render. The path-tracing integrator itself never
//! returns one of these: runtime numerical pathologies (NaN densities,
//! below-surface scatters, zero-length vectors) are handled by degrading to
//! black, logged at `trace` level, and are not part of this enum.

use thiserror::Error;

/// Errors surfaced by fallible constructors across the crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RendererError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("matrix is singular and cannot be inverted")]
    Singular,

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("value out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, RendererError>;
