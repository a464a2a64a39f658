//! Engine-level error type.

use thiserror::Error;

use crate::ports::StoreError;
use delvr_domain::DomainError;

/// Failures surfaced by engine operations.
///
/// Load-side source failures never appear here - they are recovered locally
/// with defaults (see the loaders and `GameSaver`).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
