use drift_core::DriftError;
use thiserror::Error;

use crate::ProviderError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] DriftError),

    #[error("a full-mode hand-off is already in progress")]
    HandoffInProgress,

    #[error("the engine is already in full mode")]
    HandoffComplete,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type EngineResult<T> = Result<T, EngineError>;
