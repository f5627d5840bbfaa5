use thiserror::Error;

use crate::export::ExportError;
use crate::patch::PatchError;
use crate::review::ReviewError;

/// Application-level error type.
///
/// Every user-initiated action catches failures at its own boundary and
/// converts them into a notice; `AppError` is what those boundaries (and the
/// CLI driver) see before conversion.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown template: {0}")]
    TemplateNotFound(String),

    #[error("Patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
