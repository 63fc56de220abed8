use thiserror::Error;

use crate::model::SectionId;
use crate::surface::SurfaceError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("layout plan does not match the report at section {0}")]
    PlanMismatch(SectionId),

    #[error("drawing failed while rendering {context}: {source}")]
    Surface {
        context: String,
        #[source]
        source: SurfaceError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn surface(context: impl Into<String>) -> impl FnOnce(SurfaceError) -> Error {
        let context = context.into();
        move |source| Error::Surface { context, source }
    }
}
