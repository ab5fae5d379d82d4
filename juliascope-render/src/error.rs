use thiserror::Error;

/// Errors originating from the rendering pipeline.
///
/// Cancellation is not represented here: a preempted pass simply ends its
/// event stream.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to spawn render worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("render worker is no longer running")]
    WorkerGone,

    #[error(transparent)]
    Core(#[from] juliascope_core::CoreError),
}
