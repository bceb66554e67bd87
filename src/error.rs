use thiserror::Error;

/// Fatal display problems. Nothing here is retried.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("display initialization failed: {0}")]
    Init(String),

    #[error("unusable display surface: {0}")]
    Surface(String),
}
