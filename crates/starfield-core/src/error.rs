use thiserror::Error;

/// Reasons a starfield feature is absent. None of these reach the user; the
/// front end logs them and carries on without the affected layer.
#[derive(Debug, Error)]
pub enum StarfieldError {
    #[error("drawing surface `{0}` not found")]
    MissingSurface(String),
    #[error("2d drawing context unavailable")]
    MissingContext,
    #[error("sprite image unavailable: {0}")]
    SpriteUnavailable(String),
}
