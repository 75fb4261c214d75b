use thiserror::Error;

/// Errors surfaced while constructing the scene.
///
/// The per-frame path never returns these: a lost render context is
/// reported as `FrameStatus::Stopped`, not as an error.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The configuration JSON could not be parsed.
    #[error("invalid scene config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// The configuration parsed but holds values the engine cannot use.
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
    /// The host render context was unavailable at mount time.
    #[error("render context lost")]
    ContextLost,
}

pub type SceneResult<T> = Result<T, SceneError>;
