/// Errors from configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum PrismError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unknown demo `{0}` (expected `camera` or `lighting`)")]
    UnknownDemo(String),
}

impl PrismError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PrismError::InvalidConfig(msg.into())
    }
}
