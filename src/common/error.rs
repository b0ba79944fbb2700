use rust_tokenizers::error::TokenizerError;
use tch::TchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorBertError {
    #[error("Endpoint not available error: {0}")]
    FileDownloadError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Tch tensor error: {0}")]
    TchError(String),

    #[error("Tokenizer error: {0}")]
    TokenizerError(String),

    #[error("Invalid configuration error: {0}")]
    InvalidConfigurationError(String),

    #[error("Not implemented: {0}")]
    NotImplementedError(String),
}

impl From<std::io::Error> for MirrorBertError {
    fn from(error: std::io::Error) -> Self {
        MirrorBertError::IOError(error.to_string())
    }
}

impl From<serde_json::Error> for MirrorBertError {
    fn from(error: serde_json::Error) -> Self {
        MirrorBertError::IOError(error.to_string())
    }
}

impl From<TokenizerError> for MirrorBertError {
    fn from(error: TokenizerError) -> Self {
        MirrorBertError::TokenizerError(error.to_string())
    }
}

impl From<TchError> for MirrorBertError {
    fn from(error: TchError) -> Self {
        MirrorBertError::TchError(error.to_string())
    }
}

#[cfg(feature = "remote")]
impl From<cached_path::Error> for MirrorBertError {
    fn from(error: cached_path::Error) -> Self {
        MirrorBertError::FileDownloadError(error.to_string())
    }
}
