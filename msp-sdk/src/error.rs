/// Error code the API answers with when the API key is unknown or revoked.
pub const INVALID_API_KEY_CODE: i64 = 1032;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("MultiSafepay API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_invalid_api_key(&self) -> bool {
        matches!(self, ApiError::InvalidApiKey)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
