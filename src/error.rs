/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// Caller supplied a null payload or an unusable header; no request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Network or request execution error from `reqwest`, after retries.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Status differs from the one the endpoint is expected to return.
    #[error("unexpected status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    /// The call succeeded at the HTTP layer but carried no entity.
    #[error("empty response: {0}")]
    EmptyResponse(String),
    /// Request payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),
    /// Response decoding error.
    #[error("decode error: {0}")]
    Decode(String),
    /// Missing or malformed connector configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ConnectorError {
    /// Returns the HTTP status carried by [`ConnectorError::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
