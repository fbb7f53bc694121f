use shared::WheelError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed with status {0}")]
    Status(u16),

    /// First entry of a GraphQL `errors` array.
    #[error("{0}")]
    GraphQl(String),

    #[error("unexpected message: {0}")]
    Protocol(String),

    #[error("response contained no data")]
    EmptyResponse,

    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Wheel(#[from] WheelError),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
