/// Failures a gateway call can surface to a store caller.
///
/// A reconciliation target missing from the local collection is not an error:
/// the patch is dropped and logged, and the collection is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected http status {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
