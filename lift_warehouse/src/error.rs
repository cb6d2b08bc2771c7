use lift_core::CalcError;

/// Failures talking to the warehouse.
#[derive(Debug, thiserror::Error)]
pub enum WarehouseError {
    #[error("configuration: {0}")]
    Config(#[from] CalcError),
    #[error("failed to create HTTP client: {0}")]
    HttpClientBuild(String),
    #[error("network error: {0}")]
    Request(String),
    #[error("warehouse returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse warehouse response: {0}")]
    Parse(String),
    #[error("login rejected ({code}): {message}")]
    LoginRejected { code: String, message: String },
    #[error("query failed ({code}): {message}")]
    QueryFailed { code: String, message: String },
    #[error("login response did not include a session token")]
    MissingToken,
}

impl From<reqwest::Error> for WarehouseError {
    fn from(e: reqwest::Error) -> Self {
        WarehouseError::Request(e.to_string())
    }
}
