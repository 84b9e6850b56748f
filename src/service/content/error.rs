#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Generator not configured")]
    NotConfigured,
    #[error("Request error: {0}")]
    Request(reqwest::Error),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Prompt blocked: {0}")]
    Blocked(String),
    #[error("Empty response")]
    EmptyResponse,
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

// request URLs are kept out of logs
impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e.without_url())
    }
}
