use thiserror::Error;

pub type NcResult<T> = Result<T, NamecheapError>;

#[derive(Error, Debug)]
pub enum NamecheapError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error (HTTP {status}): {message}")]
    Transport { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Namecheap API error {code}: {message}")]
    Api { code: i64, message: String },
}

impl From<reqwest::Error> for NamecheapError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
        NamecheapError::Transport {
            status,
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for NamecheapError {
    fn from(err: quick_xml::Error) -> Self {
        NamecheapError::MalformedResponse(err.to_string())
    }
}

impl From<serde_json::Error> for NamecheapError {
    fn from(err: serde_json::Error) -> Self {
        NamecheapError::MalformedResponse(err.to_string())
    }
}
