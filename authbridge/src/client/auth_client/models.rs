use serde::Deserialize;

/// Error body returned by the exchange service
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub enum AuthClientError {
    Http(reqwest::Error),
    Rejected { status: u16, message: String },
}

impl std::fmt::Display for AuthClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {}", e),
            Self::Rejected { status, message } => {
                write!(f, "Server rejected request ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for AuthClientError {}

impl From<reqwest::Error> for AuthClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}
