use thiserror::Error;

/// Failures on the SPA load path. Every one of them ends in a full browser navigation.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },
    #[error("http error {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("response body of {url} is not valid UTF-8")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
