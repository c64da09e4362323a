use ::scraper::error::SelectorErrorKind;

/// All errors that can occur while fetching and extracting vlr.gg pages.
#[derive(thiserror::Error, Debug)]
pub enum VlrError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The requested match has no page upstream.
    #[error("match {id} not found")]
    MatchNotFound { id: String },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// An element was found but a field inside it was absent or malformed.
    #[error("missing or malformed field: {field}")]
    MissingField { field: &'static str },

    /// A configuration value could not be used.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}

/// Coarse classification of a [`VlrError`], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The upstream site could not be reached or answered with an error.
    Upstream,
    /// The page was fetched but did not have the expected shape.
    Extraction,
    /// The requested resource does not exist upstream.
    NotFound,
    /// A bug or misconfiguration on our side.
    Internal,
}

impl VlrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VlrError::Http { .. }
            | VlrError::UnexpectedStatus { .. }
            | VlrError::ResponseBody { .. } => ErrorKind::Upstream,
            VlrError::MatchNotFound { .. } => ErrorKind::NotFound,
            VlrError::ElementNotFound { .. } | VlrError::MissingField { .. } => {
                ErrorKind::Extraction
            }
            VlrError::Selector(_) | VlrError::InvalidConfig { .. } => ErrorKind::Internal,
        }
    }
}

impl<'a> From<SelectorErrorKind<'a>> for VlrError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        VlrError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VlrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = VlrError::MatchNotFound { id: "1".into() };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.kind().to_string(), "not_found");

        let err = VlrError::MissingField { field: "href" };
        assert_eq!(err.kind(), ErrorKind::Extraction);
        assert_eq!(err.to_string(), "missing or malformed field: href");

        let err = VlrError::InvalidConfig {
            key: "VLR_TIMEZONE",
            value: "Mars/Olympus".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
