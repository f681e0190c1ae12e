//! Error handling

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the anomaly core.
///
/// Acknowledging an unknown id is not an error - it is recovered locally as a
/// boolean `false`. HTTP-status mapping happens outside this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The external scoring service could not produce a usable result:
    /// network failure, timeout, non-2xx response, unsuccessful envelope,
    /// or a body that does not match the contract.
    #[error("scoring service unavailable: {0}")]
    DetectorUnavailable(String),

    /// Input rejected before any scoring or store mutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::DetectorUnavailable(format!("request timed out: {}", err))
        } else {
            Error::DetectorUnavailable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detector_unavailable_display() {
        let err = Error::DetectorUnavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "scoring service unavailable: connection refused"
        );
    }

    #[test]
    fn invalid_input_display() {
        let err = Error::InvalidInput("api_name must not be empty".to_string());
        assert_eq!(err.to_string(), "invalid input: api_name must not be empty");
    }
}
