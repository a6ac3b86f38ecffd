//! Fetch error type and failure classification.

use thiserror::Error;

/// Error from a single HTTP attempt inside the resolution cascade.
///
/// Never escalated past the owning stage: the cascade driver folds it into
/// "this stage found nothing" after logging its kind.
#[derive(Debug, Error)]
pub enum FetchError {
    /// libcurl reported a transport problem (timeout, DNS, connection, TLS...).
    #[error("{0}")]
    Network(#[from] curl::Error),
    /// Response completed with a status other than 200.
    #[error("HTTP {0}")]
    Status(u32),
    /// Response had status 200 but an empty body.
    #[error("empty response body")]
    EmptyBody,
}

/// Coarse failure categories, for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connection,
    Http(u32),
    EmptyBody,
    Other,
}

/// Classify a fetch error into a FailureKind.
pub fn classify(err: &FetchError) -> FailureKind {
    match err {
        FetchError::Network(e) => {
            if e.is_operation_timedout() {
                FailureKind::Timeout
            } else if e.is_couldnt_connect()
                || e.is_couldnt_resolve_host()
                || e.is_couldnt_resolve_proxy()
                || e.is_recv_error()
                || e.is_send_error()
                || e.is_got_nothing()
            {
                FailureKind::Connection
            } else {
                FailureKind::Other
            }
        }
        FetchError::Status(code) => FailureKind::Http(*code),
        FetchError::EmptyBody => FailureKind::EmptyBody,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // libcurl error codes: 6 = couldn't resolve host, 7 = couldn't connect,
    // 28 = operation timed out.

    #[test]
    fn timeout_classified() {
        let err = FetchError::Network(curl::Error::new(28));
        assert_eq!(classify(&err), FailureKind::Timeout);
    }

    #[test]
    fn connection_failures_classified() {
        assert_eq!(
            classify(&FetchError::Network(curl::Error::new(7))),
            FailureKind::Connection
        );
        assert_eq!(
            classify(&FetchError::Network(curl::Error::new(6))),
            FailureKind::Connection
        );
    }

    #[test]
    fn status_and_empty_classified() {
        assert_eq!(classify(&FetchError::Status(404)), FailureKind::Http(404));
        assert_eq!(classify(&FetchError::EmptyBody), FailureKind::EmptyBody);
    }
}
