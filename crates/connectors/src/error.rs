use thiserror::Error;

/// Failures of calls against the tender catalog.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (connect, timeout, broken body).
    #[error("Network error calling {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    /// The catalog answered with a non-2xx status.
    #[error("Catalog responded {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("Unexpected catalog response from {endpoint}: {message}")]
    UpstreamResponse { endpoint: String, message: String },

    #[error("Invalid catalog client configuration: {0}")]
    Config(String),
}

/// Failures of a single index store call. Each variant names the operation
/// that produced it so callers can isolate the failing batch.
#[derive(Debug, Error)]
pub enum IndexStoreError {
    #[error("Index request '{operation}' failed: {message}")]
    Network {
        operation: &'static str,
        message: String,
    },

    #[error("Index responded {status} to '{operation}': {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to decode index response for '{operation}': {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    /// The blocking worker running the call panicked or was cancelled.
    #[error("Index worker for '{operation}' did not complete: {message}")]
    Worker {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid index client configuration: {0}")]
    Config(String),
}

impl IndexStoreError {
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            IndexStoreError::Network { operation, .. }
            | IndexStoreError::Status { operation, .. }
            | IndexStoreError::Decode { operation, .. }
            | IndexStoreError::Worker { operation, .. } => Some(operation),
            IndexStoreError::Config(_) => None,
        }
    }
}

/// Keeps error bodies readable in logs and reports.
pub(crate) fn truncate_body(body: String) -> String {
    const MAX_BODY: usize = 512;
    if body.len() <= MAX_BODY {
        return body;
    }
    let cut = (0..=MAX_BODY)
        .rev()
        .find(|i| body.is_char_boundary(*i))
        .unwrap_or(0);
    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops".to_string()), "oops");
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let body = "ñ".repeat(400);
        let truncated = truncate_body(body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 515);
    }
}
