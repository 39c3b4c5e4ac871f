use connectors::error::SourceError;
use engine_core::retry::RetryDisposition;

pub fn classify_source_error(err: &SourceError) -> RetryDisposition {
    match err {
        SourceError::Network { .. } => RetryDisposition::Retry,
        SourceError::Status { .. } => RetryDisposition::Retry,
        SourceError::UpstreamResponse { .. } => RetryDisposition::Stop,
        SourceError::Config(_) => RetryDisposition::Stop,
    }
}
