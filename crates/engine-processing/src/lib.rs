pub mod error;
pub mod reconciler;
pub mod retry;
pub mod source;
pub mod transform;
