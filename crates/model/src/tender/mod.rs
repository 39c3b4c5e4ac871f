pub mod category;
pub mod detail;
pub mod envelope;
pub mod summary;
