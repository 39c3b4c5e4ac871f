pub mod core;
pub mod execution;
pub mod index;
pub mod tender;
