pub mod coordinator;
pub mod engine;
pub mod error;

#[cfg(test)]
mod tests;
