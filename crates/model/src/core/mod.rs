pub mod date;
pub mod value;
