pub mod keys;
pub mod queries;
