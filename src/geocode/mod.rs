pub mod cache;
pub mod resolver;
