pub mod blast;
pub mod config;
pub mod search;
pub mod validate;
