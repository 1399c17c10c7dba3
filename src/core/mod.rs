pub mod config;
pub mod paths;

pub use config::{BlastConfig, Config, EutilsConfig, HttpConfig};
