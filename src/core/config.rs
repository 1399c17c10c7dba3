//! Configuration file (`$SEQSEEK_HOME/config.toml`)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::blast::PollPolicy;
use crate::query::{BlastProgram, Credentials};
use crate::SeqseekError;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub eutils: EutilsConfig,
    #[serde(default)]
    pub blast: BlastConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EutilsConfig {
    #[serde(default = "default_eutils_url")]
    pub base_url: String,
    #[serde(default = "default_search_database")]
    pub database: String,
    /// `retmax` sent with each search
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// How many hits get a summary and sequence fetched
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlastConfig {
    #[serde(default = "default_blast_url")]
    pub base_url: String,
    #[serde(default = "default_program")]
    pub program: BlastProgram,
    #[serde(default = "default_blast_database")]
    pub database: String,
    #[serde(default = "default_expect_value")]
    pub expect_value: f64,
    #[serde(default = "default_word_size")]
    pub word_size: u32,
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Status checks before giving up on a waiting job
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
    /// Overall wall-clock bound for one job (0 = no deadline)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// Default value functions
fn default_eutils_url() -> String { "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string() }
fn default_search_database() -> String { "nucleotide".to_string() }
fn default_max_results() -> u32 { 5 }
fn default_display_limit() -> usize { 2 }
fn default_blast_url() -> String { "https://blast.ncbi.nlm.nih.gov/Blast.cgi".to_string() }
fn default_program() -> BlastProgram { BlastProgram::Blastn }
fn default_blast_database() -> String { "nt".to_string() }
fn default_expect_value() -> f64 { 10.0 }
fn default_word_size() -> u32 { 11 }
fn default_initial_delay_secs() -> u64 { 2 }
fn default_poll_interval_secs() -> u64 { 10 }
fn default_max_polls() -> u32 { 180 }
fn default_timeout_secs() -> u64 { 3600 }
fn default_request_timeout_secs() -> u64 { 120 }
fn default_connect_timeout_secs() -> u64 { 30 }
fn default_user_agent() -> String { format!("seqseek/{}", env!("CARGO_PKG_VERSION")) }

impl Default for EutilsConfig {
    fn default() -> Self {
        Self {
            base_url: default_eutils_url(),
            database: default_search_database(),
            max_results: default_max_results(),
            display_limit: default_display_limit(),
            tool: None,
            email: None,
            api_key: None,
        }
    }
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            base_url: default_blast_url(),
            program: default_program(),
            database: default_blast_database(),
            expect_value: default_expect_value(),
            word_size: default_word_size(),
            initial_delay_secs: default_initial_delay_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            max_polls: default_max_polls(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl EutilsConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            tool: self.tool.clone(),
            email: self.email.clone(),
            api_key: self.api_key.clone(),
        }
    }

    pub fn endpoint(&self, utility: &str) -> String {
        format!("{}/{}.fcgi", self.base_url.trim_end_matches('/'), utility)
    }
}

impl BlastConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            initial_delay: Duration::from_secs(self.initial_delay_secs),
            interval: Duration::from_secs(self.poll_interval_secs),
            max_polls: self.max_polls,
            deadline: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, SeqseekError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| SeqseekError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

/// Load the file if it exists, otherwise fall back to defaults
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, SeqseekError> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), SeqseekError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| SeqseekError::Config(format!("Failed to serialize config: {}", e)))?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let config = Config::default();
        assert_eq!(config.eutils.database, "nucleotide");
        assert_eq!(config.eutils.max_results, 5);
        assert_eq!(config.eutils.display_limit, 2);
        assert_eq!(config.blast.program, BlastProgram::Blastn);
        assert_eq!(config.blast.expect_value, 10.0);
        assert_eq!(config.blast.word_size, 11);

        let policy = config.blast.poll_policy();
        assert_eq!(policy.initial_delay, Duration::from_secs(2));
        assert_eq!(policy.interval, Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let blast = BlastConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(blast.poll_policy().deadline, None);
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let eutils = EutilsConfig {
            base_url: "http://localhost:8080/eutils/".to_string(),
            ..Default::default()
        };
        assert_eq!(eutils.endpoint("esearch"), "http://localhost:8080/eutils/esearch.fcgi");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [blast]
            program = "blastp"
            database = "swissprot"
            "#,
        )
        .unwrap();

        assert_eq!(config.blast.program, BlastProgram::Blastp);
        assert_eq!(config.blast.database, "swissprot");
        assert_eq!(config.blast.word_size, 11);
        assert_eq!(config.eutils, EutilsConfig::default());
    }
}
