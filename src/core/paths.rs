use std::path::PathBuf;
use std::sync::OnceLock;

static SEQSEEK_HOME: OnceLock<PathBuf> = OnceLock::new();

/// Pick the home directory from an explicit override or the user's home
fn resolve_home(override_dir: Option<String>, user_home: Option<PathBuf>) -> PathBuf {
    match override_dir.filter(|p| !p.is_empty()) {
        Some(path) => PathBuf::from(path),
        None => user_home
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".seqseek"),
    }
}

/// Get the seqseek home directory
/// Checks SEQSEEK_HOME environment variable, falls back to ${HOME}/.seqseek
pub fn seqseek_home() -> PathBuf {
    SEQSEEK_HOME
        .get_or_init(|| resolve_home(std::env::var("SEQSEEK_HOME").ok(), dirs::home_dir()))
        .clone()
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    seqseek_home().join("config.toml")
}

/// Check if running with a custom home directory
pub fn is_custom_home() -> bool {
    std::env::var("SEQSEEK_HOME").is_ok()
}

/// Get a human-readable description of the current path configuration
pub fn describe_paths() -> String {
    format!(
        "seqseek paths:\n  \
        Home: {}\n  \
        Config: {}\n  \
        Custom: {}",
        seqseek_home().display(),
        default_config_path().display(),
        if is_custom_home() { "Yes" } else { "No (using defaults)" }
    )
}
