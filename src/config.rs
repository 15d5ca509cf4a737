use serde::{Deserialize, Serialize};

use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_path: default_database_path(),
            static_dir: default_static_dir(),
        }
    }
}

const fn default_port() -> u16 {
    3000
}

fn default_database_path() -> PathBuf {
    install_dir().join("notes.db")
}

fn default_static_dir() -> PathBuf {
    install_dir().join("frontend").join("dist")
}

/// Directory holding the running executable, or the working directory when
/// it cannot be determined.
fn install_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn load_from_file(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

fn load_from_vars<I>(vars: I) -> Result<Config, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::from_iter(vars).map_err(Into::into)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path =
        env::var("NOTES_BACKEND_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try config file
    if Path::new(&config_path).exists() {
        tracing::info!("Loading configuration from '{}'", config_path);
        return load_from_file(Path::new(&config_path));
    }

    // Fallback to environment variables
    tracing::info!(
        "Config file '{}' not found, loading configuration from environment variables",
        config_path
    );
    load_from_vars(env::vars())
}
